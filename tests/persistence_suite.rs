use budget_tracker::{
    storage::{JsonFileStorage, StorageBackend},
    IdPolicy, LedgerStore, StoreOptions, TransactionKind,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn open(path: &Path) -> LedgerStore {
    LedgerStore::open(path, StoreOptions::default()).0
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");
    tmp
}

#[test]
fn persist_then_load_roundtrips_content() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");

    let mut store = open(&path);
    store
        .add(1250.0, "Salary", TransactionKind::Income, "March pay")
        .unwrap();
    store.add(19.99, "Food", TransactionKind::Expense, "").unwrap();
    store
        .add(600.0, "Rent", TransactionKind::Expense, "  flat  ")
        .unwrap();
    store.persist().expect("explicit persist");

    let (reloaded, report) = LedgerStore::open(&path, StoreOptions::default());
    assert!(!report.recovered());
    assert!(report.warnings.is_empty());
    assert_eq!(reloaded.ledger(), store.ledger());
    assert_eq!(reloaded.transactions()[2].description, "flat");
}

#[test]
fn missing_file_starts_empty_without_notice() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("nothing-here.json");
    let (store, report) = LedgerStore::open(&path, StoreOptions::default());
    assert!(store.ledger().is_empty());
    assert!(!report.recovered());
    assert!(!path.exists(), "loading must not create the file");
}

#[test]
fn invalid_syntax_loads_empty_and_preserves_original() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    fs::write(&path, "[{ this is not json").unwrap();

    let (mut store, report) = LedgerStore::open(&path, StoreOptions::default());
    assert!(store.ledger().is_empty());
    let notice = report.notice.expect("corruption is reported");
    let preserved = notice.preserved_at.expect("original moved aside");
    assert_eq!(fs::read_to_string(&preserved).unwrap(), "[{ this is not json");

    store.add(5.0, "Food", TransactionKind::Expense, "").unwrap();
    assert_eq!(fs::read_to_string(&preserved).unwrap(), "[{ this is not json");
    assert_eq!(open(&path).ledger().len(), 1);
}

#[test]
fn corrupt_file_is_left_in_place_when_preservation_is_off() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    fs::write(&path, "{}").unwrap();

    let options = StoreOptions {
        preserve_corrupt: false,
        ..StoreOptions::default()
    };
    let (store, report) = LedgerStore::open(&path, options);
    assert!(store.ledger().is_empty());
    let notice = report.notice.expect("object instead of array is corrupt");
    assert!(notice.preserved_at.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn deleting_unknown_id_leaves_file_byte_for_byte() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    let mut store = open(&path);
    store.add(10.0, "Gift", TransactionKind::Income, "").unwrap();
    store.add(3.0, "Bus", TransactionKind::Expense, "").unwrap();
    let before = fs::read(&path).unwrap();
    let snapshot = store.ledger().clone();

    assert_eq!(store.delete(3).unwrap_err().id, 3);
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(store.ledger(), &snapshot);
}

#[test]
fn delete_renumbers_and_persists() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    let mut store = open(&path);
    for (amount, category) in [(1.0, "a"), (2.0, "b"), (3.0, "c")] {
        store
            .add(amount, category, TransactionKind::Expense, "")
            .unwrap();
    }

    let removed = store.delete(2).unwrap().into_inner();
    assert_eq!((removed.id, removed.category.as_str()), (2, "b"));

    let reloaded = open(&path);
    let rows: Vec<(u64, &str)> = reloaded
        .transactions()
        .iter()
        .map(|t| (t.id, t.category.as_str()))
        .collect();
    assert_eq!(rows, vec![(1, "a"), (2, "c")]);
}

#[test]
fn stable_ids_survive_reload() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    let options = StoreOptions {
        id_policy: IdPolicy::Stable,
        ..StoreOptions::default()
    };
    let (mut store, _) = LedgerStore::open(&path, options);
    for amount in [1.0, 2.0, 3.0] {
        store.add(amount, "x", TransactionKind::Income, "").unwrap();
    }
    store.delete(1).unwrap();

    let (mut reloaded, report) = LedgerStore::open(&path, options);
    assert!(report.warnings.is_empty());
    let added = reloaded.add(9.0, "x", TransactionKind::Income, "").unwrap();
    assert_eq!(added.value.id, 4);
}

#[test]
fn failed_write_keeps_previous_file_and_memory_state() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    let mut store = open(&path);
    store.add(42.0, "Salary", TransactionKind::Income, "").unwrap();
    let original = fs::read_to_string(&path).unwrap();

    // A directory squatting on the staging path makes the write fail.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    let outcome = store.add(99.0, "Bonus", TransactionKind::Income, "").unwrap();
    assert!(outcome.warning().is_some(), "expected a persist warning");
    assert_eq!(store.ledger().len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    fs::remove_dir_all(&tmp_path).unwrap();
    store.persist().expect("persist succeeds once the path is clear");
    assert_eq!(open(&path).ledger().len(), 2);
}

#[test]
fn reads_files_written_by_other_tools() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    fs::write(
        &path,
        r#"[
  {
    "id": 1,
    "amount": 50.0,
    "category": "Salary",
    "type": "income",
    "description": "",
    "date": "2024-05-01 08:30:00"
  },
  {
    "id": 2,
    "amount": 20,
    "category": "Food",
    "type": "expense",
    "description": "lunch",
    "date": "2024-05-01 12:45:10"
  }
]"#,
    )
    .unwrap();

    let storage = JsonFileStorage::new(&path);
    let ledger = storage.load().unwrap().expect("ledger present");
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.transaction(2).unwrap().amount, 20.0);
    assert_eq!(storage.describe(), path.display().to_string());
}

#[test]
fn stable_ids_are_not_reissued_after_deleting_the_newest() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    let options = StoreOptions {
        id_policy: IdPolicy::Stable,
        ..StoreOptions::default()
    };
    let (mut store, _) = LedgerStore::open(&path, options);
    for amount in [1.0, 2.0, 3.0] {
        store.add(amount, "x", TransactionKind::Expense, "").unwrap();
    }
    store.delete(3).unwrap();

    let storage = JsonFileStorage::new(&path);
    assert_eq!(storage.load_id_mark(), Some(3));
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n  {"), "ledger layout stays a bare array");

    let (mut reloaded, _) = LedgerStore::open(&path, options);
    let added = reloaded.add(4.0, "x", TransactionKind::Expense, "").unwrap();
    assert_eq!(added.value.id, 4);
}

#[test]
fn unreadable_data_path_is_reported_but_not_moved() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("budget_data.json");
    fs::create_dir(&path).unwrap();

    let (store, report) = LedgerStore::open(&path, StoreOptions::default());
    assert!(store.ledger().is_empty());
    let notice = report.notice.expect("unreadable path is reported");
    assert!(notice.preserved_at.is_none());
    assert!(path.is_dir(), "directory must stay where it was");
    let siblings = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(siblings, 1);
}
