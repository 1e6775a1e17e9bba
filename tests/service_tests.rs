use budget_tracker::{
    core::services::{BalanceStatus, NewTransaction},
    storage::MemoryStorage,
    IdPolicy, IdSequence, Ledger, LedgerStore, StoreOptions, SummaryService, TransactionKind,
    TransactionService, ValidationError,
};
use chrono::NaiveDate;

fn memory_store() -> (LedgerStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let (store, _) = LedgerStore::load(Box::new(storage.clone()), StoreOptions::default());
    (store, storage)
}

fn ids(store: &LedgerStore) -> Vec<u64> {
    store.transactions().iter().map(|t| t.id).collect()
}

#[test]
fn salary_and_lunch_scenario() {
    let (mut store, _) = memory_store();
    store.add(50.0, "Salary", TransactionKind::Income, "").unwrap();
    store.add(20.0, "Food", TransactionKind::Expense, "lunch").unwrap();

    let ledger = store.ledger();
    assert_eq!(SummaryService::balance(ledger), 30.0);
    assert_eq!(<(f64, f64)>::from(SummaryService::totals(ledger)), (50.0, 20.0));

    let breakdown = SummaryService::category_breakdown(ledger);
    assert_eq!(breakdown.len(), 1);
    let food = breakdown.get("Food").unwrap();
    assert_eq!((food.amount, food.percentage), (20.0, 100.0));
    assert_eq!(SummaryService::status_label(30.0), "positive");
}

#[test]
fn delete_middle_of_three() {
    let (mut store, _) = memory_store();
    for (amount, category) in [(1.0, "first"), (2.0, "second"), (3.0, "third")] {
        store
            .add(amount, category, TransactionKind::Expense, "")
            .unwrap();
    }
    store.delete(2).unwrap();
    assert_eq!(ids(&store), vec![1, 2]);
    assert_eq!(store.ledger().transaction(2).unwrap().category, "third");
}

#[test]
fn repeated_deletes_keep_ids_contiguous_and_order_stable() {
    let (mut store, _) = memory_store();
    for n in 1..=8 {
        store
            .add(n as f64, &format!("c{n}"), TransactionKind::Expense, "")
            .unwrap();
    }
    for id in [8, 1, 3, 3] {
        let before: Vec<String> = store
            .transactions()
            .iter()
            .filter(|t| t.id != id)
            .map(|t| t.category.clone())
            .collect();
        store.delete(id).unwrap();
        let after: Vec<String> = store
            .transactions()
            .iter()
            .map(|t| t.category.clone())
            .collect();
        assert_eq!(after, before);
        let expected: Vec<u64> = (1..=store.ledger().len() as u64).collect();
        assert_eq!(ids(&store), expected);
    }
    assert_eq!(store.ledger().len(), 4);
}

#[test]
fn balance_matches_signed_sum_for_mixed_sequences() {
    let (mut store, _) = memory_store();
    let entries = [
        (120.0, TransactionKind::Income),
        (35.5, TransactionKind::Expense),
        (0.25, TransactionKind::Expense),
        (9.75, TransactionKind::Income),
        (200.0, TransactionKind::Expense),
    ];
    for (amount, kind) in entries {
        store.add(amount, "Mixed", kind, "").unwrap();
    }
    let income: f64 = entries
        .iter()
        .filter(|(_, k)| *k == TransactionKind::Income)
        .map(|(a, _)| a)
        .sum();
    let expense: f64 = entries
        .iter()
        .filter(|(_, k)| *k == TransactionKind::Expense)
        .map(|(a, _)| a)
        .sum();
    let balance = SummaryService::balance(store.ledger());
    assert!((balance - (income - expense)).abs() < 1e-9);

    let summary = SummaryService::summarize(store.ledger());
    assert_eq!(summary.status, BalanceStatus::Negative);
    assert!((summary.categories.total_percentage() - 100.0).abs() < 1e-9);
}

#[test]
fn rejected_amounts_leave_store_untouched() {
    let (mut store, storage) = memory_store();
    store.add(10.0, "Food", TransactionKind::Expense, "").unwrap();
    let snapshot = store.ledger().clone();
    let saved = storage.contents();

    for amount in [0.0, -10.0, f64::NAN] {
        let err = store
            .add(amount, "Food", TransactionKind::Expense, "")
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveAmount(_)));
    }
    assert_eq!(store.ledger(), &snapshot);
    assert_eq!(storage.save_count(), 1);
    assert_eq!(storage.contents(), saved);
}

#[test]
fn income_only_breakdown_is_empty_and_break_even_label() {
    let (mut store, _) = memory_store();
    store.add(10.0, "Gift", TransactionKind::Income, "").unwrap();
    assert!(SummaryService::category_breakdown(store.ledger()).is_empty());
    assert_eq!(SummaryService::status_label(0.0), "break-even");
    assert_eq!(SummaryService::status_label(-1.0), "negative");
}

#[test]
fn service_layer_works_without_a_store() {
    let mut ledger = Ledger::new();
    let at = NaiveDate::from_ymd_opt(2024, 2, 10)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();
    let entry = NewTransaction::new(250.0, " Bills ", TransactionKind::Expense, "power");
    let mut ids = IdSequence::new(IdPolicy::Dense);
    let txn = TransactionService::add(&mut ledger, &mut ids, entry, at).unwrap();
    assert_eq!(txn.category, "Bills");
    assert_eq!(txn.recorded_at, at);
    assert_eq!(TransactionService::list(&ledger).len(), 1);
}
