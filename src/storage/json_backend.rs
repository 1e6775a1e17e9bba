use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::{
    errors::{CorruptStateError, PersistError},
    ledger::Ledger,
    utils::persistence::write_atomic,
};

use super::StorageBackend;

const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const ID_MARK_SUFFIX: &str = ".ids.json";

/// Sidecar content kept next to the ledger file.
#[derive(Debug, Serialize, Deserialize)]
struct IdMark {
    last_issued_id: u64,
}

/// Filesystem-backed JSON persistence for a single ledger file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar holding the highest issued id, e.g. `budget_data.json.ids.json`.
    pub fn id_mark_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "ledger".into());
        name.push(ID_MARK_SUFFIX);
        self.path.with_file_name(name)
    }

    fn quarantine_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("ledger");
        let stamp = Local::now().format(QUARANTINE_TIMESTAMP_FORMAT);
        let mut candidate = self.path.with_file_name(format!("{file_name}.corrupt-{stamp}"));
        let mut attempt = 1;
        while candidate.exists() {
            candidate = self
                .path
                .with_file_name(format!("{file_name}.corrupt-{stamp}-{attempt}"));
            attempt += 1;
        }
        candidate
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self) -> Result<Option<Ledger>, CorruptStateError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(CorruptStateError::unreadable(self.describe(), err.to_string())),
        };
        let ledger = parse_ledger(&data)
            .map_err(|reason| CorruptStateError::malformed(self.describe(), reason))?;
        Ok(Some(ledger))
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistError> {
        let json = serialize_ledger(ledger)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    fn load_id_mark(&self) -> Option<u64> {
        let path = self.id_mark_path();
        let data = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<IdMark>(&data) {
            Ok(mark) => Some(mark.last_issued_id),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable id mark");
                None
            }
        }
    }

    fn save_id_mark(&self, last_issued: u64) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(&IdMark {
            last_issued_id: last_issued,
        })?;
        write_atomic(&self.id_mark_path(), &json)?;
        Ok(())
    }

    fn quarantine(&self) -> io::Result<Option<PathBuf>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let target = self.quarantine_path();
        fs::rename(&self.path, &target)?;
        Ok(Some(target))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Renders a ledger as the persisted, two-space indented JSON array.
pub fn serialize_ledger(ledger: &Ledger) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(ledger)
}

/// Parses persisted JSON and checks the ledger invariants.
pub fn parse_ledger(data: &str) -> Result<Ledger, String> {
    let ledger: Ledger = serde_json::from_str(data).map_err(|err| err.to_string())?;
    ledger.check_integrity()?;
    Ok(ledger)
}
