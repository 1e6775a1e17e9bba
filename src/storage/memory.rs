use std::{
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    errors::{CorruptStateError, PersistError},
    ledger::Ledger,
};

use super::StorageBackend;

#[derive(Debug, Default)]
struct MemoryState {
    contents: Option<String>,
    id_mark: Option<u64>,
    saves: usize,
    fail_saves: bool,
}

/// In-memory backend holding the serialized ledger. Clones share the same state,
/// so a handle kept outside a [`crate::LedgerStore`] can observe its writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with raw persisted content.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.state().contents = Some(contents.into());
        storage
    }

    pub fn contents(&self) -> Option<String> {
        self.state().contents.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.state().saves
    }

    /// Makes every following save fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.state().fail_saves = fail;
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn read_only() -> PersistError {
    PersistError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "memory storage is read-only",
    ))
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<Ledger>, CorruptStateError> {
        match self.state().contents.as_deref() {
            None => Ok(None),
            Some(raw) => super::json_backend::parse_ledger(raw)
                .map(Some)
                .map_err(|reason| CorruptStateError::malformed(self.describe(), reason)),
        }
    }

    fn load_id_mark(&self) -> Option<u64> {
        self.state().id_mark
    }

    fn save_id_mark(&self, last_issued: u64) -> Result<(), PersistError> {
        let mut state = self.state();
        if state.fail_saves {
            return Err(read_only());
        }
        state.id_mark = Some(last_issued);
        Ok(())
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistError> {
        let mut state = self.state();
        if state.fail_saves {
            return Err(read_only());
        }
        state.contents = Some(super::json_backend::serialize_ledger(ledger)?);
        state.saves += 1;
        Ok(())
    }

    fn quarantine(&self) -> std::io::Result<Option<PathBuf>> {
        Ok(None)
    }

    fn describe(&self) -> String {
        "<memory>".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.save(&Ledger::new()).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert_eq!(handle.contents().as_deref(), Some("[]"));
    }

    #[test]
    fn failing_saves_keep_previous_contents() {
        let storage = MemoryStorage::with_contents("[]");
        storage.fail_saves(true);
        assert!(storage.save(&Ledger::new()).is_err());
        assert_eq!(storage.save_count(), 0);
        assert_eq!(storage.contents().as_deref(), Some("[]"));
        assert!(storage.save_id_mark(3).is_err());
        assert_eq!(storage.load_id_mark(), None);
    }
}
