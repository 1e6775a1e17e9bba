pub mod json_backend;
pub mod memory;

use std::path::PathBuf;

use crate::{
    errors::{CorruptStateError, PersistError},
    ledger::Ledger,
};

/// Abstraction over the backing store a [`crate::LedgerStore`] persists into.
pub trait StorageBackend: Send + Sync {
    /// Reads the persisted ledger. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Ledger>, CorruptStateError>;

    /// Replaces the persisted ledger with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<(), PersistError>;

    /// Highest transaction id ever issued, if one was recorded alongside the ledger.
    fn load_id_mark(&self) -> Option<u64>;

    /// Records the highest issued id without touching the ledger layout.
    fn save_id_mark(&self, last_issued: u64) -> Result<(), PersistError>;

    /// Moves unreadable content out of the way so it can be recovered by hand.
    /// Returns where it went, or `None` when there was nothing to move.
    fn quarantine(&self) -> std::io::Result<Option<PathBuf>>;

    /// Human-readable location used in logs and notices.
    fn describe(&self) -> String;
}

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;
