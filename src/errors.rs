use std::{io, path::PathBuf};

use thiserror::Error;

/// Rejections raised before a transaction is recorded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Amount must be positive (got {0})")]
    NonPositiveAmount(f64),
    #[error("Unknown transaction type `{0}` (expected income or expense)")]
    UnknownKind(String),
}

/// A delete referenced an id that is not in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transaction #{id} not found")]
pub struct NotFoundError {
    pub id: u64,
}

/// Failure writing the backing store. The in-memory ledger stays valid.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Why stored ledger data could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptCause {
    /// The content was read but is not a valid ledger.
    Malformed,
    /// The backing store could not be read at all.
    Unreadable,
}

/// The backing store exists but could not be turned into a ledger.
#[derive(Debug, Clone, Error)]
#[error("ledger data at {location} is unreadable: {reason}")]
pub struct CorruptStateError {
    pub location: String,
    pub reason: String,
    pub cause: CorruptCause,
    /// Where the unreadable content was moved before an empty ledger replaced it.
    pub preserved_at: Option<PathBuf>,
}

impl CorruptStateError {
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_cause(location, reason, CorruptCause::Malformed)
    }

    pub fn unreadable(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_cause(location, reason, CorruptCause::Unreadable)
    }

    fn with_cause(
        location: impl Into<String>,
        reason: impl Into<String>,
        cause: CorruptCause,
    ) -> Self {
        Self {
            location: location.into(),
            reason: reason.into(),
            cause,
            preserved_at: None,
        }
    }

    /// Only content that was read and rejected is worth moving aside.
    pub fn can_quarantine(&self) -> bool {
        self.cause == CorruptCause::Malformed
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Error type that captures every ledger failure a caller may want to report.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
