//! Ledger domain models and persistence-friendly types.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use ledger::{IdPolicy, IdSequence, Ledger};
pub use transaction::{now_local, Transaction, TransactionKind, DATE_FORMAT};
