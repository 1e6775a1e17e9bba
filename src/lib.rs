#![doc(test(attr(deny(warnings))))]

//! Budget Tracker keeps a single-user ledger of income and expense events,
//! persists it as JSON, and derives balance, totals, and per-category reports.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{LedgerStore, LoadReport, Outcome, StoreOptions};
pub use crate::core::services::{SummaryService, TransactionService};
pub use errors::{
    ConfigError, CorruptCause, CorruptStateError, LedgerError, NotFoundError, PersistError,
    ValidationError,
};
pub use ledger::{IdPolicy, IdSequence, Ledger, Transaction, TransactionKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Tracker tracing initialized.");
    });
}
