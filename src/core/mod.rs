pub mod ledger_store;
pub mod services;

pub use ledger_store::{load_ledger, LedgerStore, LoadReport, Outcome, StoreOptions};
