pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{
    BalanceStatus, CategoryBreakdown, CategoryShare, Summary, SummaryService, Totals,
};
pub use transaction_service::{NewTransaction, TransactionService};
