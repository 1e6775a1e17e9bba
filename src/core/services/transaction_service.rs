//! Business logic helpers for recording and removing transactions.

use chrono::NaiveDateTime;

use crate::errors::{NotFoundError, ValidationError};
use crate::ledger::{IdPolicy, IdSequence, Ledger, Transaction, TransactionKind};

/// Caller-supplied fields for a transaction that has not been recorded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    pub kind: TransactionKind,
    pub description: String,
}

impl NewTransaction {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        kind: TransactionKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            kind,
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // NaN fails the comparison, so it is rejected along with zero and negatives.
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

/// Provides validated mutation helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates and appends a transaction, returning the recorded copy.
    /// A rejected entry does not consume an id.
    pub fn add(
        ledger: &mut Ledger,
        ids: &mut IdSequence,
        entry: NewTransaction,
        recorded_at: NaiveDateTime,
    ) -> Result<Transaction, ValidationError> {
        entry.validate()?;
        let transaction = Transaction::new(
            ids.issue(ledger),
            entry.amount,
            entry.category.trim(),
            entry.kind,
            entry.description.trim(),
            recorded_at,
        );
        ledger.push(transaction.clone());
        Ok(transaction)
    }

    /// Removes the transaction identified by `id`, returning it with its original id.
    pub fn remove(
        ledger: &mut Ledger,
        policy: IdPolicy,
        id: u64,
    ) -> Result<Transaction, NotFoundError> {
        ledger.remove(id, policy).ok_or(NotFoundError { id })
    }

    /// Returns a snapshot of the ledger's transactions.
    pub fn list(ledger: &Ledger) -> &[Transaction] {
        ledger.transactions()
    }
}
