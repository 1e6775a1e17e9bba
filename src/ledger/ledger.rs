use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// How transaction ids are handed out and what happens to them on delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Ids stay contiguous `1..=N`; deleting shifts every later id down by one.
    #[default]
    Dense,
    /// Ids grow monotonically and are never shifted or reused while they exist.
    Stable,
}

/// Ordered transaction history. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Largest id currently present, or 0 for an empty ledger.
    pub fn highest_id(&self) -> u64 {
        self.transactions.iter().map(|txn| txn.id).max().unwrap_or(0)
    }

    pub(crate) fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Removes the transaction with `id`, returning it with its original id.
    pub(crate) fn remove(&mut self, id: u64, policy: IdPolicy) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        if policy == IdPolicy::Dense {
            for txn in self.transactions.iter_mut().filter(|txn| txn.id > removed.id) {
                txn.id -= 1;
            }
        }
        Some(removed)
    }

    pub fn is_dense(&self) -> bool {
        self.transactions
            .iter()
            .enumerate()
            .all(|(index, txn)| txn.id == index as u64 + 1)
    }

    /// Reassigns ids `1..=N` in sequence order. Returns whether anything changed.
    pub(crate) fn renumber(&mut self) -> bool {
        let mut changed = false;
        for (index, txn) in self.transactions.iter_mut().enumerate() {
            let expected = index as u64 + 1;
            if txn.id != expected {
                txn.id = expected;
                changed = true;
            }
        }
        changed
    }

    /// Checks the invariants a persisted snapshot must satisfy before it is adopted.
    pub fn check_integrity(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for txn in &self.transactions {
            if txn.id == 0 {
                return Err("transaction ids must be positive".into());
            }
            if !seen.insert(txn.id) {
                return Err(format!("duplicate transaction id {}", txn.id));
            }
            if !txn.amount.is_finite() || txn.amount <= 0.0 {
                return Err(format!(
                    "transaction {} has non-positive amount {}",
                    txn.id, txn.amount
                ));
            }
        }
        Ok(())
    }
}

/// Hands out transaction ids under an [`IdPolicy`].
///
/// Under `Stable` the sequence remembers the highest id it ever issued, so an id
/// freed by a delete is never handed out again, even after the newest entry goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    policy: IdPolicy,
    last_issued: u64,
}

impl IdSequence {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            policy,
            last_issued: 0,
        }
    }

    /// Continues a sequence for `ledger`, never going below a previously recorded mark.
    pub fn resume(policy: IdPolicy, ledger: &Ledger, recorded: u64) -> Self {
        Self {
            policy,
            last_issued: recorded.max(ledger.highest_id()),
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// Highest id handed out so far.
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }

    /// Id the next call to [`IdSequence::issue`] would return.
    pub fn peek(&self, ledger: &Ledger) -> u64 {
        match self.policy {
            IdPolicy::Dense => ledger.len() as u64 + 1,
            IdPolicy::Stable => self.last_issued.max(ledger.highest_id()) + 1,
        }
    }

    pub fn issue(&mut self, ledger: &Ledger) -> u64 {
        let id = self.peek(ledger);
        self.last_issued = self.last_issued.max(id);
        id
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
