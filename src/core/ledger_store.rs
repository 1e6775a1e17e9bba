use std::path::PathBuf;

use crate::core::services::{NewTransaction, TransactionService};
use crate::errors::{CorruptStateError, NotFoundError, PersistError, ValidationError};
use crate::ledger::{now_local, IdPolicy, IdSequence, Ledger, Transaction, TransactionKind};
use crate::storage::{JsonFileStorage, StorageBackend};

/// Knobs that change how a [`LedgerStore`] treats ids and unreadable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub id_policy: IdPolicy,
    pub preserve_corrupt: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::Dense,
            preserve_corrupt: true,
        }
    }
}

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Set when the stored data was unreadable and an empty ledger was substituted.
    pub notice: Option<CorruptStateError>,
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn recovered(&self) -> bool {
        self.notice.is_some()
    }
}

/// A mutation that has been applied in memory, plus the result of persisting it.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub persisted: Result<(), PersistError>,
}

impl<T> Outcome<T> {
    pub fn warning(&self) -> Option<&PersistError> {
        self.persisted.as_ref().err()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Reads a ledger from `storage`, never failing.
///
/// Absent data yields an empty ledger. Unreadable data also yields an empty ledger,
/// with the reason recorded in the report and, when `preserve_corrupt` is set, the
/// original content moved aside first.
pub fn load_ledger(storage: &dyn StorageBackend, options: StoreOptions) -> (Ledger, LoadReport) {
    let mut report = LoadReport::default();
    let mut ledger = match storage.load() {
        Ok(Some(ledger)) => ledger,
        Ok(None) => {
            tracing::info!(location = %storage.describe(), "no ledger stored yet, starting empty");
            Ledger::new()
        }
        Err(mut notice) => {
            tracing::warn!(location = %notice.location, reason = %notice.reason, "ledger data unreadable, starting empty");
            if options.preserve_corrupt && notice.can_quarantine() {
                match storage.quarantine() {
                    Ok(preserved) => notice.preserved_at = preserved,
                    Err(err) => {
                        tracing::warn!(error = %err, "could not move unreadable ledger aside");
                        report
                            .warnings
                            .push(format!("could not preserve unreadable ledger: {err}"));
                    }
                }
            }
            report.notice = Some(notice);
            Ledger::new()
        }
    };

    if options.id_policy == IdPolicy::Dense && ledger.renumber() {
        tracing::warn!("stored ids were not contiguous; renumbered in order");
        report
            .warnings
            .push("transaction ids were not contiguous and have been renumbered".into());
    }

    tracing::debug!(transactions = ledger.len(), "ledger loaded");
    (ledger, report)
}

/// Session owner of the ledger: assigns ids, mutates, and persists after every change.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    ids: IdSequence,
}

impl LedgerStore {
    /// Loads the ledger held by `storage` and takes ownership of both.
    pub fn load(storage: Box<dyn StorageBackend>, options: StoreOptions) -> (Self, LoadReport) {
        let (ledger, report) = load_ledger(storage.as_ref(), options);
        let recorded = match options.id_policy {
            IdPolicy::Stable => storage.load_id_mark().unwrap_or(0),
            IdPolicy::Dense => 0,
        };
        let ids = IdSequence::resume(options.id_policy, &ledger, recorded);
        (
            Self {
                ledger,
                storage,
                ids,
            },
            report,
        )
    }

    /// Convenience for the JSON file backend.
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> (Self, LoadReport) {
        Self::load(Box::new(JsonFileStorage::new(path)), options)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Id the next successful `add` will receive.
    pub fn next_id(&self) -> u64 {
        self.ids.peek(&self.ledger)
    }

    /// Writes the full ledger to the backing store, replacing what was there.
    /// Under the stable policy the highest issued id is recorded as well.
    pub fn persist(&self) -> Result<(), PersistError> {
        let result = self.storage.save(&self.ledger).and_then(|()| {
            if self.ids.policy() == IdPolicy::Stable {
                self.storage.save_id_mark(self.ids.last_issued())
            } else {
                Ok(())
            }
        });
        match result {
            Ok(()) => {
                tracing::debug!(
                    location = %self.storage.describe(),
                    transactions = self.ledger.len(),
                    "ledger persisted"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(location = %self.storage.describe(), error = %err, "could not save ledger");
                Err(err)
            }
        }
    }

    /// Records a transaction stamped with the current local time.
    pub fn add(
        &mut self,
        amount: f64,
        category: &str,
        kind: TransactionKind,
        description: &str,
    ) -> Result<Outcome<Transaction>, ValidationError> {
        let entry = NewTransaction::new(amount, category, kind, description);
        let transaction =
            TransactionService::add(&mut self.ledger, &mut self.ids, entry, now_local())?;
        tracing::debug!(id = transaction.id, kind = %transaction.kind, amount = transaction.amount, "transaction recorded");
        Ok(Outcome {
            value: transaction,
            persisted: self.persist(),
        })
    }

    /// Removes the transaction with `id`. The returned copy keeps its original id.
    pub fn delete(&mut self, id: u64) -> Result<Outcome<Transaction>, NotFoundError> {
        let removed = TransactionService::remove(&mut self.ledger, self.ids.policy(), id)?;
        tracing::debug!(id, kind = %removed.kind, amount = removed.amount, "transaction deleted");
        Ok(Outcome {
            value: removed,
            persisted: self.persist(),
        })
    }
}
