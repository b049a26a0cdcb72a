//! The collaborator surface: validated mutations that persist, and read-only
//! queries that never do.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::errors::LedgerError;
use crate::ledger::{Ledger, Transaction, TransactionId, TransactionPatch};
use crate::money::Money;
use crate::query::TransactionFilter;
use crate::report::{self, PeriodReport, RangeSummary};
use crate::storage::StorageBackend;
use crate::utils;
use crate::validation;

/// Raw, unvalidated field updates for a transaction, as supplied by the
/// presentation layer. Only set fields are validated and applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionChanges<'a> {
    pub amount: Option<&'a str>,
    pub category: Option<&'a str>,
    pub date: Option<&'a str>,
    pub kind: Option<&'a str>,
}

/// Owns the in-memory ledger and its persistence backend.
///
/// Every mutation validates its input, applies the change, and overwrites the
/// persisted document. When a save fails the in-memory mutation is kept and
/// the store is flagged unsynced; the error is returned so the caller can
/// surface it. Reads never touch storage.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    synced: bool,
}

impl LedgerStore {
    /// Opens the store, loading the persisted ledger or starting fresh.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self, LedgerError> {
        let ledger = storage.load_or_default()?;
        tracing::debug!(
            transactions = ledger.transactions().len(),
            "ledger loaded"
        );
        Ok(Self {
            ledger,
            storage,
            synced: true,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        self.ledger.categories()
    }

    /// False while the in-memory state is ahead of the persisted document
    /// after a failed save.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Validates and records a new transaction, returning its identifier.
    pub fn add_transaction(
        &mut self,
        amount: &str,
        category: &str,
        date: &str,
        kind: &str,
        source: &str,
    ) -> Result<TransactionId, LedgerError> {
        let amount = validation::validate_amount(amount)?;
        validation::validate_category(category, self.ledger.categories())?;
        let kind = validation::validate_kind(kind)?;
        let date = validation::validate_date(date, utils::today())?;

        let id = self
            .ledger
            .insert(amount, category.to_string(), date, kind, source.to_string());
        tracing::debug!(id, %amount, %kind, "transaction recorded");
        self.persist()?;
        Ok(id)
    }

    /// Validates the supplied fields and applies them to the transaction
    /// identified by `id`.
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        changes: TransactionChanges<'_>,
    ) -> Result<(), LedgerError> {
        let mut patch = TransactionPatch::default();
        if let Some(raw) = changes.amount {
            patch.amount = Some(validation::validate_amount(raw)?);
        }
        if let Some(raw) = changes.category {
            validation::validate_category(raw, self.ledger.categories())?;
            patch.category = Some(raw.to_string());
        }
        if let Some(raw) = changes.date {
            patch.date = Some(validation::validate_date(raw, utils::today())?);
        }
        if let Some(raw) = changes.kind {
            patch.kind = Some(validation::validate_kind(raw)?);
        }
        self.ledger.amend(id, patch)?;
        tracing::debug!(id, "transaction updated");
        self.persist()
    }

    /// Deletes the transaction identified by `id`, returning the removed
    /// record.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let removed = self.ledger.remove(id)?;
        tracing::debug!(id, "transaction deleted");
        self.persist()?;
        Ok(removed)
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), LedgerError> {
        self.ledger.add_category(name)?;
        self.persist()
    }

    pub fn remove_category(&mut self, name: &str) -> Result<(), LedgerError> {
        self.ledger.remove_category(name)?;
        self.persist()
    }

    /// Transactions matching every supplied predicate, in insertion order.
    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.ledger.filter(filter)
    }

    /// Ad-hoc summary over `[start, end]`; rejects `start >= end`.
    pub fn summarize(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangeSummary, LedgerError> {
        report::summarize(&self.ledger, start, end)
    }

    /// Report over the trailing week ending today.
    pub fn weekly_summary(&self) -> PeriodReport {
        report::weekly_report(&self.ledger, utils::today())
    }

    /// Report over the current calendar month through today.
    pub fn monthly_summary(&self) -> PeriodReport {
        report::monthly_report(&self.ledger, utils::today())
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        match self.storage.save(&self.ledger) {
            Ok(()) => {
                self.synced = true;
                Ok(())
            }
            Err(err) => {
                self.synced = false;
                tracing::warn!(error = %err, "ledger save failed, in-memory state ahead of disk");
                Err(err.into())
            }
        }
    }
}
