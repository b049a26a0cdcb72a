use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category;
use super::transaction::{Transaction, TransactionId, TransactionKind, TransactionPatch};
use crate::errors::LedgerError;
use crate::money::Money;
use crate::query::TransactionFilter;

/// The ordered transaction collection, its running balance, and the category
/// set.
///
/// The balance invariant (`balance == income − expenses` over the current
/// transactions) is maintained incrementally by every mutation; `rebuild`
/// restores it once after deserialization. Serialization covers exactly the
/// three persisted fields; the id counter is derived state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    balance: Money,
    #[serde(default = "category::default_categories")]
    categories: BTreeSet<String>,
    #[serde(skip)]
    next_id: TransactionId,
}

impl Ledger {
    /// Creates an empty ledger seeded with the default categories.
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            balance: Money::ZERO,
            categories: category::default_categories(),
            next_id: 0,
        }
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Appends a validated transaction and returns its fresh identifier.
    pub fn insert(
        &mut self,
        amount: Money,
        category: String,
        date: NaiveDate,
        kind: TransactionKind,
        source: String,
    ) -> TransactionId {
        let id = self.next_id;
        self.next_id += 1;
        let txn = Transaction {
            amount,
            category,
            date,
            kind,
            source,
            id,
        };
        self.balance += txn.signed_amount();
        self.transactions.push(txn);
        id
    }

    /// Applies a patch to the transaction identified by `id`, swapping its
    /// old balance contribution for the new one in a single step.
    pub fn amend(&mut self, id: TransactionId, patch: TransactionPatch) -> Result<(), LedgerError> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        let previous = txn.signed_amount();
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(category) = patch.category {
            txn.category = category;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(kind) = patch.kind {
            txn.kind = kind;
        }
        let current = txn.signed_amount();
        self.balance += current - previous;
        Ok(())
    }

    /// Removes the transaction identified by `id`, reversing its balance
    /// contribution. Remaining ids are untouched.
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction, LedgerError> {
        let position = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        let removed = self.transactions.remove(position);
        self.balance -= removed.signed_amount();
        Ok(removed)
    }

    pub fn add_category(&mut self, name: impl Into<String>) -> Result<(), LedgerError> {
        let name = name.into();
        if self.categories.contains(&name) {
            return Err(LedgerError::CategoryAlreadyExists(name));
        }
        self.categories.insert(name);
        Ok(())
    }

    /// Removes a category. Fails while any transaction still references it.
    pub fn remove_category(&mut self, name: &str) -> Result<(), LedgerError> {
        if !self.categories.contains(name) {
            return Err(LedgerError::CategoryNotFound(name.to_string()));
        }
        if self.transactions.iter().any(|txn| txn.category == name) {
            return Err(LedgerError::CategoryInUse(name.to_string()));
        }
        self.categories.remove(name);
        Ok(())
    }

    /// Transactions matching every supplied predicate, in insertion order.
    pub fn filter<'a>(&'a self, filter: &TransactionFilter) -> Vec<&'a Transaction> {
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    /// Restores derived state after deserialization: the balance is recomputed
    /// from the transactions (a stale persisted value never wins) and the id
    /// counter resumes past the highest persisted id.
    pub fn rebuild(&mut self) {
        self.balance = self.transactions.iter().map(Transaction::signed_amount).sum();
        self.next_id = self
            .transactions
            .iter()
            .map(|txn| txn.id + 1)
            .max()
            .unwrap_or(0);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.insert(
            Money::from_cents(100_000),
            "Salary".into(),
            date(2024, 1, 1),
            TransactionKind::Income,
            "Employer".into(),
        );
        ledger.insert(
            Money::from_cents(20_050),
            "Food".into(),
            date(2024, 1, 5),
            TransactionKind::Expense,
            "Groceries".into(),
        );
        ledger
    }

    fn recomputed_balance(ledger: &Ledger) -> Money {
        ledger
            .transactions()
            .iter()
            .map(Transaction::signed_amount)
            .sum()
    }

    #[test]
    fn insert_maintains_balance_and_assigns_sequential_ids() {
        let ledger = seeded_ledger();
        assert_eq!(ledger.balance(), Money::from_cents(79_950));
        assert_eq!(ledger.balance(), recomputed_balance(&ledger));
        let ids: Vec<_> = ledger.transactions().iter().map(|txn| txn.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn amend_swaps_contribution_atomically() {
        let mut ledger = seeded_ledger();
        ledger
            .amend(
                1,
                TransactionPatch {
                    amount: Some(Money::from_cents(5_025)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(ledger.balance(), Money::from_cents(94_975));
        assert_eq!(ledger.balance(), recomputed_balance(&ledger));
    }

    #[test]
    fn amend_kind_flip_reverses_contribution() {
        let mut ledger = seeded_ledger();
        ledger
            .amend(
                1,
                TransactionPatch {
                    kind: Some(TransactionKind::Income),
                    ..Default::default()
                },
            )
            .unwrap();
        // 1000.00 + 200.50 once the expense becomes income
        assert_eq!(ledger.balance(), Money::from_cents(120_050));
        assert_eq!(ledger.balance(), recomputed_balance(&ledger));
    }

    #[test]
    fn amend_unknown_id_fails() {
        let mut ledger = seeded_ledger();
        let err = ledger
            .amend(42, TransactionPatch::default())
            .expect_err("unknown id must fail");
        assert!(matches!(err, LedgerError::TransactionNotFound(42)));
    }

    #[test]
    fn remove_reverses_contribution_and_never_reissues_ids() {
        let mut ledger = seeded_ledger();
        let removed = ledger.remove(0).unwrap();
        assert_eq!(removed.id, 0);
        assert_eq!(ledger.balance(), Money::from_cents(-20_050));
        assert_eq!(ledger.balance(), recomputed_balance(&ledger));

        let next = ledger.insert(
            Money::from_cents(100),
            "Other".into(),
            date(2024, 1, 6),
            TransactionKind::Expense,
            "Misc".into(),
        );
        assert_eq!(next, 2, "deleted ids must not be reissued");
    }

    #[test]
    fn category_removal_blocked_while_referenced() {
        let mut ledger = seeded_ledger();
        let err = ledger.remove_category("Food").expect_err("Food is in use");
        assert!(matches!(err, LedgerError::CategoryInUse(ref name) if name == "Food"));

        ledger.remove(1).unwrap();
        ledger.remove_category("Food").expect("no longer referenced");
        assert!(!ledger.categories().contains("Food"));
    }

    #[test]
    fn duplicate_and_missing_categories_are_rejected() {
        let mut ledger = Ledger::new();
        ledger.add_category("Travel").unwrap();
        let err = ledger.add_category("Travel").expect_err("duplicate");
        assert!(matches!(err, LedgerError::CategoryAlreadyExists(_)));
        let err = ledger.remove_category("Rent").expect_err("missing");
        assert!(matches!(err, LedgerError::CategoryNotFound(_)));
    }

    #[test]
    fn rebuild_recomputes_balance_and_id_counter() {
        let mut ledger = seeded_ledger();
        ledger.remove(0).unwrap();
        let json = serde_json::to_string(&ledger).unwrap();

        let mut restored: Ledger = serde_json::from_str(&json).unwrap();
        restored.rebuild();
        assert_eq!(restored.balance(), Money::from_cents(-20_050));
        let next = restored.insert(
            Money::from_cents(100),
            "Other".into(),
            date(2024, 1, 7),
            TransactionKind::Income,
            "Refund".into(),
        );
        assert_eq!(next, 2, "counter resumes past the highest persisted id");
    }
}
