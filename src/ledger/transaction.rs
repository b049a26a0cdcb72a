use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Stable external identifier for a transaction. Assigned once at insertion,
/// monotonically increasing, never reused after deletes.
pub type TransactionId = u64;

/// A single income or expense entry.
///
/// Serialized field names (`type`, `index`) preserve the on-disk document
/// format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub source: String,
    #[serde(rename = "index")]
    pub id: TransactionId,
}

impl Transaction {
    /// Contribution of this transaction to the running balance.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Supported transaction directions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Partial update applied to an existing transaction. Unset fields are left
/// untouched.
#[derive(Debug, Default, Clone)]
pub struct TransactionPatch {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
}
