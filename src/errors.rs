use chrono::NaiveDate;
use thiserror::Error;

use crate::ledger::TransactionId;

/// Rejections produced while normalizing raw caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount may only contain digits and a decimal point")]
    NonNumeric,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount cannot have more than 2 decimal places")]
    TooManyDecimals,
    #[error("invalid date format, expected YYYY-MM-DD")]
    BadDateFormat,
    #[error("year must be 4 digits")]
    BadYear,
    #[error("date cannot be in the future")]
    FutureDate,
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("transaction type must be `Income` or `Expense`, got `{0}`")]
    InvalidType(String),
}

/// Failures raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),
    #[error("category `{0}` not found")]
    CategoryNotFound(String),
    #[error("category `{0}` already exists")]
    CategoryAlreadyExists(String),
    #[error("category `{0}` is referenced by existing transactions")]
    CategoryInUse(String),
    #[error("start date {start} must be before end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
