//! Pure validation helpers that normalize raw caller input into canonical
//! forms. Nothing here touches ledger state or performs I/O.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::errors::ValidationError;
use crate::ledger::TransactionKind;
use crate::money::Money;

/// Parses a raw amount string into exact cents.
///
/// Anything other than ASCII digits and a single decimal point is rejected,
/// zero comes before the fractional-digit rule, and at most two fractional
/// digits are accepted.
pub fn validate_amount(raw: &str) -> Result<Money, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(ValidationError::NonNumeric);
    }
    let (integral, fraction) = match raw.split_once('.') {
        Some((integral, fraction)) => {
            if fraction.contains('.') {
                return Err(ValidationError::NonNumeric);
            }
            (integral, fraction)
        }
        None => (raw, ""),
    };
    if integral.is_empty() && fraction.is_empty() {
        return Err(ValidationError::NonNumeric);
    }
    if integral.chars().chain(fraction.chars()).all(|c| c == '0') {
        return Err(ValidationError::NotPositive);
    }
    if fraction.len() > 2 {
        return Err(ValidationError::TooManyDecimals);
    }

    let units: i64 = if integral.is_empty() {
        0
    } else {
        integral.parse().map_err(|_| ValidationError::NonNumeric)?
    };
    let sub_units: i64 = match fraction.len() {
        0 => 0,
        1 => 10 * fraction.parse::<i64>().map_err(|_| ValidationError::NonNumeric)?,
        _ => fraction.parse().map_err(|_| ValidationError::NonNumeric)?,
    };
    let cents = units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(sub_units))
        .ok_or(ValidationError::NonNumeric)?;
    Ok(Money::from_cents(cents))
}

/// Validates a `YYYY-MM-DD` date string and returns the canonical
/// (zero-padded) calendar date. Dates after `today` are rejected.
pub fn validate_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return Err(ValidationError::BadDateFormat);
    }
    if parts[0].len() != 4 || !parts[0].bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::BadYear);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::BadDateFormat)?;
    if date > today {
        return Err(ValidationError::FutureDate);
    }
    Ok(date)
}

/// Checks that `name` is part of the known category set.
pub fn validate_category(name: &str, known: &BTreeSet<String>) -> Result<(), ValidationError> {
    if known.contains(name) {
        Ok(())
    } else {
        Err(ValidationError::UnknownCategory(name.to_string()))
    }
}

/// Parses a transaction type, accepting exactly `Income` or `Expense`.
pub fn validate_kind(raw: &str) -> Result<TransactionKind, ValidationError> {
    match raw {
        "Income" => Ok(TransactionKind::Income),
        "Expense" => Ok(TransactionKind::Expense),
        other => Err(ValidationError::InvalidType(other.to_string())),
    }
}
