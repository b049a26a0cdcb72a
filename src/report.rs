//! Aggregation of filtered transactions into income/expense summaries.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::errors::LedgerError;
use crate::ledger::{Ledger, TransactionKind};
use crate::money::Money;
use crate::query::TransactionFilter;

/// Ad-hoc range summary. Only expenses are bucketed by category; income is
/// reported as a single total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_income: Money,
    pub total_expenses: Money,
    pub expenses_by_category: BTreeMap<String, Money>,
    pub net: Money,
}

/// Weekly/monthly report. Unlike [`RangeSummary`], both income and expenses
/// are bucketed by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_income: Money,
    pub total_expenses: Money,
    pub income_by_category: BTreeMap<String, Money>,
    pub expenses_by_category: BTreeMap<String, Money>,
    pub net: Money,
}

/// Summarizes the inclusive `[start, end]` range. Every current category
/// appears in the expense buckets, zero-filled when unused.
pub fn summarize(
    ledger: &Ledger,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RangeSummary, LedgerError> {
    if start >= end {
        return Err(LedgerError::InvalidDateRange { start, end });
    }
    let mut total_income = Money::ZERO;
    let mut total_expenses = Money::ZERO;
    let mut expenses_by_category = zero_buckets(ledger);

    let window = TransactionFilter::new().since(start).until(end);
    for txn in ledger.filter(&window) {
        match txn.kind {
            TransactionKind::Income => total_income += txn.amount,
            TransactionKind::Expense => {
                total_expenses += txn.amount;
                *expenses_by_category
                    .entry(txn.category.clone())
                    .or_insert(Money::ZERO) += txn.amount;
            }
        }
    }
    Ok(RangeSummary {
        start,
        end,
        total_income,
        total_expenses,
        expenses_by_category,
        net: total_income - total_expenses,
    })
}

/// Report over the trailing week, `[reference − 7 days, reference]` inclusive.
pub fn weekly_report(ledger: &Ledger, reference: NaiveDate) -> PeriodReport {
    period_report(ledger, reference - Duration::days(7), reference)
}

/// Report from the first day of `reference`'s month through `reference`,
/// inclusive.
pub fn monthly_report(ledger: &Ledger, reference: NaiveDate) -> PeriodReport {
    let start = reference.with_day(1).unwrap_or(reference);
    period_report(ledger, start, reference)
}

fn period_report(ledger: &Ledger, start: NaiveDate, end: NaiveDate) -> PeriodReport {
    let mut total_income = Money::ZERO;
    let mut total_expenses = Money::ZERO;
    let mut income_by_category = zero_buckets(ledger);
    let mut expenses_by_category = zero_buckets(ledger);

    let window = TransactionFilter::new().since(start).until(end);
    for txn in ledger.filter(&window) {
        match txn.kind {
            TransactionKind::Income => {
                total_income += txn.amount;
                *income_by_category
                    .entry(txn.category.clone())
                    .or_insert(Money::ZERO) += txn.amount;
            }
            TransactionKind::Expense => {
                total_expenses += txn.amount;
                *expenses_by_category
                    .entry(txn.category.clone())
                    .or_insert(Money::ZERO) += txn.amount;
            }
        }
    }
    PeriodReport {
        start,
        end,
        total_income,
        total_expenses,
        income_by_category,
        expenses_by_category,
        net: total_income - total_expenses,
    }
}

fn zero_buckets(ledger: &Ledger) -> BTreeMap<String, Money> {
    ledger
        .categories()
        .iter()
        .map(|category| (category.clone(), Money::ZERO))
        .collect()
}

impl fmt::Display for RangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary from {} to {}:", self.start, self.end)?;
        writeln!(f, "Total Income: ${}", self.total_income)?;
        writeln!(f, "Total Expenses: ${}", self.total_expenses)?;
        writeln!(f, "Expenses by Category:")?;
        for (category, amount) in &self.expenses_by_category {
            writeln!(f, "  {}: ${}", category, amount)?;
        }
        write!(f, "Net Balance: ${}", self.net)
    }
}

impl fmt::Display for PeriodReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report from {} to {}:", self.start, self.end)?;
        writeln!(f, "Total Income: ${}", self.total_income)?;
        writeln!(f, "Total Expenses: ${}", self.total_expenses)?;
        writeln!(f, "Net Balance: ${}", self.net)?;
        writeln!(f, "Income by Category:")?;
        for (category, amount) in &self.income_by_category {
            writeln!(f, "  {}: ${}", category, amount)?;
        }
        writeln!(f, "Expenses by Category:")?;
        let mut lines = self.expenses_by_category.iter().peekable();
        while let Some((category, amount)) = lines.next() {
            if lines.peek().is_some() {
                writeln!(f, "  {}: ${}", category, amount)?;
            } else {
                write!(f, "  {}: ${}", category, amount)?;
            }
        }
        Ok(())
    }
}
