//! Ledger domain models and balance-consistency rules.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{default_categories, DEFAULT_CATEGORIES};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionId, TransactionKind, TransactionPatch};
