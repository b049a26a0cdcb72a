pub mod json_backend;

use crate::errors::StorageError;
use crate::ledger::Ledger;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over persistence backends capable of storing ledger snapshots.
pub trait StorageBackend: Send + Sync {
    /// Loads the persisted ledger, or a default one when nothing exists yet.
    fn load_or_default(&self) -> Result<Ledger>;
    /// Overwrites the persisted document with the given ledger state.
    fn save(&self, ledger: &Ledger) -> Result<()>;
}

pub use json_backend::JsonStorage;
