use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ledger::Ledger;
use crate::utils;

use super::{Result, StorageBackend};

/// Stores the whole ledger as a single JSON document on disk.
///
/// Saves stage through a sibling temporary file and rename into place, so a
/// failed write never clobbers the previous document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend rooted at the default application data directory.
    pub fn new_default() -> Self {
        Self::new(utils::default_ledger_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load_or_default(&self) -> Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut ledger: Ledger = serde_json::from_str(&data)?;
        ledger.rebuild();
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
