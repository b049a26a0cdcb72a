use std::path::PathBuf;
use std::sync::Once;

use chrono::{Local, NaiveDate};
use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".finance_core";
const LEDGER_FILE: &str = "ledger.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("finance_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to
/// `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Canonical path of the persisted ledger document.
pub fn default_ledger_file() -> PathBuf {
    app_data_dir().join(LEDGER_FILE)
}

/// Current calendar date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
