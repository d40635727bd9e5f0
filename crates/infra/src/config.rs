//! Runtime configuration.

use std::path::PathBuf;

use minimart_inventory::DEFAULT_LOW_STOCK_THRESHOLD;

use crate::ledger::CsvLedger;
use crate::store::CsvStore;

pub const DEFAULT_STORE_PATH: &str = "inventory.csv";
pub const DEFAULT_LEDGER_PATH: &str = "movements.csv";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where the files live and how the session behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub ledger_path: PathBuf,
    pub low_stock_threshold: u64,
    /// Default `tracing` filter; `RUST_LOG` takes precedence when set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn store(&self) -> CsvStore {
        CsvStore::new(&self.store_path)
    }

    pub fn ledger(&self) -> CsvLedger {
        CsvLedger::new(&self.ledger_path)
    }
}
