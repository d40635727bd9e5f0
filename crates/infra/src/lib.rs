//! Infrastructure layer: CSV persistence, the movement ledger, configuration
//! and the operation pipeline that keeps them consistent.

pub mod config;
pub mod ledger;
pub mod service;
pub mod store;

pub use config::Config;
pub use ledger::{CsvLedger, InMemoryLedger, Ledger, LedgerError};
pub use service::{InventoryService, ServiceError};
pub use store::{CsvStore, InMemoryStore, Store, StoreError};

mod integration_tests;
