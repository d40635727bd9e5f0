//! Append-only movement ledger boundary.
//!
//! The ledger is write-only from the program's point of view: records are
//! appended after every successful mutation and never read back, reordered or
//! rewritten.

pub mod csv;
pub mod in_memory;
pub mod r#trait;

pub use self::csv::{CsvLedger, LEDGER_HEADER};
pub use in_memory::InMemoryLedger;
pub use r#trait::{Ledger, LedgerError};
