//! Product store boundary.
//!
//! Persists the full product list as a whole-file snapshot. The CSV backend is
//! the production store; the in-memory one backs tests.

pub mod csv;
pub mod in_memory;
pub mod r#trait;

pub use self::csv::{CsvStore, STORE_HEADER};
pub use in_memory::InMemoryStore;
pub use r#trait::{Store, StoreError};
