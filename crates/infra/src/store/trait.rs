use thiserror::Error;

use minimart_inventory::Inventory;

/// Product store operation error.
///
/// These are **infrastructure errors** (file access, encoding, malformed rows) as
/// opposed to domain errors raised by inventory rules.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A persisted row is missing required fields or holds unparsable values.
    /// Loading aborts; rows are never skipped.
    #[error("malformed row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

/// Persistent home of the current product list.
///
/// `save` is a full rewrite: the whole inventory is written in name order and the
/// reordered inventory is handed back as the new canonical in-memory state.
pub trait Store {
    /// Load the persisted inventory; an absent store yields an empty inventory.
    fn load(&self) -> Result<Inventory, StoreError>;

    /// Overwrite the store with `inventory`, returning it sorted by name.
    fn save(&mut self, inventory: Inventory) -> Result<Inventory, StoreError>;
}
