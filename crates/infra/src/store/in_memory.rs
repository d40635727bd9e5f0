use minimart_inventory::Inventory;

use super::r#trait::{Store, StoreError};

/// In-memory product store.
///
/// Intended for tests/dev. Keeps the last saved snapshot and counts rewrites.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Option<Inventory>,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-persisted inventory.
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self {
            snapshot: Some(inventory),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&Inventory> {
        self.snapshot.as_ref()
    }

    /// Number of full rewrites performed so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Store for InMemoryStore {
    fn load(&self) -> Result<Inventory, StoreError> {
        Ok(self.snapshot.clone().unwrap_or_default())
    }

    fn save(&mut self, inventory: Inventory) -> Result<Inventory, StoreError> {
        let sorted = inventory.into_sorted();
        self.snapshot = Some(sorted.clone());
        self.saves += 1;
        Ok(sorted)
    }
}
