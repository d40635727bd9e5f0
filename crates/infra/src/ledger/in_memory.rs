use minimart_inventory::Movement;

use super::r#trait::{Ledger, LedgerError};

/// In-memory ledger.
///
/// Intended for tests/dev. Unlike the file ledger, its records can be inspected.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    movements: Vec<Movement>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }
}

impl Ledger for InMemoryLedger {
    fn append(&mut self, movement: &Movement) -> Result<(), LedgerError> {
        self.movements.push(movement.clone());
        Ok(())
    }
}
