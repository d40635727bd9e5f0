use thiserror::Error;

use minimart_inventory::Movement;

/// Ledger append error.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger record could not be encoded: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only audit trail of stock movements.
pub trait Ledger {
    /// Append one record. Prior records are never touched.
    fn append(&mut self, movement: &Movement) -> Result<(), LedgerError>;
}
