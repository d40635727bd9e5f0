use chrono::NaiveDateTime;
use serde::Serialize;

use minimart_core::ProductCode;

/// Timestamp layout used for movement records (local wall-clock time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const NOTE_NEW_PRODUCT: &str = "new product registered";
pub const NOTE_MANUAL_UPDATE: &str = "manual update";
pub const NOTE_SALE: &str = "sale registered";

/// What kind of stock change a movement records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MovementKind {
    /// Stock coming in: a new product or a non-negative manual change.
    Entry,
    /// Stock leaving through a sale.
    Sale,
    /// Stock removed by a negative manual change.
    Adjustment,
}

impl MovementKind {
    /// Manual updates are entries unless they remove stock.
    pub fn for_manual_delta(delta: i64) -> Self {
        if delta >= 0 {
            MovementKind::Entry
        } else {
            MovementKind::Adjustment
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "Entry",
            MovementKind::Sale => "Sale",
            MovementKind::Adjustment => "Adjustment",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit record of a stock change.
///
/// `name` is a snapshot of the product name at the time of the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub occurred_at: NaiveDateTime,
    pub kind: MovementKind,
    pub code: ProductCode,
    pub name: String,
    pub quantity_delta: i64,
    pub note: String,
}

impl Movement {
    pub fn timestamp(&self) -> String {
        self.occurred_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
