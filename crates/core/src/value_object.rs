//! Value objects: equality by value, not identity.

use core::str::FromStr;

use crate::error::DomainError;

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To "modify"
/// one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Largest price accepted, in cents. Keeps float-to-integer conversion exact.
const MAX_CENTS: u64 = 1_000_000_000_000_000;

/// Non-negative unit price with fixed two-decimal precision.
///
/// Stored as an integer number of cents; rendered as `units.cc` with no currency symbol.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(u64);

impl ValueObject for Price {}

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    /// Parses plain decimal text (`"2"`, `"1.5"`, `"0.99"`), rounding to the nearest cent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let value: f64 = text
            .parse()
            .map_err(|_| DomainError::parse(format!("'{text}' is not a valid price")))?;

        if !value.is_finite() {
            return Err(DomainError::parse(format!("'{text}' is not a valid price")));
        }
        if value < 0.0 {
            return Err(DomainError::parse("price cannot be negative"));
        }

        let cents = (value * 100.0).round();
        if cents > MAX_CENTS as f64 {
            return Err(DomainError::validation(format!("price '{text}' is too large")));
        }
        Ok(Self(cents as u64))
    }
}
