//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (operator input,
/// stock rules, lookups). File and storage failures belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A product with this code is already registered.
    #[error("a product with code '{0}' already exists")]
    DuplicateCode(String),

    /// No product matched the given code or selector.
    #[error("no product matches '{0}'")]
    NotFound(String),

    /// An ordinal picked from a list of matches was out of range.
    #[error("invalid choice {choice} (expected 1..={max})")]
    InvalidChoice { choice: usize, max: usize },

    /// Applying the delta would leave stock below zero.
    #[error("stock cannot go negative (current: {current}, change: {delta})")]
    NegativeStock { current: u64, delta: i64 },

    /// A requested quantity is outside what the current stock allows.
    #[error("quantity {requested} out of range (available: {available})")]
    OutOfRange { requested: i64, available: u64 },

    /// Operator input or persisted text could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A value failed validation (e.g. an empty code or name).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::NotFound(selector.into())
    }
}
