//! `minimart-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no file formats).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::Aggregate;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductCode;
pub use value_object::{Price, ValueObject};
