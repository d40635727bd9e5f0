//! Entity trait: a stable identity whose attributes change over time.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Human-readable label, snapshotted into audit records at the time of a change.
    fn label(&self) -> &str;
}
