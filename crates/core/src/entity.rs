//! Entity trait: identity + continuity across state changes.

/// Something with a stable identity, even when its attributes change.
///
/// A variant is still the same variant after its stock moves from 7 to 4;
/// that is what lets an evaluation compare two snapshots of it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
