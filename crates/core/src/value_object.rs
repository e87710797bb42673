//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own. Two thresholds of `5` are the
/// same threshold, and two crossing events with equal fields describe the same
/// crossing. They are immutable; "changing" one means building a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
