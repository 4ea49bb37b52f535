//! Value object trait: equality by value, not identity.
//!
//! Party details and tax breakdowns are value objects: two sellers with the
//! same name, address and registration are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are compared by their attribute values and are replaced as a
/// whole rather than mutated in place by callers.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
