//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances holding the same values are
/// the same value. They are immutable once constructed, so any validation
/// happens in the constructor.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
