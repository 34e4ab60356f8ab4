//! Value object marker: equality by value, no identity.

/// Marker trait for immutable values compared by their attributes.
///
/// Permissions, access criteria and endpoint descriptors are value objects: two
/// `users:delete` permissions are the same permission, and a criteria value is
/// built fresh for every check and thrown away afterwards.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
