//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attributes
/// are interchangeable. [`Money`](crate::Money) and [`TimeOfDay`](crate::TimeOfDay)
/// are the value objects of this workspace; records such as cheques are
/// [`Entity`](crate::Entity) types instead.
///
/// Value objects are immutable. To "modify" one, build a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
