//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two coordinate
/// pairs with the same degrees are the same place, whereas two spots saved at
/// the same place are still different spots (they are entities, see
/// [`crate::Entity`]).
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Coordinates { latitude: f64, longitude: f64 }
///
/// impl ValueObject for Coordinates {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
