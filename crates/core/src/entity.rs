//! Entity trait: things that are told apart by identity.

/// Anything stored in a collection and addressed by id.
///
/// Spots are immutable once created, so identity is the only thing that
/// distinguishes two spots saved at the same place with the same name.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
