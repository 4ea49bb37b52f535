//! Things with identity inside an aggregate (line items).

/// An object that keeps its identity while its fields are edited.
///
/// Ids are small `Copy` values so collections can be searched and compared
/// without borrowing the entity.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}
