//! A storage is the data structure where components of the same kind for all entities are stored.

use std::any::Any;

use crate::Entity;

mod vec;
pub use vec::VecStorage as Vec;

mod tree;
pub use tree::Tree;


/// A storage for storing component data.
///
/// A storage is a partial map from [`Entity`] to component values.
/// Implementations must return the same value from [`get`](Self::get) and [`get_mut`](Self::get_mut)
/// for the same entity,
/// and [`iter`](Self::iter) must yield entities in ascending id order.
pub trait Storage: Default + 'static {
    /// The component type stored.
    type Comp: 'static;

    /// Gets a shared reference to the component for a specific entity if it is present.
    fn get(&self, entity: Entity) -> Option<&Self::Comp>;

    /// Gets a mutable reference to the component for a specific entity if it is present.
    fn get_mut(&mut self, entity: Entity) -> Option<&mut Self::Comp>;

    /// Sets or removes the component for a specific entity,
    /// returning the original value if it was present.
    fn set(&mut self, entity: Entity, value: Option<Self::Comp>) -> Option<Self::Comp>;

    /// Returns the number of components that exist in this storage.
    fn cardinality(&self) -> usize;

    /// Return value of [`iter`](Self::iter).
    type Iter<'t>: Iterator<Item = (Entity, &'t Self::Comp)>
    where
        Self: 't;
    /// Returns an immutable iterator over the storage, ordered by entity id.
    fn iter(&self) -> Self::Iter<'_>;
}

/// Object-safe view of a [`Storage`] with its component type erased.
///
/// The world keeps one of these per registered kind, indexed by [`KindId`](crate::comp::KindId).
pub(crate) trait AnyStorage {
    /// Whether the entity has a component in this storage.
    fn contains(&self, entity: Entity) -> bool;

    /// Inserts a boxed component, replacing any existing one.
    ///
    /// # Panics
    /// Panics if `value` is not of the stored component type.
    fn install(&mut self, entity: Entity, value: Box<dyn Any>);

    /// Removes the component of the entity, returning whether it was present.
    fn remove(&mut self, entity: Entity) -> bool;

    fn cardinality(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: Storage> AnyStorage for S {
    fn contains(&self, entity: Entity) -> bool { self.get(entity).is_some() }

    fn install(&mut self, entity: Entity, value: Box<dyn Any>) {
        let value = value.downcast::<S::Comp>().expect("TypeId mismatch");
        self.set(entity, Some(*value));
    }

    fn remove(&mut self, entity: Entity) -> bool { self.set(entity, None).is_some() }

    fn cardinality(&self) -> usize { Storage::cardinality(self) }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}
