use std::collections::{btree_map, BTreeMap};

use super::Storage;
use crate::Entity;

/// A storage based on [`BTreeMap`].
///
/// Suitable for kinds attached to a small fraction of the entities.
pub struct Tree<C> {
    data: BTreeMap<Entity, C>,
}

impl<C> Default for Tree<C> {
    fn default() -> Self { Self { data: BTreeMap::new() } }
}

impl<C: 'static> Storage for Tree<C> {
    type Comp = C;

    fn get(&self, entity: Entity) -> Option<&C> { self.data.get(&entity) }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut C> { self.data.get_mut(&entity) }

    fn set(&mut self, entity: Entity, new: Option<C>) -> Option<C> {
        match new {
            Some(new) => self.data.insert(entity, new),
            None => self.data.remove(&entity),
        }
    }

    fn cardinality(&self) -> usize { self.data.len() }

    type Iter<'t> = Iter<'t, C>;
    fn iter(&self) -> Self::Iter<'_> { Iter(self.data.iter()) }
}

/// Return value of [`Tree::iter`].
pub struct Iter<'t, C>(btree_map::Iter<'t, Entity, C>);

impl<'t, C> Iterator for Iter<'t, C> {
    type Item = (Entity, &'t C);

    fn next(&mut self) -> Option<Self::Item> {
        let (&entity, value) = self.0.next()?;
        Some((entity, value))
    }
}

#[cfg(test)]
super::tests::test_storage!(super::Tree<i64>);
