use std::any::Any;
use std::collections::btree_map;
use std::collections::BTreeMap;

use super::KindId;

/// A type-erased bundle of component changes keyed by kind.
///
/// `Some` entries are components to attach.
/// `None` entries are detachments, only meaningful for entities that are already live.
/// This type is only used to stage changes, never as the actual storage.
#[derive(Default)]
pub(crate) struct Map {
    map: BTreeMap<KindId, Option<Box<dyn Any>>>,
}

impl Map {
    /// Stages a component, replacing any staged change of the same kind.
    pub(crate) fn attach<C: 'static>(&mut self, kind: KindId, value: C) -> &mut C {
        let slot = self.map.entry(kind).or_insert(None).insert(Box::new(value));
        slot.downcast_mut().expect("TypeId mismatch")
    }

    /// Stages the removal of a component from a live entity.
    pub(crate) fn detach(&mut self, kind: KindId) { self.map.insert(kind, None); }

    /// Discards any staged change of the kind.
    pub(crate) fn remove(&mut self, kind: KindId) -> bool { self.map.remove(&kind).is_some() }

    /// Gets the staged component of the kind, if one is to be attached.
    pub(crate) fn slot_mut(&mut self, kind: KindId) -> Option<&mut Box<dyn Any>> {
        self.map.get_mut(&kind).and_then(Option::as_mut)
    }

    /// Gets the staged component of the kind downcast to `C`.
    pub(crate) fn get_mut<C: 'static>(&mut self, kind: KindId) -> Option<&mut C> {
        self.slot_mut(kind).map(|slot| slot.downcast_mut().expect("TypeId mismatch"))
    }

    /// The number of staged changes.
    pub(crate) fn len(&self) -> usize { self.map.len() }
}

impl IntoIterator for Map {
    type Item = (KindId, Option<Box<dyn Any>>);
    type IntoIter = btree_map::IntoIter<KindId, Option<Box<dyn Any>>>;

    fn into_iter(self) -> Self::IntoIter { self.map.into_iter() }
}
