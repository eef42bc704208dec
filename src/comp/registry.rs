use std::any::{self, TypeId};

use bitvec::prelude::BitVec;
use indexmap::map::Entry;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::storage::AnyStorage;
use crate::{Comp, Error};

/// The dense identifier of a registered component kind.
///
/// Kind ids are assigned in registration order starting from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindId(usize);

impl KindId {
    /// The position of this kind in the registry.
    pub fn index(self) -> usize { self.0 }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self { Self(index) }
}

struct KindSpec {
    name:            &'static str,
    storage_builder: fn() -> Box<dyn AnyStorage>,
}

fn new_storage<C: Comp>() -> Box<dyn AnyStorage> { Box::new(C::Storage::default()) }

/// The static table of component kinds known to a world.
#[derive(Default)]
pub struct Registry {
    kinds: IndexMap<TypeId, KindSpec>,
}

impl Registry {
    /// Registers a component kind.
    ///
    /// # Panics
    /// Panics if the kind is already registered.
    pub(crate) fn register<C: Comp>(&mut self) -> KindId {
        let index = self.kinds.len();
        match self.kinds.entry(TypeId::of::<C>()) {
            Entry::Occupied(_) => {
                panic!("Component kind `{}` is registered twice", any::type_name::<C>())
            }
            Entry::Vacant(entry) => {
                entry.insert(KindSpec {
                    name:            any::type_name::<C>(),
                    storage_builder: new_storage::<C>,
                });
            }
        }
        KindId(index)
    }

    /// Returns the kind id of `C`, or `None` if `C` is not registered.
    pub fn kind_of<C: Comp>(&self) -> Option<KindId> {
        self.kinds.get_index_of(&TypeId::of::<C>()).map(KindId)
    }

    /// Returns the kind id of `C`, or an error if `C` is not registered.
    pub fn try_kind_of<C: Comp>(&self) -> Result<KindId, Error> {
        self.kind_of::<C>().ok_or(Error::UnregisteredComp { name: any::type_name::<C>() })
    }

    /// Returns the kind id of `C`.
    ///
    /// # Panics
    /// Panics if `C` is not registered.
    pub(crate) fn expect_kind<C: Comp>(&self) -> KindId {
        match self.try_kind_of::<C>() {
            Ok(kind) => kind,
            Err(err) => panic!("{err}"),
        }
    }

    /// The type name of a registered kind.
    pub fn name(&self, kind: KindId) -> &'static str {
        let (_, spec) = self.kinds.get_index(kind.0).expect("kind id from another registry");
        spec.name
    }

    /// The number of registered kinds.
    pub fn len(&self) -> usize { self.kinds.len() }

    /// Whether no kinds are registered.
    pub fn is_empty(&self) -> bool { self.kinds.is_empty() }

    /// Lists the kind names in a signature, for diagnostics.
    pub fn describe(&self, signature: &Signature) -> String {
        signature.iter().map(|kind| self.name(kind)).join(", ")
    }

    /// Allocates one empty storage per kind, indexed by kind id.
    pub(crate) fn build_storages(&self) -> Vec<Box<dyn AnyStorage>> {
        self.kinds.values().map(|spec| (spec.storage_builder)()).collect()
    }
}

/// A set of component kinds.
///
/// Every entity has the signature of the kinds attached to it,
/// and every system has the signature of the kinds it requires.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    bits: BitVec,
}

impl Signature {
    /// Adds a kind to the set.
    pub fn insert(&mut self, kind: KindId) {
        if self.bits.len() <= kind.0 {
            self.bits.resize(kind.0 + 1, false);
        }
        self.bits.set(kind.0, true);
    }

    /// Removes a kind from the set.
    pub fn remove(&mut self, kind: KindId) {
        if kind.0 < self.bits.len() {
            self.bits.set(kind.0, false);
        }
    }

    /// Whether the set contains a kind.
    pub fn contains(&self, kind: KindId) -> bool {
        match self.bits.get(kind.0) {
            Some(bit) => *bit,
            None => false,
        }
    }

    /// Whether every kind in `self` is also in `other`.
    pub fn is_subset(&self, other: &Signature) -> bool {
        self.bits.iter_ones().all(|index| other.contains(KindId(index)))
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool { self.bits.not_any() }

    /// The number of kinds in the set.
    pub fn len(&self) -> usize { self.bits.count_ones() }

    /// Iterates over the kinds in the set in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = KindId> + '_ { self.bits.iter_ones().map(KindId) }

    /// Removes all kinds from the set.
    pub fn clear(&mut self) { self.bits.clear(); }
}

impl FromIterator<KindId> for Signature {
    fn from_iter<I: IntoIterator<Item = KindId>>(iter: I) -> Self {
        let mut signature = Self::default();
        for kind in iter {
            signature.insert(kind);
        }
        signature
    }
}

#[cfg(test)]
mod tests;
