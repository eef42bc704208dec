use std::any::Any;
use std::mem;

use indexmap::{IndexMap, IndexSet};

use crate::comp::{KindId, Registry, Signature};
use crate::storage::AnyStorage;
use crate::{Comp, Entity, Storage};

/// Stores the component states in a world.
///
/// Systems observe this through [`Frame`](super::Frame) during a tick,
/// so it always reflects the state as of the start of the tick.
pub struct Components {
    registry:   Registry,
    /// One storage per kind, indexed by [`KindId`].
    storages:   Vec<Box<dyn AnyStorage>>,
    /// The kinds attached to each entity, indexed by entity id.
    signatures: Vec<Signature>,
}

impl Components {
    pub(crate) fn new(registry: Registry) -> Self {
        let storages = registry.build_storages();
        Self { registry, storages, signatures: Vec::new() }
    }

    /// The kinds registered in the world.
    pub fn registry(&self) -> &Registry { &self.registry }

    /// Returns the storage of `C`, or `None` if `C` is not registered.
    pub fn storage<C: Comp>(&self) -> Option<&C::Storage> {
        let kind = self.registry.kind_of::<C>()?;
        let storage = self.storages[kind.index()].as_any();
        Some(storage.downcast_ref::<C::Storage>().expect("TypeId mismatch"))
    }

    pub(crate) fn storage_mut<C: Comp>(&mut self, kind: KindId) -> &mut C::Storage {
        let storage = self.storages[kind.index()].as_any_mut();
        storage.downcast_mut::<C::Storage>().expect("TypeId mismatch")
    }

    /// Gets the component of an entity.
    ///
    /// Returns `None` if `C` is not registered or the entity does not have it.
    pub fn get<C: Comp>(&self, entity: Entity) -> Option<&C> { self.storage::<C>()?.get(entity) }

    pub(crate) fn get_mut<C: Comp>(&mut self, entity: Entity) -> Option<&mut C> {
        let kind = self.registry.kind_of::<C>()?;
        self.storage_mut::<C>(kind).get_mut(entity)
    }

    /// Iterates over all components of kind `C` in entity id order.
    ///
    /// Yields nothing if `C` is not registered.
    pub fn iter<C: Comp>(&self) -> impl Iterator<Item = (Entity, &C)> + '_ {
        self.storage::<C>().into_iter().flat_map(|storage| storage.iter())
    }

    /// Whether the entity has a component of the kind.
    pub fn contains(&self, kind: KindId, entity: Entity) -> bool {
        self.storages[kind.index()].contains(entity)
    }

    /// The number of entities with a component of the kind.
    pub fn cardinality(&self, kind: KindId) -> usize { self.storages[kind.index()].cardinality() }

    /// Whether the kinds attached to the entity include all kinds in `required`.
    pub fn matches(&self, entity: Entity, required: &Signature) -> bool {
        match self.signatures.get(entity.usize()) {
            Some(attached) => required.is_subset(attached),
            None => required.is_empty(),
        }
    }

    /// The kinds attached to the entity.
    pub fn signature(&self, entity: Entity) -> Signature {
        self.signatures.get(entity.usize()).cloned().unwrap_or_default()
    }

    fn signature_mut(&mut self, entity: Entity) -> &mut Signature {
        let index = entity.usize();
        if self.signatures.len() <= index {
            self.signatures.resize_with(index + 1, Signature::default);
        }
        &mut self.signatures[index]
    }

    pub(crate) fn insert<C: Comp>(&mut self, kind: KindId, entity: Entity, value: C) -> &mut C {
        self.signature_mut(entity).insert(kind);
        let storage = self.storage_mut::<C>(kind);
        storage.set(entity, Some(value));
        storage.get_mut(entity).expect("component was just inserted")
    }

    pub(crate) fn install(&mut self, kind: KindId, entity: Entity, value: Box<dyn Any>) {
        self.signature_mut(entity).insert(kind);
        self.storages[kind.index()].install(entity, value);
    }

    pub(crate) fn remove(&mut self, kind: KindId, entity: Entity) -> bool {
        if let Some(signature) = self.signatures.get_mut(entity.usize()) {
            signature.remove(kind);
        }
        self.storages[kind.index()].remove(entity)
    }

    /// Removes every component of the entity.
    pub(crate) fn clear_entity(&mut self, entity: Entity) {
        let signature = match self.signatures.get_mut(entity.usize()) {
            Some(signature) => mem::take(signature),
            None => return,
        };
        for kind in signature.iter() {
            self.storages[kind.index()].remove(entity);
        }
    }
}

/// The world state visible to systems during a tick.
pub(crate) struct State<G> {
    pub(crate) components: Components,
    /// Live entities in materialization order.
    pub(crate) live:       IndexSet<Entity>,
    pub(crate) tags:       IndexMap<String, Entity>,
    pub(crate) globals:    G,
}

impl<G> State<G> {
    pub(crate) fn new(registry: Registry, globals: G) -> Self {
        Self {
            components: Components::new(registry),
            live: IndexSet::new(),
            tags: IndexMap::new(),
            globals,
        }
    }
}
