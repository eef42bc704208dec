//! Operations queued during a tick and applied after all systems have run.

use std::any::Any;

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

use super::World;
use crate::comp::{self, KindId};
use crate::entity::Ealloc;
use crate::{Entity, Error};

/// An operation applied in enqueue order at the start of a flush.
pub(crate) enum Delayed<G> {
    /// Replaces the component of an entity, if it still has one.
    Set { entity: Entity, kind: KindId, value: Box<dyn Any> },
    /// Binds a tag name to an entity.
    Tag { name: String, entity: Entity },
    /// Unbinds a tag name.
    Untag { name: String },
    /// Runs an arbitrary mutation against the world.
    Run(Box<dyn FnOnce(&mut World<G>)>),
}

/// The structural change requested for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    /// The entity id is reserved and becomes live at the flush.
    Create,
    /// Components of a live entity are attached or detached at the flush.
    Edit,
    /// The entity is removed at the flush.
    Delete,
}

/// A pending structural operation together with the components it stages.
pub(crate) struct Pending {
    pub(crate) op:    Op,
    pub(crate) comps: comp::Map,
}

impl Pending {
    fn new(op: Op) -> Self { Self { op, comps: comp::Map::default() } }
}

/// Stores the operations recorded since the last flush.
pub(crate) struct Buffer<G> {
    pub(crate) delayed: Vec<Delayed<G>>,
    /// Structural operations keyed by the entity they apply to,
    /// in the order the entities were first touched.
    pub(crate) pending: IndexMap<Entity, Pending>,
}

impl<G> Default for Buffer<G> {
    fn default() -> Self { Self { delayed: Vec::new(), pending: IndexMap::new() } }
}

impl<G> Buffer<G> {
    /// Reserves an entity id and opens its creation bundle.
    pub(crate) fn create_entity(&mut self, ealloc: &mut Ealloc) -> Entity {
        let entity = ealloc.allocate();
        self.pending.insert(entity, Pending::new(Op::Create));
        log::debug!("Requested creation of entity {entity}");
        entity
    }

    /// Cancels the creation of a pending entity or requests the removal of a live one.
    pub(crate) fn delete_entity(
        &mut self,
        ealloc: &mut Ealloc,
        live: &IndexSet<Entity>,
        entity: Entity,
    ) {
        match self.pending.get_mut(&entity) {
            Some(Pending { op: Op::Create, .. }) => {
                self.pending.shift_remove(&entity);
                ealloc.queue_deallocate(entity);
                log::debug!("Cancelled creation of entity {entity}");
            }
            Some(pending) if pending.op == Op::Edit => *pending = Pending::new(Op::Delete),
            Some(_) => {}
            None if live.contains(&entity) => {
                self.pending.insert(entity, Pending::new(Op::Delete));
                log::debug!("Requested deletion of entity {entity}");
            }
            None => {
                log::warn!("Cannot delete entity {entity}, which is neither alive nor pending creation")
            }
        }
    }

    /// Stages a component for a pending or live entity.
    ///
    /// # Panics
    /// Panics if the entity is neither alive nor pending.
    pub(crate) fn attach<C: 'static>(
        &mut self,
        live: &IndexSet<Entity>,
        entity: Entity,
        kind: KindId,
        value: C,
    ) -> &mut C {
        let pending = match self.pending.entry(entity) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                if !live.contains(&entity) {
                    panic!("{}", Error::NotAlive { entity });
                }
                entry.insert(Pending::new(Op::Edit))
            }
        };
        pending.comps.attach(kind, value)
    }

    /// Stages the removal of a component from a pending or live entity.
    pub(crate) fn detach(
        &mut self,
        live: &IndexSet<Entity>,
        entity: Entity,
        kind: KindId,
        comp_name: &str,
    ) {
        match self.pending.get_mut(&entity) {
            Some(Pending { op: Op::Create, comps }) => {
                comps.remove(kind);
            }
            Some(Pending { op: Op::Edit, comps }) => comps.detach(kind),
            Some(_) => {}
            None if live.contains(&entity) => {
                let mut pending = Pending::new(Op::Edit);
                pending.comps.detach(kind);
                self.pending.insert(entity, pending);
            }
            None => log::warn!(
                "Cannot delete component `{comp_name}` from entity {entity}, which is neither \
                 alive nor pending creation"
            ),
        }
    }

    /// The creation bundle of an entity that has not materialized yet.
    pub(crate) fn creation_mut(&mut self, entity: Entity) -> Option<&mut comp::Map> {
        match self.pending.get_mut(&entity) {
            Some(Pending { op: Op::Create, comps }) => Some(comps),
            _ => None,
        }
    }

    /// The staged component of an entity, if one is to be attached at the flush.
    pub(crate) fn staged_mut(&mut self, entity: Entity, kind: KindId) -> Option<&mut Box<dyn Any>> {
        match self.pending.get_mut(&entity) {
            Some(Pending { op: Op::Create | Op::Edit, comps }) => comps.slot_mut(kind),
            _ => None,
        }
    }

    /// The staged component of an entity downcast to `C`.
    pub(crate) fn staged_comp_mut<C: 'static>(
        &mut self,
        entity: Entity,
        kind: KindId,
    ) -> Option<&mut C> {
        self.staged_mut(entity, kind).map(|slot| slot.downcast_mut().expect("TypeId mismatch"))
    }

    /// Whether no operation is queued.
    pub(crate) fn is_empty(&self) -> bool { self.delayed.is_empty() && self.pending.is_empty() }
}
