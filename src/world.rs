//! The world stores the states of the simulation.

use std::{any, mem};

use indexmap::IndexMap;

use crate::comp::Registry;
use crate::entity::Ealloc;
use crate::system::{AnySystem, Each, ForEach, SystemId};
use crate::{tracer, Comp, Entity, Error, System, Tracer};

mod builder;
pub use builder::Builder;

mod frame;
pub use frame::Frame;

pub(crate) mod offline;
use offline::{Buffer, Delayed, Op, Pending};

mod scheduler;
use scheduler::Scheduler;

mod state;
pub(crate) use state::State;
pub use state::Components;

#[cfg(test)]
mod tests;

/// A bundle encapsulates the component kinds and systems for a specific feature.
/// This can be used by library crates to expose their features as a single API.
pub trait Bundle<G> {
    /// Registers component kinds and schedules the systems used by this bundle.
    fn register(&self, _builder: &mut Builder<G>) {}

    /// Populates the world with entities.
    fn populate(&self, _world: &mut World<G>) {}
}

/// Creates a world from bundles.
///
/// All bundles are registered in order before any of them populates the world.
pub fn new<'t, G: 'static>(
    globals: G,
    bundles: impl IntoIterator<Item = &'t dyn Bundle<G>> + Copy,
) -> World<G> {
    let mut builder = Builder::new(globals);

    for bundle in bundles {
        bundle.register(&mut builder);
    }

    let mut world = builder.build();

    for bundle in bundles {
        bundle.populate(&mut world);
    }

    world
}

/// The data structure that stores all states in the simulation.
///
/// Between ticks, the world can be inspected and mutated directly through `&mut World`.
/// During a tick, systems access it through a [`Frame`].
pub struct World<G> {
    /// The state observed by systems during a tick.
    state:     State<G>,
    /// Allocates entity ids.
    ealloc:    Ealloc,
    /// Operations recorded since the last flush.
    buffer:    Buffer<G>,
    /// The systems in execution order.
    scheduler: Scheduler<G>,
    /// The number of completed ticks.
    ticks:     u64,
}

impl<G: 'static> World<G> {
    pub(crate) fn new(registry: Registry, globals: G) -> Self {
        Self {
            state:     State::new(registry, globals),
            ealloc:    Ealloc::default(),
            buffer:    Buffer::default(),
            scheduler: Scheduler::default(),
            ticks:     0,
        }
    }

    /// Registers a system after all existing systems.
    ///
    /// [`System::init`] is called once before the system is appended.
    pub fn register_system<S: System<G>>(&mut self, system: S) -> SystemId<S> {
        SystemId::new(self.register_boxed(Box::new(system)))
    }

    /// Registers a [`ForEach`] system after all existing systems.
    pub fn register_each<S: ForEach<G>>(&mut self, system: S) -> SystemId<Each<S>> {
        self.register_system(Each(system))
    }

    pub(crate) fn register_boxed(&mut self, mut system: Box<dyn AnySystem<G>>) -> usize {
        system.init(self);
        self.scheduler.push(system, self.state.components.registry())
    }

    /// Gets a registered system.
    pub fn system_mut<S: System<G>>(&mut self, id: SystemId<S>) -> &mut S {
        self.scheduler.get_mut::<S>(id.index)
    }

    /// The number of registered systems.
    pub fn system_count(&self) -> usize { self.scheduler.len() }

    /// Runs one tick: all systems, then all deferred operations.
    pub fn tick(&mut self) { self.execute(&tracer::Noop) }

    /// Runs one tick, reporting its events to `tracer`.
    pub fn execute(&mut self, tracer: &impl Tracer) {
        tracer.start_tick(self.ticks);
        self.scheduler.execute(tracer, &self.state, &mut self.ealloc, &mut self.buffer);
        self.flush_with(tracer);
        tracer.end_tick(self.ticks);
        self.ticks += 1;
    }

    /// Applies all deferred operations without running any system.
    pub fn flush(&mut self) { self.flush_with(&tracer::Noop) }

    fn flush_with(&mut self, tracer: &impl Tracer) {
        // operations delayed by these closures run in the next flush
        let delayed = mem::take(&mut self.buffer.delayed);
        tracer.flush_delayed(delayed.len());
        for op in delayed {
            self.apply_delayed(op);
        }

        let pending = mem::take(&mut self.buffer.pending);
        tracer.flush_pending(pending.len());
        for (entity, pending) in pending {
            self.apply_pending(entity, pending);
        }

        self.ealloc.flush();
    }

    fn apply_delayed(&mut self, op: Delayed<G>) {
        match op {
            Delayed::Set { entity, kind, value } => {
                if let Some(slot) = self.buffer.staged_mut(entity, kind) {
                    *slot = value;
                } else if self.state.components.contains(kind, entity) {
                    self.state.components.install(kind, entity, value);
                } else {
                    log::debug!(
                        "Skipped writing component `{}` to entity {entity}, which does not have it",
                        self.state.components.registry().name(kind)
                    );
                }
            }
            Delayed::Tag { name, entity } => {
                if !self.is_alive(entity) && !self.is_pending_creation(entity) {
                    log::debug!(
                        "Skipped tagging entity {entity} as {name:?}, which is neither alive nor \
                         pending creation"
                    );
                    return;
                }
                log::trace!("Tagging entity {entity} as {name:?}");
                self.state.tags.insert(name, entity);
            }
            Delayed::Untag { name } => {
                log::trace!("Untagging {name:?}");
                self.state.tags.shift_remove(&name);
            }
            Delayed::Run(f) => f(self),
        }
    }

    fn apply_pending(&mut self, entity: Entity, Pending { op, comps }: Pending) {
        match op {
            Op::Create => {
                log::trace!("Materializing entity {entity} with {} components", comps.len());
                self.state.live.insert(entity);
                for (kind, value) in comps {
                    if let Some(value) = value {
                        self.state.components.install(kind, entity, value);
                    }
                }
            }
            Op::Edit => {
                if !self.state.live.contains(&entity) {
                    log::warn!("Discarded component changes of entity {entity}, which is no longer alive");
                    return;
                }
                for (kind, value) in comps {
                    match value {
                        Some(value) => self.state.components.install(kind, entity, value),
                        None => {
                            self.state.components.remove(kind, entity);
                        }
                    }
                }
            }
            Op::Delete => {
                log::trace!("Removing entity {entity}");
                self.state.live.shift_remove(&entity);
                self.state.components.clear_entity(entity);
                self.state.tags.retain(|_, &mut bound| bound != entity);
                self.ealloc.queue_deallocate(entity);
            }
        }
    }

    /// Reserves a new entity.
    ///
    /// The entity becomes live at the next flush,
    /// with the components attached through [`add_component`](Self::add_component) until then.
    pub fn create_entity(&mut self) -> Entity { self.buffer.create_entity(&mut self.ealloc) }

    /// Requests the removal of an entity at the next flush.
    ///
    /// An entity that has not materialized yet is discarded immediately
    /// and never becomes live.
    pub fn delete_entity(&mut self, entity: Entity) {
        self.buffer.delete_entity(&mut self.ealloc, &self.state.live, entity);
    }

    /// Attaches a new component with the default value of `C`.
    ///
    /// If the entity is pending creation, the component is staged in its creation bundle.
    /// Otherwise it is inserted into the live storage immediately,
    /// replacing any existing component of the same kind.
    ///
    /// # Panics
    /// Panics if `C` is not registered or the entity is neither alive nor pending creation.
    pub fn add_component<C: Comp>(&mut self, entity: Entity) -> &mut C {
        match self.try_add_component::<C>(entity) {
            Ok(comp) => comp,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible variant of [`add_component`](Self::add_component).
    pub fn try_add_component<C: Comp>(&mut self, entity: Entity) -> Result<&mut C, Error> {
        let kind = self.state.components.registry().try_kind_of::<C>()?;

        if let Some(bundle) = self.buffer.creation_mut(entity) {
            return Ok(bundle.attach(kind, C::initial()));
        }

        if self.state.live.contains(&entity) {
            return Ok(self.state.components.insert(kind, entity, C::initial()));
        }

        Err(Error::NotAlive { entity })
    }

    /// Removes a component from an entity.
    ///
    /// If the entity is pending creation, the component is removed from its creation bundle.
    /// Otherwise it is removed from the live storage immediately.
    ///
    /// Entities that are neither alive nor pending creation are ignored with a warning.
    ///
    /// # Panics
    /// Panics if `C` is not registered.
    pub fn delete_component<C: Comp>(&mut self, entity: Entity) {
        match self.try_delete_component::<C>(entity) {
            Ok(()) => {}
            Err(Error::NotAlive { entity }) => log::warn!(
                "Cannot delete component `{}` from entity {entity}, which is neither alive nor \
                 pending creation",
                any::type_name::<C>()
            ),
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible variant of [`delete_component`](Self::delete_component).
    pub fn try_delete_component<C: Comp>(&mut self, entity: Entity) -> Result<(), Error> {
        let kind = self.state.components.registry().try_kind_of::<C>()?;

        if let Some(bundle) = self.buffer.creation_mut(entity) {
            bundle.remove(kind);
            return Ok(());
        }

        if self.state.live.contains(&entity) {
            self.state.components.remove(kind, entity);
            return Ok(());
        }

        Err(Error::NotAlive { entity })
    }

    /// Gets a component of a live entity.
    ///
    /// Returns `None` if `C` is not registered or the entity does not have it,
    /// including entities that have not materialized yet.
    pub fn component<C: Comp>(&self, entity: Entity) -> Option<&C> {
        self.state.components.get(entity)
    }

    /// Gets a component of a live entity mutably.
    pub fn component_mut<C: Comp>(&mut self, entity: Entity) -> Option<&mut C> {
        self.state.components.get_mut(entity)
    }

    /// Gets a component staged for a pending entity, or else the live component.
    pub(crate) fn staged_or_live_mut<C: Comp>(&mut self, entity: Entity) -> Option<&mut C> {
        let kind = self.state.components.registry().kind_of::<C>()?;
        if let Some(comp) = self.buffer.staged_comp_mut::<C>(entity, kind) {
            return Some(comp);
        }
        self.state.components.get_mut(entity)
    }

    /// Iterates over all components of kind `C` in entity id order.
    pub fn iter<C: Comp>(&self) -> impl Iterator<Item = (Entity, &C)> + '_ {
        self.state.components.iter::<C>()
    }

    /// Runs an arbitrary mutation against the world at the next flush.
    pub fn delay(&mut self, f: impl FnOnce(&mut World<G>) + 'static) {
        self.buffer.delayed.push(Delayed::Run(Box::new(f)));
    }

    /// Binds a tag to an entity at the next flush.
    pub fn tag(&mut self, name: impl Into<String>, entity: Entity) {
        self.buffer.delayed.push(Delayed::Tag { name: name.into(), entity });
    }

    /// Unbinds a tag at the next flush.
    pub fn untag(&mut self, name: impl Into<String>) {
        self.buffer.delayed.push(Delayed::Untag { name: name.into() });
    }

    /// The current tag bindings.
    pub fn tags(&self) -> &IndexMap<String, Entity> { &self.state.tags }

    /// The entity bound to a tag.
    pub fn tagged(&self, name: &str) -> Option<Entity> { self.state.tags.get(name).copied() }

    /// The number of live entities.
    pub fn entity_count(&self) -> usize { self.state.live.len() }

    /// Iterates over the live entities in materialization order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ { self.state.live.iter().copied() }

    /// Whether the entity is live.
    pub fn is_alive(&self, entity: Entity) -> bool { self.state.live.contains(&entity) }

    /// Whether the entity is reserved but not materialized yet.
    pub fn is_pending_creation(&self, entity: Entity) -> bool {
        matches!(self.buffer.pending.get(&entity), Some(Pending { op: Op::Create, .. }))
    }

    /// Whether any operation is waiting for the next flush.
    pub fn has_pending_ops(&self) -> bool { !self.buffer.is_empty() }

    /// The world globals.
    pub fn globals(&self) -> &G { &self.state.globals }

    /// The kinds registered in the world.
    pub fn registry(&self) -> &Registry { self.state.components.registry() }

    /// The component states.
    pub fn components(&self) -> &Components { &self.state.components }

    /// The entity id allocator.
    pub fn ealloc(&self) -> &Ealloc { &self.ealloc }

    /// The number of completed ticks.
    pub fn ticks_elapsed(&self) -> u64 { self.ticks }
}
