//! Systems are actions performed every tick to manipulate entities and components.
//!
//! A system may implement any of the hooks of [`System`]:
//! [`before`](System::before) and [`after`](System::after) run once per tick,
//! while [`process`](System::process) runs once per live entity
//! whose attached kinds include the [requirements](System::requirements) of the system.
//!
//! Systems that only care about a fixed set of component kinds
//! can implement [`ForEach`] instead,
//! which fetches the components of each matching entity through a [`Query`].

use std::any::{self, Any};
use std::marker::PhantomData;

use crate::comp::{Registry, Signature};
use crate::world::{Frame, World};
use crate::Entity;

pub mod query;
pub use query::Query;

/// A unit of simulation logic scheduled in a [`World`].
///
/// Every hook receives the world explicitly.
/// During a tick, the world is only observable through a [`Frame`],
/// which reads the state as of the start of the tick
/// and records mutations to be applied after all systems have run.
///
/// The type parameter `G` is the type of the world globals.
#[allow(unused_variables)]
pub trait System<G>: 'static {
    /// Describes this system in logs and tracers.
    fn debug_name(&self) -> String { any::type_name::<Self>().to_string() }

    /// The component kinds an entity must have to be [processed](Self::process).
    ///
    /// Called once when the system is registered.
    /// Returns `None` if the system requires a kind that is not registered in the world,
    /// in which case the system never processes any entity.
    /// Defaults to the empty set, which matches every entity.
    fn requirements(&self, registry: &Registry) -> Option<Signature> {
        Some(Signature::default())
    }

    /// Whether the system processes entities in the current tick.
    ///
    /// A disabled system still runs its [`before`](Self::before) and [`after`](Self::after) hooks.
    fn enabled(&self) -> bool { true }

    /// Called once when the system is registered in the world.
    fn init(&mut self, world: &World<G>) {}

    /// Called at the start of every tick, before any entity is processed.
    fn before(&mut self, frame: &mut Frame<'_, G>) {}

    /// Called once per tick for every live entity matching the requirements.
    fn process(&mut self, frame: &mut Frame<'_, G>, entity: Entity) {}

    /// Called at the end of every tick, after all entities are processed.
    fn after(&mut self, frame: &mut Frame<'_, G>) {}
}

/// Object-safe access to a boxed system with its concrete type recoverable.
pub(crate) trait AnySystem<G>: System<G> {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<G, S: System<G>> AnySystem<G> for S {
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// Identifies a system registered in a world.
///
/// Returned by [`World::register_system`] and [`Builder::schedule`](crate::Builder::schedule),
/// and used to access the system again through [`World::system_mut`].
pub struct SystemId<S> {
    pub(crate) index: usize,
    _ph:              PhantomData<fn() -> S>,
}

impl<S> SystemId<S> {
    pub(crate) fn new(index: usize) -> Self { Self { index, _ph: PhantomData } }

    /// The position of the system in the schedule.
    pub fn index(&self) -> usize { self.index }
}

impl<S> Clone for SystemId<S> {
    fn clone(&self) -> Self { *self }
}

impl<S> Copy for SystemId<S> {}

/// A system that processes every entity having all components in [`Self::Query`].
///
/// Register it with [`World::register_each`] or [`Builder::schedule_each`](crate::Builder::schedule_each),
/// which wrap it in [`Each`].
#[allow(unused_variables)]
pub trait ForEach<G>: 'static {
    /// The tuple of component kinds fetched for each entity.
    type Query: Query;

    /// Describes this system in logs and tracers.
    fn debug_name(&self) -> String { any::type_name::<Self>().to_string() }

    /// See [`System::enabled`].
    fn enabled(&self) -> bool { true }

    /// See [`System::init`].
    fn init(&mut self, world: &World<G>) {}

    /// See [`System::before`].
    fn before(&mut self, frame: &mut Frame<'_, G>) {}

    /// Processes an entity with the components fetched from the pre-tick state.
    fn process(
        &mut self,
        frame: &mut Frame<'_, G>,
        entity: Entity,
        comps: <Self::Query as Query>::Item<'_>,
    );

    /// See [`System::after`].
    fn after(&mut self, frame: &mut Frame<'_, G>) {}
}

/// Adapts a [`ForEach`] into a [`System`].
pub struct Each<S>(
    /// The wrapped system.
    pub S,
);

impl<G: 'static, S: ForEach<G>> System<G> for Each<S> {
    fn debug_name(&self) -> String { self.0.debug_name() }

    fn requirements(&self, registry: &Registry) -> Option<Signature> {
        <S::Query as Query>::signature(registry)
    }

    fn enabled(&self) -> bool { self.0.enabled() }

    fn init(&mut self, world: &World<G>) { self.0.init(world) }

    fn before(&mut self, frame: &mut Frame<'_, G>) { self.0.before(frame) }

    fn process(&mut self, frame: &mut Frame<'_, G>, entity: Entity) {
        let state = frame.state();
        if let Some(comps) = <S::Query as Query>::fetch(&state.components, entity) {
            self.0.process(frame, entity, comps);
        }
    }

    fn after(&mut self, frame: &mut Frame<'_, G>) { self.0.after(frame) }
}
