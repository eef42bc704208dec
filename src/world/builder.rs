use super::World;
use crate::comp::{KindId, Registry};
use crate::system::{AnySystem, Each, ForEach, SystemId};
use crate::{Comp, System};

/// This type is used to build a world.
///
/// Component kinds can only be registered through the builder.
/// Systems scheduled here are registered in order when the world is built.
pub struct Builder<G> {
    registry: Registry,
    systems:  Vec<Box<dyn AnySystem<G>>>,
    globals:  G,
}

impl<G: 'static> Builder<G> {
    /// Creates a builder for a world with the given globals.
    pub fn new(globals: G) -> Self { Self { registry: Registry::default(), systems: Vec::new(), globals } }

    /// Registers a component kind.
    ///
    /// # Panics
    /// Panics if the kind is already registered.
    pub fn component<C: Comp>(&mut self) -> KindId { self.registry.register::<C>() }

    /// Whether a component kind is already registered.
    pub fn has_component<C: Comp>(&self) -> bool { self.registry.kind_of::<C>().is_some() }

    /// Schedules a system after all previously scheduled systems.
    pub fn schedule<S: System<G>>(&mut self, system: S) -> SystemId<S> {
        let id = SystemId::new(self.systems.len());
        self.systems.push(Box::new(system));
        id
    }

    /// Schedules a [`ForEach`] system after all previously scheduled systems.
    pub fn schedule_each<S: ForEach<G>>(&mut self, system: S) -> SystemId<Each<S>> {
        self.schedule(Each(system))
    }

    /// Constructs the world from the builder.
    ///
    /// Each scheduled system is [initialized](System::init) in order.
    pub fn build(self) -> World<G> {
        let mut world = World::new(self.registry, self.globals);
        for system in self.systems {
            world.register_boxed(system);
        }
        world
    }
}
