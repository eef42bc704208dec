use std::any;

use indexmap::IndexMap;

use super::offline::{Buffer, Delayed};
use super::state::State;
use super::{Components, World};
use crate::comp::Registry;
use crate::entity::Ealloc;
use crate::{Comp, Entity};

/// The view of a world given to systems during a tick.
///
/// All reads observe the world as it was at the start of the tick.
/// All writes are recorded and only applied after every system has run:
/// delayed operations ([`set`](Self::set), [`update`](Self::update), [`delay`](Self::delay),
/// [`tag`](Self::tag), [`untag`](Self::untag)) first in the order they were requested,
/// then structural operations ([`create_entity`](Self::create_entity),
/// [`delete_entity`](Self::delete_entity), [`add_component`](Self::add_component),
/// [`delete_component`](Self::delete_component)).
pub struct Frame<'t, G> {
    state:  &'t State<G>,
    ealloc: &'t mut Ealloc,
    buffer: &'t mut Buffer<G>,
}

impl<'t, G: 'static> Frame<'t, G> {
    pub(crate) fn new(state: &'t State<G>, ealloc: &'t mut Ealloc, buffer: &'t mut Buffer<G>) -> Self {
        Self { state, ealloc, buffer }
    }

    pub(crate) fn state(&self) -> &'t State<G> { self.state }

    /// The world globals.
    pub fn globals(&self) -> &'t G { &self.state.globals }

    /// The kinds registered in the world.
    pub fn registry(&self) -> &'t Registry { self.state.components.registry() }

    /// The component states at the start of the tick.
    pub fn components(&self) -> &'t Components { &self.state.components }

    /// The number of live entities.
    pub fn entity_count(&self) -> usize { self.state.live.len() }

    /// Iterates over the live entities in materialization order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + 't { self.state.live.iter().copied() }

    /// Whether the entity was live at the start of the tick.
    pub fn is_alive(&self, entity: Entity) -> bool { self.state.live.contains(&entity) }

    /// Gets the component of an entity as of the start of the tick.
    ///
    /// Returns `None` if `C` is not registered or the entity does not have it,
    /// including entities created during this tick.
    pub fn component<C: Comp>(&self, entity: Entity) -> Option<&'t C> {
        self.state.components.get(entity)
    }

    /// Iterates over all components of kind `C` as of the start of the tick.
    pub fn iter<C: Comp>(&self) -> impl Iterator<Item = (Entity, &'t C)> + 't {
        self.state.components.iter::<C>()
    }

    /// The tag bindings as of the start of the tick.
    pub fn tags(&self) -> &'t IndexMap<String, Entity> { &self.state.tags }

    /// The entity bound to a tag as of the start of the tick.
    pub fn tagged(&self, name: &str) -> Option<Entity> { self.state.tags.get(name).copied() }

    /// Reserves a new entity.
    ///
    /// The entity becomes live at the end of this tick
    /// with the components attached through [`add_component`](Self::add_component).
    pub fn create_entity(&mut self) -> Entity { self.buffer.create_entity(self.ealloc) }

    /// Requests the removal of an entity.
    ///
    /// An entity created during this tick is discarded without ever becoming live.
    pub fn delete_entity(&mut self, entity: Entity) {
        self.buffer.delete_entity(self.ealloc, &self.state.live, entity);
    }

    /// Attaches a new component with the default value of `C`.
    ///
    /// The returned reference points into the staged component,
    /// which is installed when the structural operations are applied.
    ///
    /// # Panics
    /// Panics if `C` is not registered or the entity is neither alive nor pending creation.
    pub fn add_component<C: Comp>(&mut self, entity: Entity) -> &mut C {
        let kind = self.state.components.registry().expect_kind::<C>();
        self.buffer.attach(&self.state.live, entity, kind, C::initial())
    }

    /// Requests the removal of a component from an entity.
    ///
    /// # Panics
    /// Panics if `C` is not registered.
    pub fn delete_component<C: Comp>(&mut self, entity: Entity) {
        let kind = self.state.components.registry().expect_kind::<C>();
        self.buffer.detach(&self.state.live, entity, kind, any::type_name::<C>());
    }

    /// Replaces the component of an entity after the tick.
    ///
    /// The write is skipped if the entity no longer has the component at that point.
    /// If the entity is pending creation,
    /// the value replaces the staged component instead.
    ///
    /// # Panics
    /// Panics if `C` is not registered.
    pub fn set<C: Comp>(&mut self, entity: Entity, value: C) {
        let kind = self.state.components.registry().expect_kind::<C>();
        self.buffer.delayed.push(Delayed::Set { entity, kind, value: Box::new(value) });
    }

    /// Mutates the component of an entity in place after the tick.
    ///
    /// `f` receives the value at the time the delayed operations are applied,
    /// including the writes of earlier delayed operations.
    pub fn update<C: Comp>(&mut self, entity: Entity, f: impl FnOnce(&mut C) + 'static) {
        self.delay(move |world| match world.staged_or_live_mut::<C>(entity) {
            Some(comp) => f(comp),
            None => log::debug!(
                "Skipped updating component `{}` of entity {entity}, which does not have it",
                any::type_name::<C>()
            ),
        });
    }

    /// Runs an arbitrary mutation against the world after the tick.
    pub fn delay(&mut self, f: impl FnOnce(&mut World<G>) + 'static) {
        self.buffer.delayed.push(Delayed::Run(Box::new(f)));
    }

    /// Binds a tag to an entity, starting from the next tick.
    pub fn tag(&mut self, name: impl Into<String>, entity: Entity) {
        self.buffer.delayed.push(Delayed::Tag { name: name.into(), entity });
    }

    /// Unbinds a tag, starting from the next tick.
    pub fn untag(&mut self, name: impl Into<String>) {
        self.buffer.delayed.push(Delayed::Untag { name: name.into() });
    }
}
