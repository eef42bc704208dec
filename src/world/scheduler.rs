use super::offline::Buffer;
use super::state::State;
use super::Frame;
use crate::comp::{Registry, Signature};
use crate::entity::Ealloc;
use crate::system::{AnySystem, System};
use crate::Tracer;

/// The ordered list of systems in a world.
///
/// Systems are only ever appended; their order is the execution order.
pub(crate) struct Scheduler<G> {
    entries: Vec<Entry<G>>,
}

struct Entry<G> {
    debug_name:   String,
    /// `None` if the system requires a kind that is not registered.
    requirements: Option<Signature>,
    system:       Box<dyn AnySystem<G>>,
}

impl<G> Default for Scheduler<G> {
    fn default() -> Self { Self { entries: Vec::new() } }
}

impl<G: 'static> Scheduler<G> {
    /// Appends a system, returning its index.
    pub(crate) fn push(&mut self, system: Box<dyn AnySystem<G>>, registry: &Registry) -> usize {
        let debug_name = system.debug_name();
        let requirements = system.requirements(registry);

        match &requirements {
            Some(required) => log::debug!(
                "Scheduled system {debug_name} requiring [{}]",
                registry.describe(required)
            ),
            None => log::warn!(
                "System {debug_name} requires a component kind that is not registered in this \
                 world, so it never processes any entity"
            ),
        }

        let index = self.entries.len();
        self.entries.push(Entry { debug_name, requirements, system });
        index
    }

    /// Gets a system by index.
    ///
    /// # Panics
    /// Panics if the system at `index` is not of type `S`.
    pub(crate) fn get_mut<S: System<G>>(&mut self, index: usize) -> &mut S {
        let entry = &mut self.entries[index];
        entry.system.as_any_mut().downcast_mut::<S>().expect("TypeId mismatch")
    }

    /// The number of scheduled systems.
    pub(crate) fn len(&self) -> usize { self.entries.len() }

    /// Runs the hooks of all systems over the live entities.
    ///
    /// Mutations are recorded into `buffer` and not applied here.
    pub(crate) fn execute(
        &mut self,
        tracer: &impl Tracer,
        state: &State<G>,
        ealloc: &mut Ealloc,
        buffer: &mut Buffer<G>,
    ) {
        let mut frame = Frame::new(state, ealloc, buffer);

        for (index, entry) in self.entries.iter_mut().enumerate() {
            tracer.run_before(index, &entry.debug_name);
            entry.system.before(&mut frame);
        }

        for &entity in &state.live {
            for (index, entry) in self.entries.iter_mut().enumerate() {
                if !entry.system.enabled() {
                    continue;
                }
                let Some(required) = &entry.requirements else { continue };
                if !state.components.matches(entity, required) {
                    continue;
                }

                tracer.process_entity(index, &entry.debug_name, entity);
                entry.system.process(&mut frame, entity);
            }
        }

        for (index, entry) in self.entries.iter_mut().enumerate() {
            tracer.run_after(index, &entry.debug_name);
            entry.system.after(&mut frame);
        }
    }
}
