//! Exposes testing, profiling and tracing capabilities.

use crate::Entity;

/// A tracer used for recording the events throughout a tick.
///
/// Can be used for profiling and testing.
/// All methods default to doing nothing.
#[allow(unused_variables)]
pub trait Tracer {
    /// A tick starts. `tick` counts the ticks completed before this one.
    fn start_tick(&self, tick: u64) {}

    /// A tick ends after all deferred operations are flushed.
    fn end_tick(&self, tick: u64) {}

    /// The pre-pass hook of a system is about to run.
    fn run_before(&self, system: usize, debug_name: &str) {}

    /// A system is about to process an entity matching its requirements.
    fn process_entity(&self, system: usize, debug_name: &str, entity: Entity) {}

    /// The post-pass hook of a system is about to run.
    fn run_after(&self, system: usize, debug_name: &str) {}

    /// The delayed operations recorded during the tick are about to be applied.
    fn flush_delayed(&self, count: usize) {}

    /// The pending structural operations are about to be applied.
    fn flush_pending(&self, count: usize) {}
}

impl<T: Tracer + ?Sized> Tracer for &T {
    fn start_tick(&self, tick: u64) { (**self).start_tick(tick) }

    fn end_tick(&self, tick: u64) { (**self).end_tick(tick) }

    fn run_before(&self, system: usize, debug_name: &str) {
        (**self).run_before(system, debug_name)
    }

    fn process_entity(&self, system: usize, debug_name: &str, entity: Entity) {
        (**self).process_entity(system, debug_name, entity)
    }

    fn run_after(&self, system: usize, debug_name: &str) { (**self).run_after(system, debug_name) }

    fn flush_delayed(&self, count: usize) { (**self).flush_delayed(count) }

    fn flush_pending(&self, count: usize) { (**self).flush_pending(count) }
}

/// An empty tracer.
pub struct Noop;

impl Tracer for Noop {}

/// A tracer that logs all events.
pub struct Log(
    /// The log level to log events with.
    pub log::Level,
);

impl Tracer for Log {
    fn start_tick(&self, tick: u64) { log::log!(self.0, "Tick {tick} started") }

    fn end_tick(&self, tick: u64) { log::log!(self.0, "Tick {tick} ended") }

    fn run_before(&self, system: usize, debug_name: &str) {
        log::log!(self.0, "Running `before` of system #{system} ({debug_name})")
    }

    fn process_entity(&self, system: usize, debug_name: &str, entity: Entity) {
        log::log!(self.0, "System #{system} ({debug_name}) processes entity {entity}")
    }

    fn run_after(&self, system: usize, debug_name: &str) {
        log::log!(self.0, "Running `after` of system #{system} ({debug_name})")
    }

    fn flush_delayed(&self, count: usize) {
        log::log!(self.0, "Applying {count} delayed operations")
    }

    fn flush_pending(&self, count: usize) {
        log::log!(self.0, "Applying structural operations of {count} entities")
    }
}

/// Groups multiple tracers into a tuple and dispatches each call to them in serial.
pub struct Aggregate<T>(
    /// A tuple of child tracers to execute in serial.
    pub T,
);

macro_rules! impl_aggregate {
    ($($ty:ident $field:tt),+) => {
        impl<$($ty: Tracer),+> Tracer for Aggregate<($($ty,)+)> {
            fn start_tick(&self, tick: u64) { $(self.0.$field.start_tick(tick);)+ }

            fn end_tick(&self, tick: u64) { $(self.0.$field.end_tick(tick);)+ }

            fn run_before(&self, system: usize, debug_name: &str) {
                $(self.0.$field.run_before(system, debug_name);)+
            }

            fn process_entity(&self, system: usize, debug_name: &str, entity: Entity) {
                $(self.0.$field.process_entity(system, debug_name, entity);)+
            }

            fn run_after(&self, system: usize, debug_name: &str) {
                $(self.0.$field.run_after(system, debug_name);)+
            }

            fn flush_delayed(&self, count: usize) { $(self.0.$field.flush_delayed(count);)+ }

            fn flush_pending(&self, count: usize) { $(self.0.$field.flush_pending(count);)+ }
        }
    };
}

impl_aggregate!(T1 0);
impl_aggregate!(T1 0, T2 1);
impl_aggregate!(T1 0, T2 1, T3 2);
impl_aggregate!(T1 0, T2 1, T3 2, T4 3);
