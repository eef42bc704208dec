#![allow(missing_docs)]

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use parking_lot::{Mutex, Once};

use crate::{comp, storage, Entity, Tracer};

/// Records events and ensures that they are in the correct order.
pub struct EventTracer<T: fmt::Debug + Eq + Hash> {
    dependencies: HashMap<T, Vec<T>>,
    seen:         Mutex<IndexSet<T>>,
}

impl<T: fmt::Debug + Eq + Hash> EventTracer<T> {
    /// Creates a new event tracer that ensures `b` happens after `a` for each `(a, b)` input.
    pub fn new(orders: impl IntoIterator<Item = (T, T)>) -> Self {
        let mut dependencies: HashMap<T, Vec<T>> = HashMap::new();
        for (before, after) in orders {
            dependencies.entry(after).or_default().push(before);
        }
        let seen = Mutex::new(IndexSet::new());

        Self { dependencies, seen }
    }

    /// Records that `event` has happened.
    ///
    /// # Panics
    /// Panics if the same `event` was sent twice or a dependency is not satisfied.
    pub fn trace(&self, event: T) {
        let mut seen = self.seen.lock();

        if let Some(deps) = self.dependencies.get(&event) {
            for dep in deps {
                assert!(seen.contains(dep), "{:?} should happen after {:?}", event, dep);
            }
        }

        let (index, new) = seen.insert_full(event);
        assert!(
            new,
            "{:?} is inserted twice",
            seen.get_index(index).expect("insert_full should return valid index")
        );
    }

    /// Returns the events observed in this tracer.
    pub fn get_events(self) -> Vec<T> {
        let seen = self.seen.into_inner();
        seen.into_iter().collect()
    }
}

/// Tick events recorded by an [`EventTracer`] used as a [`Tracer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    StartTick(u64),
    Before(usize),
    Process(usize, Entity),
    After(usize),
    FlushDelayed(usize),
    FlushPending(usize),
    EndTick(u64),
}

impl Tracer for EventTracer<Event> {
    fn start_tick(&self, tick: u64) { self.trace(Event::StartTick(tick)) }

    fn end_tick(&self, tick: u64) { self.trace(Event::EndTick(tick)) }

    fn run_before(&self, system: usize, _: &str) { self.trace(Event::Before(system)) }

    fn process_entity(&self, system: usize, _: &str, entity: Entity) {
        self.trace(Event::Process(system, entity))
    }

    fn run_after(&self, system: usize, _: &str) { self.trace(Event::After(system)) }

    fn flush_delayed(&self, count: usize) { self.trace(Event::FlushDelayed(count)) }

    fn flush_pending(&self, count: usize) { self.trace(Event::FlushPending(count)) }
}

pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

/// The viewport globals used by the simulations in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dims {
    pub width:  f64,
    pub height: f64,
    pub scale:  f64,
}

impl Default for Dims {
    fn default() -> Self { Self { width: 800.0, height: 600.0, scale: 10.0 } }
}

#[comp(tickec_as(crate), init = Position { x: 0.0, y: 0.0 })]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[comp(tickec_as(crate))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

#[comp(tickec_as(crate), init = Radius(1.0))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radius(pub f64);

/// A cell of an automaton, linked to its neighbours by plain ids.
#[comp(tickec_as(crate))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub alive:      bool,
    pub neighbours: Vec<Entity>,
}

/// A sparse marker kind.
#[comp(tickec_as(crate), storage = storage::Tree<Self>)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Marker;

/// A component that is deliberately never registered in test worlds.
#[comp(tickec_as(crate))]
#[derive(Debug, Default)]
pub struct Unregistered;

/// A family of distinct component kinds for benchmarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompN<const N: usize>(pub i32);

impl<const N: usize> crate::Comp for CompN<N> {
    type Storage = storage::Vec<Self>;

    fn initial() -> Self { Self(N as i32) }
}

/// Builds a world with `CompN::<1>` to `CompN::<16>` registered and no systems.
pub fn comp_n_world() -> crate::World<()> {
    crate::system_test!(();
        CompN<1>, CompN<2>, CompN<3>, CompN<4>, CompN<5>, CompN<6>, CompN<7>, CompN<8>,
        CompN<9>, CompN<10>, CompN<11>, CompN<12>, CompN<13>, CompN<14>, CompN<15>, CompN<16>;
    )
}
