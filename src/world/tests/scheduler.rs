//! Tests system registration and dispatch order.

use std::cell::RefCell;
use std::rc::Rc;

use super::{test_builder, test_world};
use crate::system::ForEach;
use crate::test_util::*;
use crate::{system_test, tracer, Builder, Bundle, Entity, Frame, System, World};

struct Noop;

impl System<Dims> for Noop {}

#[test]
fn test_hook_order() {
    let mut builder = test_builder();
    builder.schedule(Noop);
    builder.schedule(Noop);
    let mut world = builder.build();

    let first = world.create_entity();
    let second = world.create_entity();
    world.flush();

    let tracer = EventTracer::<Event>::new([]);
    world.execute(&tracer);

    assert_eq!(
        tracer.get_events(),
        [
            Event::StartTick(0),
            Event::Before(0),
            Event::Before(1),
            Event::Process(0, first),
            Event::Process(1, first),
            Event::Process(0, second),
            Event::Process(1, second),
            Event::After(0),
            Event::After(1),
            Event::FlushDelayed(0),
            Event::FlushPending(0),
            Event::EndTick(0),
        ]
    );
}

#[test]
fn test_entities_visited_in_materialization_order() {
    let mut world = test_world();
    world.register_system(Noop);

    let entities: Vec<_> = (0..4).map(|_| world.create_entity()).collect();
    world.flush();
    world.delete_entity(entities[1]);
    world.flush();
    let recycled = world.create_entity();
    world.flush();
    assert_eq!(recycled, entities[1]);

    let tracer = EventTracer::<Event>::new([]);
    world.execute(&tracer);

    let processed: Vec<_> = tracer
        .get_events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Process(_, entity) => Some(entity),
            _ => None,
        })
        .collect();
    assert_eq!(processed, [entities[0], entities[2], entities[3], recycled]);
}

/// Counts the hook invocations of a system.
#[derive(Default)]
struct Counter {
    enabled:   bool,
    inits:     usize,
    befores:   usize,
    processed: Vec<Entity>,
    afters:    usize,
}

impl System<Dims> for Counter {
    fn enabled(&self) -> bool { self.enabled }

    fn init(&mut self, world: &World<Dims>) {
        assert_eq!(world.globals(), &Dims::default());
        self.inits += 1;
    }

    fn before(&mut self, _: &mut Frame<'_, Dims>) { self.befores += 1; }

    fn process(&mut self, _: &mut Frame<'_, Dims>, entity: Entity) { self.processed.push(entity); }

    fn after(&mut self, _: &mut Frame<'_, Dims>) { self.afters += 1; }
}

#[test]
fn test_disabled_system_still_runs_hooks() {
    let mut world = test_world();
    let id = world.register_system(Counter { enabled: true, ..Counter::default() });

    let entity = world.create_entity();
    world.flush();

    world.tick();
    world.system_mut(id).enabled = false;
    world.tick();
    world.system_mut(id).enabled = true;
    world.tick();

    let counter = world.system_mut(id);
    assert_eq!(counter.inits, 1);
    assert_eq!(counter.befores, 3);
    assert_eq!(counter.afters, 3);
    assert_eq!(counter.processed, [entity, entity]);
}

/// Records the entities having both `Position` and `Velocity`.
struct Movers(Rc<RefCell<Vec<Entity>>>);

impl ForEach<Dims> for Movers {
    type Query = (Position, Velocity);

    fn process(
        &mut self,
        _: &mut Frame<'_, Dims>,
        entity: Entity,
        (_, velocity): (&Position, &Velocity),
    ) {
        assert_eq!(velocity.dx, 2.0);
        self.0.borrow_mut().push(entity);
    }
}

#[test]
fn test_requirements_filter_entities() {
    let visited = Rc::new(RefCell::new(Vec::new()));

    let mut world = test_world();
    world.register_each(Movers(Rc::clone(&visited)));

    let still = world.create_entity();
    world.add_component::<Position>(still);
    let moving = world.create_entity();
    world.add_component::<Position>(moving);
    world.add_component::<Velocity>(moving).dx = 2.0;
    let ghost = world.create_entity();
    world.add_component::<Velocity>(ghost).dx = 2.0;
    world.flush();

    world.tick();
    assert_eq!(*visited.borrow(), [moving]);

    world.delete_component::<Velocity>(moving);
    world.add_component::<Position>(ghost);
    world.tick();
    assert_eq!(*visited.borrow(), [moving, ghost]);
}

/// Requires a kind that no test world registers.
struct Orphan(Rc<RefCell<usize>>);

impl ForEach<Dims> for Orphan {
    type Query = (Position, Unregistered);

    fn before(&mut self, _: &mut Frame<'_, Dims>) { *self.0.borrow_mut() += 1; }

    fn process(&mut self, _: &mut Frame<'_, Dims>, _: Entity, _: (&Position, &Unregistered)) {
        unreachable!("no entity can have an unregistered component")
    }
}

#[test]
fn test_unregistered_requirement_never_dispatches() {
    let befores = Rc::new(RefCell::new(0));

    let mut world = test_world();
    world.register_each(Orphan(Rc::clone(&befores)));

    let entity = world.create_entity();
    world.add_component::<Position>(entity);
    world.flush();

    world.tick();
    assert_eq!(*befores.borrow(), 1);
}

#[test]
fn test_log_tracer() {
    let mut world = test_world();
    world.register_system(Noop);
    world.create_entity();

    world.execute(&tracer::Log(log::Level::Trace));
    world.execute(&tracer::Aggregate((tracer::Log(log::Level::Debug), tracer::Noop)));
    assert_eq!(world.ticks_elapsed(), 2);
}

#[test]
fn test_aggregate_tracer_dispatches_to_all() {
    let mut world = test_world();
    world.register_system(Noop);

    let first = EventTracer::<Event>::new([]);
    let second = EventTracer::new([(Event::FlushDelayed(0), Event::FlushPending(0))]);
    world.execute(&tracer::Aggregate((&first, &second)));

    assert_eq!(first.get_events(), second.get_events());
}

#[test]
fn test_system_test_macro() {
    let world: World<Dims> = system_test!(Dims::default(); Position, Velocity; Noop, Noop);
    assert_eq!(world.registry().len(), 2);
    assert_eq!(world.system_count(), 2);
}

/// Moves every entity with a `Position` to the right.
struct Shift;

impl ForEach<Dims> for Shift {
    type Query = (Position,);

    fn process(&mut self, frame: &mut Frame<'_, Dims>, entity: Entity, _: (&Position,)) {
        frame.update::<Position>(entity, |position| position.x += 1.0);
    }
}

struct Particles {
    count: usize,
}

impl Bundle<Dims> for Particles {
    fn register(&self, builder: &mut Builder<Dims>) {
        builder.component::<Position>();
        builder.schedule_each(Shift);
    }

    fn populate(&self, world: &mut World<Dims>) {
        for _ in 0..self.count {
            let entity = world.create_entity();
            world.add_component::<Position>(entity);
        }
    }
}

#[test]
fn test_new_from_bundles() {
    init();

    let mut world = crate::new(Dims::default(), [&Particles { count: 3 } as &dyn Bundle<Dims>]);
    assert_eq!(world.entity_count(), 0);

    world.tick();
    assert_eq!(world.entity_count(), 3);
    world.tick();
    assert!(world.iter::<Position>().all(|(_, position)| position.x == 1.0));
}
