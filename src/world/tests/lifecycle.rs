//! Tests entity creation, deletion and id recycling.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{test_builder, test_world};
use crate::test_util::*;
use crate::{Entity, Error};

#[test]
fn test_created_entity_materializes_at_flush() {
    let mut world = test_world();

    let entity = world.create_entity();
    world.add_component::<Position>(entity).x = 3.0;

    assert!(world.is_pending_creation(entity));
    assert!(!world.is_alive(entity));
    assert_eq!(world.component::<Position>(entity), None);
    assert_eq!(world.entity_count(), 0);

    world.tick();

    assert!(!world.is_pending_creation(entity));
    assert!(world.is_alive(entity));
    assert_eq!(world.component::<Position>(entity), Some(&Position { x: 3.0, y: 0.0 }));
    assert_eq!(world.entity_count(), 1);
    assert_eq!(world.entities().collect::<Vec<_>>(), [entity]);
}

#[test]
fn test_add_component_round_trip() {
    let mut world = test_world();

    let entity = world.create_entity();
    world.tick();

    let radius = *world.add_component::<Radius>(entity);
    assert_eq!(radius, Radius(1.0));
    assert_eq!(world.component::<Radius>(entity), Some(&Radius(1.0)));

    world.delete_component::<Radius>(entity);
    assert_eq!(world.component::<Radius>(entity), None);
    assert!(world.components().signature(entity).is_empty());
}

#[test]
fn test_delete_component_from_creation_bundle() {
    let mut world = test_world();

    let entity = world.create_entity();
    world.add_component::<Position>(entity);
    world.add_component::<Velocity>(entity);
    world.delete_component::<Velocity>(entity);
    world.tick();

    assert!(world.component::<Position>(entity).is_some());
    assert_eq!(world.component::<Velocity>(entity), None);
}

#[test]
fn test_create_then_delete_same_tick() {
    let mut world = test_world();

    let entity = world.create_entity();
    world.add_component::<Position>(entity);
    world.delete_entity(entity);

    for _ in 0..3 {
        world.tick();
        assert!(!world.is_alive(entity));
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.component::<Position>(entity), None);
    }

    let recycled = world.create_entity();
    assert_eq!(recycled, entity, "the cancelled id is recycled after the flush");
    world.tick();
    assert!(world.is_alive(recycled));
    assert_eq!(world.component::<Position>(recycled), None);
}

#[test]
fn test_deleted_entity_is_cleared_and_recycled() {
    let mut world = test_world();

    let entity = world.create_entity();
    world.add_component::<Position>(entity);
    world.add_component::<Marker>(entity);
    world.tick();

    world.delete_entity(entity);
    assert!(world.is_alive(entity), "deletion is deferred until the flush");

    world.tick();
    assert!(!world.is_alive(entity));
    assert_eq!(world.component::<Position>(entity), None);
    assert_eq!(world.component::<Marker>(entity), None);
    assert_eq!(world.components().storage::<Marker>().map(crate::Storage::cardinality), Some(0));

    let recycled = world.create_entity();
    assert_eq!(recycled, entity);
    world.add_component::<Velocity>(recycled);
    world.tick();
    assert_eq!(world.component::<Position>(recycled), None, "a recycled id starts empty");
    assert!(world.component::<Velocity>(recycled).is_some());
}

#[test]
fn test_delete_twice_is_noop() {
    let mut world = test_world();

    let first = world.create_entity();
    let second = world.create_entity();
    world.tick();

    world.delete_entity(first);
    world.delete_entity(first);
    world.tick();
    world.delete_entity(first);
    world.tick();

    assert_eq!(world.entities().collect::<Vec<_>>(), [second]);
    assert_eq!(world.ealloc().recyclable().collect::<Vec<_>>(), [first]);
}

#[test]
fn test_ids_unique_and_disjoint_from_pool() {
    let mut world = test_world();
    let mut rng = StdRng::seed_from_u64(0x7ec);

    for _ in 0..64 {
        for _ in 0..rng.gen_range(0..8) {
            let entity = world.create_entity();
            world.add_component::<Position>(entity);
        }

        let live: Vec<Entity> = world.entities().collect();
        for entity in live {
            if rng.gen_bool(0.3) {
                world.delete_entity(entity);
            }
        }

        world.tick();

        let live: BTreeSet<u32> = world.entities().map(Entity::id).collect();
        assert_eq!(live.len(), world.entity_count(), "live ids must be unique");

        let pool: BTreeSet<u32> = world.ealloc().recyclable().map(Entity::id).collect();
        assert!(live.is_disjoint(&pool));
        assert_eq!(
            live.union(&pool).copied().collect::<Vec<_>>(),
            (0..world.ealloc().max_id()).collect::<Vec<_>>(),
        );

        for &id in &live {
            assert!(world.component::<Position>(Entity::from_id(id)).is_some());
        }
    }
}

#[test]
fn test_component_of_unregistered_kind_is_none() {
    let mut world = test_world();
    let entity = world.create_entity();
    world.tick();

    assert!(world.component::<Unregistered>(entity).is_none());
    assert_eq!(world.iter::<Unregistered>().count(), 0);
}

#[test]
#[should_panic = "Component kind `tickec::test_util::Unregistered` is not registered in this world"]
fn test_delete_unregistered_component() {
    let mut world = test_world();
    let entity = world.create_entity();
    world.tick();

    world.delete_component::<Unregistered>(entity);
}

#[test]
fn test_try_delete_unregistered_component() {
    let mut world = test_world();
    let entity = world.create_entity();

    assert_eq!(
        world.try_delete_component::<Unregistered>(entity),
        Err(Error::UnregisteredComp { name: "tickec::test_util::Unregistered" }),
    );
    assert_eq!(world.try_delete_component::<Position>(entity), Ok(()));
}

#[test]
fn test_delete_component_from_removed_entity() {
    let mut world = test_world();
    let entity = world.create_entity();
    world.add_component::<Position>(entity);
    world.flush();
    world.delete_entity(entity);
    world.flush();

    let far = Entity::from_id(u32::MAX - 1);
    assert_eq!(world.try_delete_component::<Position>(far), Err(Error::NotAlive { entity: far }));
    assert_eq!(
        world.try_delete_component::<Position>(entity),
        Err(Error::NotAlive { entity }),
    );

    world.delete_component::<Position>(far);
    assert_eq!(world.entity_count(), 0);
    assert_eq!(world.iter::<Position>().count(), 0);
}

#[test]
#[should_panic = "Component kind `tickec::test_util::Unregistered` is not registered in this world"]
fn test_add_unregistered_component() {
    let mut world = test_world();
    let entity = world.create_entity();
    world.add_component::<Unregistered>(entity);
}

#[test]
#[should_panic = "Entity #5 is neither alive nor pending creation"]
fn test_add_component_to_unknown_entity() {
    let mut world = test_world();
    world.add_component::<Position>(Entity::from_id(5));
}

#[test]
#[should_panic = "Component kind `tickec::test_util::Position` is registered twice"]
fn test_register_twice() {
    let mut builder = test_builder();
    builder.component::<Position>();
}
