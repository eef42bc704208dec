use super::Query;
use crate::comp::Registry;
use crate::test_util::*;
use crate::{comp, Builder, Entity, World};

macro_rules! define_comps {
    ($($name:ident)*) => {
        $(
            #[comp(tickec_as(crate))]
            #[derive(Debug, Default, PartialEq)]
            struct $name(u8);
        )*
    }
}

define_comps!(C0 C1 C2 C3 C4 C5 C6 C7);

fn wide_world() -> (World<()>, Entity) {
    let mut builder = Builder::new(());
    builder.component::<C0>();
    builder.component::<C1>();
    builder.component::<C2>();
    builder.component::<C3>();
    builder.component::<C4>();
    builder.component::<C5>();
    builder.component::<C6>();
    builder.component::<C7>();
    let mut world = builder.build();

    let entity = world.create_entity();
    world.add_component::<C0>(entity).0 = 0;
    world.add_component::<C1>(entity).0 = 1;
    world.add_component::<C2>(entity).0 = 2;
    world.add_component::<C3>(entity).0 = 3;
    world.add_component::<C4>(entity).0 = 4;
    world.add_component::<C5>(entity).0 = 5;
    world.add_component::<C6>(entity).0 = 6;
    world.add_component::<C7>(entity).0 = 7;
    world.flush();

    (world, entity)
}

#[test]
fn test_signature_lists_all_kinds() {
    let mut registry = Registry::default();
    let position = registry.register::<Position>();
    registry.register::<Radius>();
    let velocity = registry.register::<Velocity>();

    let signature = <(Velocity, Position)>::signature(&registry).expect("all kinds are registered");
    assert_eq!(signature.iter().collect::<Vec<_>>(), [position, velocity]);

    assert!(<()>::signature(&registry).expect("empty query").is_empty());
    assert!(<(Position, Unregistered)>::signature(&registry).is_none());
}

#[test]
fn test_fetch_requires_every_component() {
    let (mut world, entity) = wide_world();
    let components = world.components();

    let (c2, c5) = <(C2, C5)>::fetch(components, entity).expect("entity has both");
    assert_eq!((c2.0, c5.0), (2, 5));

    assert!(<()>::fetch(components, Entity::from_id(42)).is_some());
    assert!(<(C0,)>::fetch(components, Entity::from_id(42)).is_none());

    world.delete_component::<C6>(entity);
    assert!(<(C0, C6)>::fetch(world.components(), entity).is_none());
}

#[test]
fn test_fetch_eight_components() {
    let (world, entity) = wide_world();

    let (c0, c1, c2, c3, c4, c5, c6, c7) =
        <(C0, C1, C2, C3, C4, C5, C6, C7)>::fetch(world.components(), entity)
            .expect("entity has all eight");
    assert_eq!(
        [c0.0, c1.0, c2.0, c3.0, c4.0, c5.0, c6.0, c7.0],
        [0, 1, 2, 3, 4, 5, 6, 7]
    );
}
