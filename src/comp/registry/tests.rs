use super::{KindId, Registry, Signature};
use crate::test_util::{Position, Radius, Velocity};
use crate::Error;

#[test]
fn test_kinds_in_registration_order() {
    let mut registry = Registry::default();
    assert_eq!(registry.register::<Velocity>(), KindId(0));
    assert_eq!(registry.register::<Position>(), KindId(1));

    assert_eq!(registry.kind_of::<Position>(), Some(KindId(1)));
    assert_eq!(registry.kind_of::<Radius>(), None);
    assert_eq!(registry.len(), 2);
    assert!(registry.name(KindId(0)).ends_with("Velocity"));
}

#[test]
fn test_try_kind_of_unregistered() {
    let registry = Registry::default();
    match registry.try_kind_of::<Radius>() {
        Err(Error::UnregisteredComp { name }) => assert!(name.ends_with("Radius")),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
#[should_panic = "is registered twice"]
fn test_register_twice() {
    let mut registry = Registry::default();
    registry.register::<Position>();
    registry.register::<Position>();
}

#[test]
fn test_signature_subset() {
    let required: Signature = [KindId(1), KindId(3)].into_iter().collect();
    let mut attached: Signature = [KindId(0), KindId(1)].into_iter().collect();
    assert!(!required.is_subset(&attached));

    attached.insert(KindId(3));
    assert!(required.is_subset(&attached));
    assert!(Signature::default().is_subset(&attached), "the empty signature matches everything");
    assert!(Signature::default().is_subset(&Signature::default()));

    attached.remove(KindId(1));
    assert!(!required.is_subset(&attached));
    assert_eq!(attached.iter().collect::<Vec<_>>(), [KindId(0), KindId(3)]);
    assert_eq!(attached.len(), 2);

    attached.clear();
    assert!(attached.is_empty());
}

#[test]
fn test_describe() {
    let mut registry = Registry::default();
    let velocity = registry.register::<Velocity>();
    let position = registry.register::<Position>();

    let description = registry.describe(&[position, velocity].into_iter().collect());
    let names: Vec<_> = description.split(", ").collect();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("Velocity"));
    assert!(names[1].ends_with("Position"));
}
