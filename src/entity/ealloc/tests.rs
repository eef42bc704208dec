use super::Ealloc;
use crate::test_util;

#[test]
fn test_allocate_fresh_in_order() {
    let mut ealloc = Ealloc::default();

    let ids: Vec<_> = (0..4).map(|_| ealloc.allocate().id()).collect();
    assert_eq!(ids, [0, 1, 2, 3]);
    assert_eq!(ealloc.max_id(), 4);
}

#[test]
fn test_realloc_freed_after_flush() {
    test_util::init();

    let mut ealloc = Ealloc::default();
    let alloc1: Vec<_> = (0..5).map(|_| ealloc.allocate()).collect();

    ealloc.queue_deallocate(alloc1[3]);
    ealloc.queue_deallocate(alloc1[1]);
    assert_eq!(ealloc.allocate().id(), 5, "freed ids must not be reused before flush");

    ealloc.flush();
    log::trace!("deallocated, ealloc state = {ealloc:?}");

    assert_eq!(ealloc.allocate(), alloc1[3], "recycled ids are reused oldest first");
    assert_eq!(ealloc.allocate(), alloc1[1], "recycled ids are reused oldest first");
    assert_eq!(ealloc.allocate().id(), 6, "gauge resumes once the pool is empty");
    assert_eq!(ealloc.max_id(), 7);
}

#[test]
fn test_recyclable_disjoint_from_allocated() {
    let mut ealloc = Ealloc::default();
    let allocated: Vec<_> = (0..3).map(|_| ealloc.allocate()).collect();
    ealloc.queue_deallocate(allocated[0]);
    ealloc.flush();

    let recyclable: Vec<_> = ealloc.recyclable().collect();
    assert_eq!(recyclable, [allocated[0]]);

    let reused = ealloc.allocate();
    assert_eq!(reused, allocated[0]);
    assert_eq!(ealloc.recyclable().count(), 0);
}
