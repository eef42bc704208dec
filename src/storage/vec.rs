use std::mem::MaybeUninit;

use bitvec::order::Lsb0;
use bitvec::prelude::BitVec;
use bitvec::slice::IterOnes;

use super::Storage;
use crate::Entity;

/// The basic storage indexed by entity ids directly.
///
/// Memory grows with the largest entity id that ever had a component,
/// so this is the preferred storage for kinds attached to most entities.
pub struct VecStorage<C> {
    cardinality: usize,
    bits:        BitVec,
    data:        Vec<MaybeUninit<C>>,
}

impl<C> VecStorage<C> {
    fn bit(&self, index: usize) -> bool {
        match self.bits.get(index) {
            Some(bit) => *bit,
            None => false,
        }
    }

    fn set_bit(&mut self, index: usize, bit: bool) {
        if self.bits.len() <= index {
            self.bits.resize(index + 1, false);
        }

        let delta_old = match *self.bits.get(index).expect("resized len >= index+1") {
            false => 0,
            true => 1,
        };
        let delta_new = match bit {
            false => 0,
            true => 1,
        };
        self.bits.set(index, bit);

        // split into two separate statements to avoid integer underflow
        self.cardinality -= delta_old;
        self.cardinality += delta_new;
    }
}

impl<C> Default for VecStorage<C> {
    fn default() -> Self { Self { cardinality: 0, bits: BitVec::new(), data: Vec::new() } }
}

impl<C> Drop for VecStorage<C> {
    fn drop(&mut self) {
        for index in self.bits.iter_ones() {
            let value = self.data.get_mut(index).expect("bits mismatch");
            // Safety: the bit is set, so the value is initialized and dropped exactly once here.
            unsafe { value.assume_init_drop() };
        }
    }
}

impl<C: 'static> Storage for VecStorage<C> {
    type Comp = C;

    fn get(&self, entity: Entity) -> Option<&C> {
        let index = entity.usize();

        if self.bit(index) {
            let value = self.data.get(index).expect("bits mismatch");
            // Safety: the bit is set only while the value is initialized.
            Some(unsafe { value.assume_init_ref() })
        } else {
            None
        }
    }

    fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        let index = entity.usize();

        if self.bit(index) {
            let value = self.data.get_mut(index).expect("bits mismatch");
            // Safety: the bit is set only while the value is initialized.
            Some(unsafe { value.assume_init_mut() })
        } else {
            None
        }
    }

    fn set(&mut self, entity: Entity, new: Option<C>) -> Option<C> {
        let index = entity.usize();

        let old = if self.bit(index) {
            let value = self.data.get(index).expect("bits mismatch");
            // Safety: the bit is cleared or the slot is overwritten below,
            // so the moved-out value is never read again.
            Some(unsafe { value.assume_init_read() })
        } else {
            None
        };

        // the original value was already moved out, now we can overwrite the data or unmark it

        match new {
            Some(new) => {
                self.set_bit(index, true);
                if self.data.len() <= index {
                    self.data.resize_with(index + 1, MaybeUninit::uninit);
                }
                let slot = self.data.get_mut(index).expect("just resized");
                *slot = MaybeUninit::new(new);
            }
            // an id beyond the bit vector never had a component
            None if index >= self.bits.len() => {}
            None => self.set_bit(index, false),
        }

        old
    }

    fn cardinality(&self) -> usize { self.cardinality }

    type Iter<'t> = Iter<'t, C>;
    fn iter(&self) -> Self::Iter<'_> { Iter { indices: self.bits.iter_ones(), data: &self.data } }
}

/// Return value of [`VecStorage::iter`].
pub struct Iter<'t, C> {
    indices: IterOnes<'t, usize, Lsb0>,
    data:    &'t [MaybeUninit<C>],
}

impl<'t, C> Iterator for Iter<'t, C> {
    type Item = (Entity, &'t C);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        let value = self.data.get(index).expect("bits mismatch");
        // Safety: `index` comes from the set bits of the same storage.
        Some((Entity::from_usize(index), unsafe { value.assume_init_ref() }))
    }
}

#[cfg(test)]
super::tests::test_storage!(super::VecStorage<i64>);

#[cfg(test)]
#[test]
fn test_remove_absent_does_not_grow() {
    let mut storage = VecStorage::<i64>::default();
    storage.set(Entity::from_id(50_000_000), None);
    assert_eq!(storage.bits.len(), 0);

    storage.set(Entity::from_id(4), Some(4));
    storage.set(Entity::from_id(50_000_000), None);
    assert_eq!(storage.bits.len(), 5);
    assert_eq!(storage.cardinality(), 1);
}
