//! Allocates entity ids.

use std::collections::VecDeque;

use super::Entity;

/// Allocates and recycles entity ids.
///
/// Fresh ids are taken from a monotonic gauge starting from 0.
/// Deallocated ids are only made available again after [`flush`](Ealloc::flush),
/// and recycled ids are reused before fresh ones, oldest first.
#[derive(Debug, Default)]
pub struct Ealloc {
    /// The next fresh id.
    gauge:         u32,
    /// Ids available for reuse, in the order they were released.
    recyclable:    VecDeque<Entity>,
    /// Ids released since the last flush.
    dealloc_queue: Vec<Entity>,
}

impl Ealloc {
    /// Reserves an id.
    pub fn allocate(&mut self) -> Entity {
        if let Some(entity) = self.recyclable.pop_front() {
            return entity;
        }

        let entity = Entity(self.gauge);
        self.gauge = self.gauge.checked_add(1).expect("entity ids exhausted");
        entity
    }

    /// Releases an id.
    /// The id is not reused until the next [`flush`](Ealloc::flush).
    pub fn queue_deallocate(&mut self, entity: Entity) { self.dealloc_queue.push(entity); }

    /// Makes all ids released since the last flush available for reuse.
    pub fn flush(&mut self) {
        if !self.dealloc_queue.is_empty() {
            log::trace!("recycling entity ids {:?}", self.dealloc_queue);
        }
        self.recyclable.extend(self.dealloc_queue.drain(..));
    }

    /// One more than the greatest id ever allocated.
    pub fn max_id(&self) -> u32 { self.gauge }

    /// Iterates over the ids available for reuse.
    pub fn recyclable(&self) -> impl Iterator<Item = Entity> + '_ {
        self.recyclable.iter().copied()
    }
}

#[cfg(test)]
mod tests;
