//! An entity is an opaque identifier for a logical object.
//!
//! Entities carry no data of their own.
//! All their state lives in component storages indexed by the entity id.
//!
//! Entity ids are recycled.
//! Once an entity has been removed, its id may be handed out to a new entity,
//! so an id held across ticks may address a different logical entity than it used to.
//! This is not a memory safety issue:
//! looking up a stale id returns the components of the new entity (or nothing),
//! and callers that keep ids around must tolerate that.

use std::fmt;

pub mod ealloc;
pub use ealloc::Ealloc;

/// A handle to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

static_assertions::assert_impl_all!(Entity: Copy, Send, Sync, std::hash::Hash);

impl Entity {
    /// Reconstructs a handle from a raw id previously returned by [`Entity::id`].
    ///
    /// The handle is not validated.
    /// If no live entity has this id, lookups simply return nothing.
    pub fn from_id(id: u32) -> Self { Self(id) }

    /// The raw integer id of this entity.
    pub fn id(self) -> u32 { self.0 }

    pub(crate) fn from_usize(index: usize) -> Self {
        Self(index.try_into().expect("entity index exceeds u32"))
    }

    pub(crate) fn usize(self) -> usize { self.0.try_into().expect("usize >= u32") }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}
