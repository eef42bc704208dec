//! A component is a small data structure that can be attached to an entity.
//!
//! Each component type is a component *kind*.
//! An entity has at most one component of each kind.
//!
//! # Registration
//! Kinds are registered once through [`Builder::component`](crate::world::Builder::component)
//! before the world is built.
//! Registration assigns the kind a dense [`KindId`] in registration order
//! and allocates its storage.
//! Looking up an unregistered kind yields no component,
//! while attaching or detaching one is a programming error and panics.
//!
//! # Instantiation
//! Components are never passed in by value when they are attached.
//! Attaching a kind always starts from [`Comp::initial`],
//! and the caller fills in the returned mutable reference.

use crate::storage::Storage;

/// A component kind.
///
/// Use the [`#[comp]`](macro@crate::comp) attribute to implement this trait.
pub trait Comp: Sized + 'static {
    /// The storage type used for storing components of this kind.
    type Storage: Storage<Comp = Self>;

    /// The default factory of this kind.
    fn initial() -> Self;
}

mod registry;
pub use registry::{KindId, Registry, Signature};

mod map;
pub(crate) use map::Map;
