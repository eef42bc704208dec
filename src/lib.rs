//! A minimal ECS runtime driving frame-based simulations.
//!
//! # Ticks
//! A [`World`] advances in ticks.
//! Each tick runs every registered [`System`] over every live [`Entity`]
//! in registration order, then flushes the mutations those systems requested.
//!
//! Systems never mutate the world in place.
//! During a tick they only observe the state as it was when the tick started,
//! and record their writes into a [`Frame`](world::Frame):
//! component writes, tag changes and arbitrary deferred closures are applied first,
//! followed by entity creation, deletion and component attachment.
//! As a result, no system can observe the output of another system within the same tick,
//! and the outcome of a tick does not depend on which system happened to run first.
//!
//! # Entities are delayed by one tick
//! An entity created during tick `T` is only reserved:
//! its id is allocated and its components are collected in a pending bundle,
//! but it is not visited by any system until tick `T + 1`.
//! Deleting an entity is symmetric:
//! it stays visible for the rest of the tick and its id is recycled at the flush.
//!
//! Entity ids are plain integers.
//! Components may store ids of other entities,
//! which are resolved through the world on every access;
//! a stale id simply resolves to no component (or to the entity that reused the id).
//!
//! # Component kinds
//! Component kinds are registered once when the world is [built](world::Builder).
//! Each kind gets a dense [`KindId`](comp::KindId) and a default factory ([`Comp::initial`]),
//! which is used every time a component of that kind is attached to an entity.
//!
//! ```
//! use tickec::{comp, system, Entity};
//!
//! #[comp(init = Position { x: 0.0, y: 0.0 })]
//! #[derive(Debug, PartialEq)]
//! struct Position {
//!     x: f64,
//!     y: f64,
//! }
//!
//! struct Drift;
//!
//! impl system::ForEach<()> for Drift {
//!     type Query = (Position,);
//!
//!     fn process(
//!         &mut self,
//!         frame: &mut tickec::Frame<'_, ()>,
//!         entity: Entity,
//!         (position,): (&Position,),
//!     ) {
//!         frame.set(entity, Position { x: position.x + 1.0, y: position.y });
//!     }
//! }
//!
//! let mut builder = tickec::Builder::new(());
//! builder.component::<Position>();
//! builder.schedule_each(Drift);
//! let mut world = builder.build();
//!
//! let entity = world.create_entity();
//! world.add_component::<Position>(entity);
//!
//! world.tick(); // the entity becomes live at the end of this tick
//! world.tick(); // `Drift` moves it
//! assert_eq!(world.component::<Position>(entity), Some(&Position { x: 1.0, y: 0.0 }));
//! ```

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

mod macros;
#[doc(inline)]
pub use macros::*;

pub mod tracer;
pub use tracer::Tracer;

pub mod comp;
pub use comp::Comp;

pub mod entity;
pub use entity::Entity;

mod error;
pub use error::Error;

pub mod storage;
pub use storage::Storage;

pub mod system;
pub use system::System;

#[cfg(any(test, feature = "internal-bench"))]
pub mod test_util;

pub mod world;
pub use world::{new, Builder, Bundle, Frame, World};
