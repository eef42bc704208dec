use std::{error, fmt};

use crate::Entity;

/// A contract violation reported by the fallible variants of [`World`](crate::World) methods.
///
/// The infallible variants panic with the same message instead,
/// except that deleting a component from a removed entity is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The component kind was never registered in the world.
    UnregisteredComp {
        /// The type name of the component kind.
        name: &'static str,
    },
    /// The entity is neither alive nor pending creation.
    NotAlive {
        /// The addressed entity.
        entity: Entity,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnregisteredComp { name } => {
                write!(f, "Component kind `{name}` is not registered in this world")
            }
            Self::NotAlive { entity } => {
                write!(f, "Entity {entity} is neither alive nor pending creation")
            }
        }
    }
}

impl error::Error for Error {}
