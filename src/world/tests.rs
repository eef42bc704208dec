use crate::test_util::*;
use crate::{Builder, World};

mod lifecycle;
mod scheduler;

/// Builds a world with all test kinds except [`Unregistered`] and no systems.
fn test_world() -> World<Dims> { test_builder().build() }

fn test_builder() -> Builder<Dims> {
    init();

    let mut builder = Builder::new(Dims::default());
    builder.component::<Position>();
    builder.component::<Velocity>();
    builder.component::<Radius>();
    builder.component::<Cell>();
    builder.component::<Marker>();
    builder
}
