//! Fetching a fixed tuple of components of an entity.

use crate::comp::{Registry, Signature};
use crate::world::Components;
use crate::{Comp, Entity};

/// A tuple of component kinds fetched together.
///
/// Implemented for tuples of up to 8 [`Comp`] types.
/// The empty tuple matches every entity.
pub trait Query: 'static {
    /// The references yielded for each matching entity.
    type Item<'t>;

    /// The kinds an entity must have to match this query,
    /// or `None` if any kind is not registered.
    fn signature(registry: &Registry) -> Option<Signature>;

    /// Fetches the components of an entity,
    /// or `None` if the entity lacks any of them.
    fn fetch<'t>(components: &'t Components, entity: Entity) -> Option<Self::Item<'t>>;
}

macro_rules! impl_query {
    ($($ty:ident $var:ident),* $(,)?) => {
        impl<$($ty: Comp),*> Query for ($($ty,)*) {
            type Item<'t> = ($(&'t $ty,)*);

            #[allow(unused_variables)]
            fn signature(registry: &Registry) -> Option<Signature> {
                #[allow(unused_mut)]
                let mut signature = Signature::default();
                $(
                    signature.insert(registry.kind_of::<$ty>()?);
                )*
                Some(signature)
            }

            #[allow(unused_variables)]
            fn fetch<'t>(components: &'t Components, entity: Entity) -> Option<Self::Item<'t>> {
                $(
                    let $var = components.get::<$ty>(entity)?;
                )*
                Some(($($var,)*))
            }
        }
    }
}

macro_rules! impl_query_accumulate {
    () => {
        impl_query!();
    };
    ($first_ty:ident $first_var:ident $(, $rest_ty:ident $rest_var:ident)* $(,)?) => {
        impl_query!($first_ty $first_var $(, $rest_ty $rest_var)*);
        impl_query_accumulate!($($rest_ty $rest_var),*);
    };
}

impl_query_accumulate!(P0 p0, P1 p1, P2 p2, P3 p3, P4 p4, P5 p5, P6 p6, P7 p7);

#[cfg(test)]
mod tests;
