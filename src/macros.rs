/// Implements [`Comp`](crate::Comp) for the applied type.
/// This macro does not modify the input other than stripping attributes.
///
/// # Options
/// Options are applied behind the attribute name in the form `#[comp(...)]`.
/// Multiple options are separated by commas.
///
/// ## `init = $expr`
/// The expression evaluated by [`Comp::initial`](crate::Comp::initial),
/// i.e. the value every newly attached component of this kind starts with.
/// Defaults to [`Default::default()`].
///
/// ## `storage = $ty`
/// The [storage](crate::storage) type backing this kind.
/// Defaults to [`storage::Vec<Self>`](crate::storage::Vec).
/// Kinds attached to few entities may prefer [`storage::Tree<Self>`](crate::storage::Tree).
///
/// # Example
/// ```
/// #[tickec::comp(init = Velocity { dx: 0.0, dy: 1.0 })]
/// struct Velocity {
///     dx: f32,
///     dy: f32,
/// }
///
/// #[tickec::comp(storage = tickec::storage::Tree<Self>)]
/// #[derive(Default)]
/// struct Highlighted;
///
/// static_assertions::assert_impl_all!(Velocity: tickec::Comp);
/// static_assertions::assert_impl_all!(Highlighted: tickec::Comp);
///
/// let velocity = <Velocity as tickec::Comp>::initial();
/// assert_eq!(velocity.dy, 1.0);
/// ```
#[doc(inline)]
pub use tickec_codegen::comp;

/// Convenience macro that constructs a new world for testing a small number of systems.
///
/// The component kinds listed after the globals are registered in order,
/// then the systems are scheduled in order.
///
/// # Example
/// ```
/// #[tickec::comp]
/// #[derive(Default)]
/// struct Health(u32);
///
/// struct Noop;
/// impl tickec::System<()> for Noop {}
///
/// let world = tickec::system_test!((); Health; Noop);
/// assert_eq!(world.entity_count(), 0);
/// ```
#[macro_export]
macro_rules! system_test {
    (
        $globals:expr;
        $($comps:ty),* ;
        $($systems:expr),* $(,)?
    ) => {{
        let mut builder = $crate::world::Builder::new($globals);
        $(
            builder.component::<$comps>();
        )*
        $(
            builder.schedule($systems);
        )*

        builder.build()
    }}
}
