//! Macros for ergonomic state declarations.

/// Declare a unit enum whose variants name states.
///
/// The generated enum gets a `name()` method, a `Display` impl and an
/// [`IntoStateId`](crate::core::IntoStateId) impl, so variants can be
/// passed anywhere a state is expected.
///
/// # Example
///
/// ```
/// use ufsm::machine::Machine;
/// use ufsm::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Open,
///         Closed,
///     }
/// }
///
/// let mut door = Machine::new(Door::Closed).unwrap();
/// door.map(Door::Closed, Door::Open, |push: &bool| *push).unwrap();
///
/// door.transition(true).unwrap();
/// assert_eq!(door.current_state(), Door::Open.name());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// The state name this variant maps to.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::core::IntoStateId for $name {
            fn into_state_id(
                self,
            ) -> ::std::result::Result<$crate::core::StateId, $crate::core::FsmError> {
                $crate::core::StateId::new(self.name())
            }
        }
    };
}
