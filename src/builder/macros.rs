//! Macros for ergonomic state and event enums.

/// Generate a `State` implementation for a unit enum.
///
/// Each variant's name is its identifier.
///
/// # Example
///
/// ```
/// use junction::state_enum;
/// use junction::core::State;
///
/// state_enum! {
///     pub enum Gate {
///         Closed,
///         Opening,
///         Open,
///     }
/// }
///
/// assert_eq!(Gate::Opening.name(), "Opening");
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate an `Event` implementation for a unit enum.
///
/// # Example
///
/// ```
/// use junction::event_enum;
/// use junction::core::Event;
///
/// event_enum! {
///     pub enum GateEvent {
///         Ticket,
///         Passed,
///     }
/// }
///
/// assert_eq!(GateEvent::Passed.name(), "Passed");
/// ```
#[macro_export]
macro_rules! event_enum {
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
