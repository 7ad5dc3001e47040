//! Messages: the closed set of symbolic tags that select a transition branch.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use super::program::Program;

/// Marker trait for message enumerations.
///
/// Messages represent user actions or system events. Message identity alone
/// selects the transition branch; any payload travels separately as
/// arguments (see [`Dispatched`]).
pub trait Message: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every declared message, in declaration order.
    const ALL: &'static [Self];

    /// Symbolic name of the message.
    fn name(self) -> &'static str;
}

/// Payload handed to the state container on every dispatch.
pub struct Dispatched<T: Program> {
    pub message: T::Message,
    pub arguments: Vec<T::Arg>,
    pub props: Rc<T::Props>,
}

impl<T: Program> Clone for Dispatched<T> {
    fn clone(&self) -> Self {
        Self {
            message: self.message,
            arguments: self.arguments.clone(),
            props: Rc::clone(&self.props),
        }
    }
}

impl<T: Program> fmt::Debug for Dispatched<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatched")
            .field("message", &self.message)
            .field("arguments", &self.arguments.len())
            .finish()
    }
}

/// Declares a fieldless message enum and implements [`Message`] for it.
///
/// ```
/// elmish::messages! {
///     pub enum Msg {
///         Increment,
///         Decrement,
///     }
/// }
///
/// use elmish::Message;
///
/// assert_eq!(Msg::ALL, &[Msg::Increment, Msg::Decrement]);
/// assert_eq!(Msg::Decrement.name(), "Decrement");
/// ```
#[macro_export]
macro_rules! messages {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $crate::Message for $name {
            const ALL: &'static [Self] = &[$(Self::$variant,)*];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }
    };
}
