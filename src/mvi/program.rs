//! The type family shared by every stage of one component.

use super::message::Message;
use super::patch::Patchable;

/// Binds together the types one component's stages agree on.
///
/// Implemented on a unit marker type; the behaviour itself lives in a
/// [`Component`](super::Component) built from closures over these types.
///
/// ```
/// use elmish::Program;
///
/// elmish::messages! {
///     pub enum Msg { Increment }
/// }
///
/// struct Counter;
///
/// impl Program for Counter {
///     type Model = i64;
///     type Message = Msg;
///     type Arg = i64;
///     type Props = ();
///     type View = String;
/// }
/// ```
pub trait Program: 'static {
    /// State owned by one component instance between transitions.
    type Model: Patchable + 'static;

    /// Closed set of message tags.
    type Message: Message;

    /// Argument values carried by a dispatch.
    type Arg: Clone + 'static;

    /// Contextual values threaded through every stage unchanged.
    type Props: 'static;

    /// Whatever the view produces; opaque to the core.
    type View;
}
