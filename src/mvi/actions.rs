//! Action surface: one callable per message, synthesized from the declared
//! message enumeration.
//!
//! An [`Action`] dispatches `{message, arguments, props}` to the component's
//! state container. Calling it returns nothing; the effect is a pending
//! transition. [`Action::bind`] pre-binds leading arguments.
//!
//! # Hazard: dispatching from a transition
//!
//! A transition function may call an action. The host queues that dispatch
//! and runs it after the current transition, so a transition that dispatches
//! unconditionally never settles. The local host stops such chains after
//! [`HostConfig::max_chained_dispatches`](crate::config::HostConfig) but that
//! is a diagnostic, not a guarantee.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::HostError;
use crate::host::Dispatch;

use super::message::{Dispatched, Message};
use super::program::Program;

/// Late-bound route from the action surface to a state container.
///
/// The init stage receives an action surface before the container exists,
/// so the route is filled in once mounting completes.
pub(crate) struct Sink<T: Program> {
    target: Rc<OnceCell<Dispatch<Dispatched<T>>>>,
}

impl<T: Program> Clone for Sink<T> {
    fn clone(&self) -> Self {
        Self {
            target: Rc::clone(&self.target),
        }
    }
}

impl<T: Program> Sink<T> {
    pub(crate) fn unbound() -> Self {
        Self {
            target: Rc::new(OnceCell::new()),
        }
    }

    /// Connects the sink. A sink is bound at most once; later calls are ignored.
    pub(crate) fn bind(&self, dispatch: Dispatch<Dispatched<T>>) {
        if self.target.set(dispatch).is_err() {
            tracing::debug!("action sink already bound");
        }
    }

    fn send(&self, dispatched: Dispatched<T>) -> Result<(), HostError> {
        match self.target.get() {
            Some(dispatch) => dispatch(dispatched),
            None => Err(HostError::NotMounted),
        }
    }
}

/// A callable bound to one message.
pub struct Action<T: Program> {
    message: T::Message,
    leading: Rc<[T::Arg]>,
    props: Rc<T::Props>,
    sink: Sink<T>,
}

impl<T: Program> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            message: self.message,
            leading: Rc::clone(&self.leading),
            props: Rc::clone(&self.props),
            sink: self.sink.clone(),
        }
    }
}

impl<T: Program> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("message", &self.message)
            .field("bound", &self.leading.len())
            .finish()
    }
}

impl<T: Program> Action<T> {
    fn new(message: T::Message, props: Rc<T::Props>, sink: Sink<T>) -> Self {
        Self {
            message,
            leading: Rc::from(Vec::new()),
            props,
            sink,
        }
    }

    /// The message this action dispatches.
    pub fn message(&self) -> T::Message {
        self.message
    }

    /// Arguments pre-bound by [`bind`](Self::bind), in order.
    pub fn bound(&self) -> &[T::Arg] {
        &self.leading
    }

    /// Dispatches the message with the pre-bound arguments followed by `args`.
    pub fn call<I>(&self, args: I)
    where
        I: IntoIterator<Item = T::Arg>,
    {
        let arguments: Vec<T::Arg> = self.leading.iter().cloned().chain(args).collect();
        let dispatched = Dispatched {
            message: self.message,
            arguments,
            props: Rc::clone(&self.props),
        };
        if let Err(err) = self.sink.send(dispatched) {
            tracing::warn!(message = self.message.name(), %err, "dispatch dropped");
        }
    }

    /// Dispatches with the pre-bound arguments only.
    pub fn fire(&self) {
        self.call(std::iter::empty());
    }

    /// Returns a new action with `leading` appended to the pre-bound arguments.
    pub fn bind<I>(&self, leading: I) -> Self
    where
        I: IntoIterator<Item = T::Arg>,
    {
        let leading: Vec<T::Arg> = self.leading.iter().cloned().chain(leading).collect();
        Self {
            message: self.message,
            leading: Rc::from(leading),
            props: Rc::clone(&self.props),
            sink: self.sink.clone(),
        }
    }
}

/// The action surface handed to every stage as `cmd`.
///
/// Cloning is cheap and yields the same surface ([`Actions::ptr_eq`]).
pub struct Actions<T: Program> {
    inner: Rc<ActionsInner<T>>,
}

struct ActionsInner<T: Program> {
    table: HashMap<T::Message, Action<T>>,
    props: Rc<T::Props>,
    sink: Sink<T>,
}

impl<T: Program> Clone for Actions<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Program> fmt::Debug for Actions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("messages", &self.inner.table.len())
            .finish()
    }
}

impl<T: Program> Actions<T> {
    /// Builds a surface that routes every dispatch through `dispatch`.
    pub fn synthesize(props: Rc<T::Props>, dispatch: Dispatch<Dispatched<T>>) -> Self {
        let sink = Sink::unbound();
        sink.bind(dispatch);
        Self::from_sink(sink, props)
    }

    pub(crate) fn from_sink(sink: Sink<T>, props: Rc<T::Props>) -> Self {
        let table: HashMap<_, _> = T::Message::ALL
            .iter()
            .map(|&message| (message, Action::new(message, Rc::clone(&props), sink.clone())))
            .collect();
        tracing::debug!(messages = table.len(), "action surface synthesized");
        Self {
            inner: Rc::new(ActionsInner { table, props, sink }),
        }
    }

    /// The action for `message`.
    ///
    /// Messages missing from the declared enumeration are not rejected; an
    /// action is synthesized for them on demand.
    pub fn get(&self, message: T::Message) -> Action<T> {
        match self.inner.table.get(&message) {
            Some(action) => action.clone(),
            None => Action::new(message, Rc::clone(&self.inner.props), self.inner.sink.clone()),
        }
    }

    /// The action for the declared message called `name`.
    pub fn by_name(&self, name: &str) -> Option<Action<T>> {
        T::Message::ALL
            .iter()
            .find(|message| message.name() == name)
            .map(|&message| self.get(message))
    }

    /// Shorthand for `self.get(message).call(args)`.
    pub fn call<I>(&self, message: T::Message, args: I)
    where
        I: IntoIterator<Item = T::Arg>,
    {
        self.get(message).call(args);
    }

    /// Shorthand for `self.get(message).fire()`.
    pub fn fire(&self, message: T::Message) {
        self.get(message).fire();
    }

    /// Props captured by this surface.
    pub fn props(&self) -> &Rc<T::Props> {
        &self.inner.props
    }

    /// Number of eagerly synthesized actions.
    pub fn len(&self) -> usize {
        self.inner.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.table.is_empty()
    }

    /// True when both handles refer to the same synthesized surface.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
