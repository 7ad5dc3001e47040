//! Host runtime collaborators.
//!
//! The core never reaches for ambient runtime state. A component instance is
//! mounted on a [`HostRuntime`], which hands out a [`StateContainer`]: the
//! current state plus a dispatch capability that runs the transition handler
//! and triggers a re-render. [`Memo`] is the dependency-gated memoization
//! primitive.
//!
//! [`LocalHost`] is the in-process implementation used by default and in
//! tests.

mod container;
mod memo;

use std::rc::Rc;

use crate::error::HostError;

pub use container::{LocalContainer, LocalHost};
pub use memo::{Identity, Memo};

/// Dispatch capability returned by a state container.
pub type Dispatch<A> = Rc<dyn Fn(A) -> Result<(), HostError>>;

/// Transition handler registered with a state container.
pub type Handler<S, A> = Box<dyn Fn(&S, A) -> S>;

/// Listener invoked after every accepted transition with the new version.
pub type Listener = Box<dyn Fn(u64)>;

/// A state cell owned by one component instance.
pub trait StateContainer<S, A> {
    /// The latest installed state.
    fn current(&self) -> S;

    /// A callable that feeds `A` through the transition handler.
    fn dispatcher(&self) -> Dispatch<A>;

    /// Number of transitions accepted so far.
    fn version(&self) -> u64;

    /// Registers a re-render trigger.
    fn subscribe(&self, listener: Listener);
}

/// Factory for state containers.
pub trait HostRuntime {
    type Container<S: Clone + 'static, A: 'static>: StateContainer<S, A>;

    fn create_state_container<S: Clone + 'static, A: 'static>(
        &self,
        initial: S,
        handler: Handler<S, A>,
    ) -> Self::Container<S, A>;
}
