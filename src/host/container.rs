//! In-process state container.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::config::HostConfig;
use crate::error::HostError;

use super::{Dispatch, Handler, HostRuntime, Listener, StateContainer};

/// Host runtime that keeps component state in the current thread.
#[derive(Debug, Clone, Default)]
pub struct LocalHost {
    config: HostConfig,
}

impl LocalHost {
    pub fn new(config: HostConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

impl HostRuntime for LocalHost {
    type Container<S: Clone + 'static, A: 'static> = LocalContainer<S, A>;

    fn create_state_container<S: Clone + 'static, A: 'static>(
        &self,
        initial: S,
        handler: Handler<S, A>,
    ) -> LocalContainer<S, A> {
        LocalContainer::new(initial, handler, self.config.max_chained_dispatches)
    }
}

/// Single-threaded state cell with a FIFO dispatch queue.
///
/// A dispatch issued while a transition is running (from the handler or
/// from a listener) is queued and applied after it, in issue order, by the
/// outermost dispatch. Each queued action sees the state left by the one
/// before it.
pub struct LocalContainer<S, A> {
    inner: Rc<Inner<S, A>>,
}

struct Inner<S, A> {
    state: RefCell<S>,
    handler: Handler<S, A>,
    queue: RefCell<VecDeque<A>>,
    draining: Cell<bool>,
    version: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
    limit: usize,
}

impl<S: Clone + 'static, A: 'static> LocalContainer<S, A> {
    /// `limit` caps how many transitions one outer dispatch may drain.
    pub fn new(initial: S, handler: Handler<S, A>, limit: usize) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(initial),
                handler,
                queue: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
                version: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
                limit,
            }),
        }
    }

    /// Feeds `action` through the handler (or queues it behind the running
    /// transition).
    pub fn dispatch(&self, action: A) -> Result<(), HostError> {
        self.inner.dispatch(action)
    }

    /// Actions queued behind the running transition.
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }
}

impl<S, A> Inner<S, A> {
    fn dispatch(&self, action: A) -> Result<(), HostError> {
        self.queue.borrow_mut().push_back(action);
        if self.draining.get() {
            return Ok(());
        }

        self.draining.set(true);
        let _draining = scopeguard::guard((), |_| {
            self.draining.set(false);
            if std::thread::panicking() {
                self.queue.borrow_mut().clear();
            }
        });

        let mut drained = 0usize;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };

            drained += 1;
            if drained > self.limit {
                let dropped = {
                    let mut queue = self.queue.borrow_mut();
                    let dropped = queue.len() + 1;
                    queue.clear();
                    dropped
                };
                tracing::error!(limit = self.limit, dropped, "runaway dispatch chain stopped");
                return Err(HostError::RunawayDispatch { limit: self.limit });
            }

            let next_state = {
                let current = self.state.borrow();
                (self.handler)(&current, action)
            };
            *self.state.borrow_mut() = next_state;

            let version = self.version.get() + 1;
            self.version.set(version);
            for listener in self.listeners.borrow().iter() {
                listener(version);
            }
        }

        Ok(())
    }
}

impl<S: Clone + 'static, A: 'static> StateContainer<S, A> for LocalContainer<S, A> {
    fn current(&self) -> S {
        self.inner.state.borrow().clone()
    }

    fn dispatcher(&self) -> Dispatch<A> {
        let inner: Weak<Inner<S, A>> = Rc::downgrade(&self.inner);
        Rc::new(move |action: A| match inner.upgrade() {
            Some(inner) => inner.dispatch(action),
            None => Err(HostError::Unmounted),
        })
    }

    fn version(&self) -> u64 {
        self.inner.version.get()
    }

    fn subscribe(&self, listener: Listener) {
        self.inner.listeners.borrow_mut().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::OnceCell;

    fn adder(limit: usize) -> LocalContainer<i64, i64> {
        LocalContainer::new(0, Box::new(|state: &i64, delta: i64| state + delta), limit)
    }

    #[test]
    fn dispatch_applies_handler_and_bumps_version() {
        let container = adder(16);
        container.dispatch(2).unwrap();
        container.dispatch(3).unwrap();
        assert_eq!(container.current(), 5);
        assert_eq!(container.version(), 2);
    }

    #[test]
    fn listeners_see_every_accepted_transition() {
        let container = adder(16);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        container.subscribe(Box::new(move |version: u64| sink.borrow_mut().push(version)));
        container.dispatch(1).unwrap();
        container.dispatch(1).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn reentrant_dispatch_is_queued_in_order() {
        let route: Rc<OnceCell<Dispatch<&'static str>>> = Rc::new(OnceCell::new());
        let inner_route = Rc::clone(&route);
        let container: LocalContainer<Vec<&'static str>, &'static str> = LocalContainer::new(
            Vec::new(),
            Box::new(move |log: &Vec<&'static str>, step| {
                if step == "first" {
                    let dispatch = inner_route.get().unwrap();
                    dispatch("second").unwrap();
                    dispatch("third").unwrap();
                }
                let mut log = log.clone();
                log.push(step);
                log
            }),
            16,
        );
        assert!(route.set(container.dispatcher()).is_ok());

        container.dispatch("first").unwrap();
        assert_eq!(container.current(), vec!["first", "second", "third"]);
        assert_eq!(container.pending(), 0);
    }

    #[test]
    fn runaway_chain_is_stopped_at_limit() {
        let route: Rc<OnceCell<Dispatch<i64>>> = Rc::new(OnceCell::new());
        let inner_route = Rc::clone(&route);
        let container: LocalContainer<i64, i64> = LocalContainer::new(
            0,
            Box::new(move |state: &i64, delta| {
                let _ = (inner_route.get().unwrap())(delta);
                state + delta
            }),
            5,
        );
        assert!(route.set(container.dispatcher()).is_ok());

        let err = container.dispatch(1).unwrap_err();
        assert!(matches!(err, HostError::RunawayDispatch { limit: 5 }));
        assert_eq!(container.current(), 5);
        assert_eq!(container.pending(), 0);
        assert_eq!(container.version(), 5);
    }

    #[test]
    fn dispatcher_outliving_container_reports_unmounted() {
        let container = adder(16);
        let dispatch = container.dispatcher();
        dispatch(1).unwrap();
        drop(container);
        assert!(matches!(dispatch(1), Err(HostError::Unmounted)));
    }

    #[test]
    fn local_host_uses_configured_limit() {
        let host = LocalHost::new(HostConfig {
            max_chained_dispatches: 3,
        });
        let container = host.create_state_container(0i64, Box::new(|s: &i64, d: i64| s + d));
        container.dispatch(4).unwrap();
        assert_eq!(container.current(), 4);
        assert_eq!(host.config().max_chained_dispatches, 3);
    }
}
