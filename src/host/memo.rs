//! Dependency-gated memoization.

use std::rc::Rc;
use std::sync::Arc;

/// Identity comparison for memo dependencies.
///
/// Two dependencies are the same when they refer to the same allocation,
/// not when their contents are equal.
pub trait Identity {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<A: Identity, B: Identity> Identity for (A, B) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1)
    }
}

impl<D: Identity> Identity for Vec<D> {
    fn same(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.same(b))
    }
}

/// A cached value recomputed only when its dependencies change identity.
pub struct Memo<D, V> {
    slot: Option<(D, V)>,
    computations: u64,
}

impl<D, V> Default for Memo<D, V> {
    fn default() -> Self {
        Self {
            slot: None,
            computations: 0,
        }
    }
}

impl<D: Identity, V> Memo<D, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value, running `factory` first when `deps` differs
    /// from the dependencies of the cached value.
    pub fn get_or_compute(&mut self, deps: D, factory: impl FnOnce() -> V) -> &V {
        if let Some((cached, _)) = &self.slot {
            if !cached.same(&deps) {
                self.slot = None;
            }
        }
        let computations = &mut self.computations;
        let (_, value) = self.slot.get_or_insert_with(|| {
            *computations += 1;
            tracing::debug!(computations = *computations, "memo recomputed");
            (deps, factory())
        });
        value
    }

    /// The cached value, if any.
    pub fn get(&self) -> Option<&V> {
        self.slot.as_ref().map(|(_, value)| value)
    }

    /// How many times the factory has run.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
