//! Transition engine.
//!
//! The engine is the only place where state transitions happen. Each
//! dispatch runs two stages:
//!
//! ```text
//! (model, message, args) ──update──→ R1 ──fold──→ model'
//! model' ──after_update (optional)──→ R2 ──fold──→ model''
//! ```
//!
//! [`fold`] decides how a partial result lands on the previous state.

use std::rc::Rc;

use super::actions::Actions;
use super::message::{Dispatched, Message};
use super::params::{AfterUpdate, Update};
use super::patch::{Maybe, Patchable};
use super::program::Program;

/// Primary transition function.
pub type UpdateFn<T> = Rc<dyn Fn(Update<'_, T>) -> Maybe<<T as Program>::Model>>;

/// Secondary transition function, run after every primary transition.
pub type AfterUpdateFn<T> = Rc<dyn Fn(AfterUpdate<'_, T>) -> Maybe<<T as Program>::Model>>;

/// Folds a transition result into `model`.
///
/// - Record state: an object-shaped result is merged over the old fields;
///   anything else (including nothing) leaves the fields as they were.
/// - Opaque state: the result replaces the state wholesale. An absent
///   result is adopted too, so `Value` state becomes `Null` and `i64`
///   state becomes `0`. Transitions over opaque state should always return
///   a value.
pub fn fold<M: Patchable>(model: &M, result: Maybe<M>) -> M {
    if model.is_record() {
        match result {
            Some(patch) if M::is_record_patch(&patch) => model.merge(patch),
            _ => model.clone(),
        }
    } else {
        M::adopt(result)
    }
}

/// The reducer behind one component: primary plus optional secondary
/// transition.
pub struct Engine<T: Program> {
    update: UpdateFn<T>,
    after_update: Option<AfterUpdateFn<T>>,
}

impl<T: Program> Clone for Engine<T> {
    fn clone(&self) -> Self {
        Self {
            update: Rc::clone(&self.update),
            after_update: self.after_update.clone(),
        }
    }
}

impl<T: Program> Engine<T> {
    pub fn new(update: UpdateFn<T>, after_update: Option<AfterUpdateFn<T>>) -> Self {
        Self {
            update,
            after_update,
        }
    }

    pub fn has_after_update(&self) -> bool {
        self.after_update.is_some()
    }

    /// Runs one dispatch to completion and returns the state to install.
    ///
    /// Panics raised by the transition functions propagate unmodified.
    pub fn reduce(
        &self,
        model: &T::Model,
        cmd: &Actions<T>,
        dispatched: &Dispatched<T>,
    ) -> T::Model {
        tracing::trace!(
            message = dispatched.message.name(),
            arguments = dispatched.arguments.len(),
            "dispatch"
        );

        let primary = (self.update)(Update {
            arguments: &dispatched.arguments,
            cmd,
            model,
            message: dispatched.message,
            props: &dispatched.props,
        });
        let model = fold(model, primary);

        let Some(after_update) = &self.after_update else {
            return model;
        };

        let derived = after_update(AfterUpdate {
            cmd,
            model: &model,
            props: &dispatched.props,
        });
        fold(&model, derived)
    }
}
