//! Parameter bundles passed to each stage of a component.

use super::actions::Actions;
use super::program::Program;

/// Input of the init stage.
pub struct Init<'a, T: Program> {
    pub cmd: &'a Actions<T>,
    pub props: &'a T::Props,
}

/// Input of the primary transition.
pub struct Update<'a, T: Program> {
    pub arguments: &'a [T::Arg],
    pub cmd: &'a Actions<T>,
    pub model: &'a T::Model,
    pub message: T::Message,
    pub props: &'a T::Props,
}

impl<T: Program> Update<'_, T> {
    /// The argument at `index`, if the dispatch carried one.
    pub fn arg(&self, index: usize) -> Option<&T::Arg> {
        self.arguments.get(index)
    }
}

/// Input of the secondary (derived-state) transition.
pub struct AfterUpdate<'a, T: Program> {
    pub cmd: &'a Actions<T>,
    pub model: &'a T::Model,
    pub props: &'a T::Props,
}

/// Input of the view stage.
pub struct View<'a, T: Program> {
    pub cmd: &'a Actions<T>,
    pub model: &'a T::Model,
    pub props: &'a T::Props,
}
