//! Component configuration and mounted instances.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{HostRuntime, LocalHost, Memo, StateContainer};

use super::actions::{Actions, Sink};
use super::engine::{AfterUpdateFn, Engine, UpdateFn};
use super::message::Dispatched;
use super::params::{AfterUpdate, Init, Update, View};
use super::patch::Maybe;
use super::program::Program;

/// Builds the initial state.
pub type InitFn<T> = Rc<dyn Fn(Init<'_, T>) -> <T as Program>::Model>;

/// Renders state into a view value.
pub type ViewFn<T> = Rc<dyn Fn(View<'_, T>) -> <T as Program>::View>;

/// A component description: `init`, `update`, optional `after_update`, and
/// `view`.
pub struct Component<T: Program> {
    init: InitFn<T>,
    update: UpdateFn<T>,
    after_update: Option<AfterUpdateFn<T>>,
    view: ViewFn<T>,
}

impl<T: Program> Clone for Component<T> {
    fn clone(&self) -> Self {
        Self {
            init: Rc::clone(&self.init),
            update: Rc::clone(&self.update),
            after_update: self.after_update.clone(),
            view: Rc::clone(&self.view),
        }
    }
}

impl<T: Program> Component<T> {
    pub fn new(
        init: impl Fn(Init<'_, T>) -> T::Model + 'static,
        update: impl Fn(Update<'_, T>) -> Maybe<T::Model> + 'static,
        view: impl Fn(View<'_, T>) -> T::View + 'static,
    ) -> Self {
        Self {
            init: Rc::new(init),
            update: Rc::new(update),
            after_update: None,
            view: Rc::new(view),
        }
    }

    /// Adds a secondary transition, run after every primary transition.
    pub fn with_after_update(
        mut self,
        after_update: impl Fn(AfterUpdate<'_, T>) -> Maybe<T::Model> + 'static,
    ) -> Self {
        self.after_update = Some(Rc::new(after_update));
        self
    }

    /// The transition engine described by this component.
    pub fn engine(&self) -> Engine<T> {
        Engine::new(Rc::clone(&self.update), self.after_update.clone())
    }

    /// Mounts on a [`LocalHost`] with default settings.
    pub fn mount(&self, props: Rc<T::Props>) -> Instance<T> {
        self.mount_on(&LocalHost::default(), props)
    }

    /// Runs the init stage once and registers the engine with a state
    /// container from `host`.
    ///
    /// The action surface handed to `init` is live only after this returns;
    /// dispatching from `init` itself is dropped.
    pub fn mount_on<H: HostRuntime>(&self, host: &H, props: Rc<T::Props>) -> Instance<T, H> {
        let sink = Sink::unbound();
        let mut memo = Memo::new();
        let cmd = memo
            .get_or_compute(Rc::clone(&props), || {
                Actions::from_sink(sink.clone(), Rc::clone(&props))
            })
            .clone();

        let model = (self.init)(Init {
            cmd: &cmd,
            props: &props,
        });

        let surface = Rc::new(RefCell::new(cmd));
        let handler_surface = Rc::clone(&surface);
        let engine = self.engine();
        let container = host.create_state_container(
            model,
            Box::new(move |model: &T::Model, dispatched: Dispatched<T>| {
                let cmd = handler_surface.borrow().clone();
                engine.reduce(model, &cmd, &dispatched)
            }),
        );
        sink.bind(container.dispatcher());
        tracing::debug!(after_update = self.after_update.is_some(), "component mounted");

        Instance {
            view: Rc::clone(&self.view),
            container,
            sink,
            surface,
            memo,
            props,
            rendered: None,
        }
    }
}

/// A mounted component: its state container plus the memoized action
/// surface.
pub struct Instance<T: Program, H: HostRuntime = LocalHost> {
    view: ViewFn<T>,
    container: H::Container<T::Model, Dispatched<T>>,
    sink: Sink<T>,
    surface: Rc<RefCell<Actions<T>>>,
    memo: Memo<Rc<T::Props>, Actions<T>>,
    props: Rc<T::Props>,
    rendered: Option<u64>,
}

impl<T: Program, H: HostRuntime> Instance<T, H> {
    /// Renders the current state with `props`.
    ///
    /// The action surface is synthesized again only when `props` is a
    /// different allocation from the one last rendered with.
    pub fn render(&mut self, props: Rc<T::Props>) -> T::View {
        let sink = &self.sink;
        let cmd = self
            .memo
            .get_or_compute(Rc::clone(&props), || {
                Actions::from_sink(sink.clone(), Rc::clone(&props))
            })
            .clone();
        *self.surface.borrow_mut() = cmd.clone();
        self.props = props;

        let model = self.container.current();
        self.rendered = Some(self.container.version());
        (self.view)(View {
            cmd: &cmd,
            model: &model,
            props: &self.props,
        })
    }

    /// Renders again with the props of the last render.
    pub fn rerender(&mut self) -> T::View {
        let props = Rc::clone(&self.props);
        self.render(props)
    }

    /// The latest installed state.
    pub fn model(&self) -> T::Model {
        self.container.current()
    }

    /// The action surface transitions currently receive.
    pub fn actions(&self) -> Actions<T> {
        self.surface.borrow().clone()
    }

    pub fn props(&self) -> &Rc<T::Props> {
        &self.props
    }

    /// Number of accepted transitions.
    pub fn version(&self) -> u64 {
        self.container.version()
    }

    /// True when state changed since the last render (or nothing was
    /// rendered yet).
    pub fn needs_render(&self) -> bool {
        self.rendered != Some(self.container.version())
    }

    /// How many times the action surface has been synthesized.
    pub fn surface_generations(&self) -> u64 {
        self.memo.computations()
    }

    pub fn container(&self) -> &H::Container<T::Model, Dispatched<T>> {
        &self.container
    }
}
