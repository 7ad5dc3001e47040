//! Unidirectional state-update core.
//!
//! A component describes its behaviour as three parts:
//!
//! - **init**: builds the initial state
//! - **update**: turns a message plus arguments into a partial new state
//! - **view**: reads state and wires actions into whatever it renders
//!
//! The [`mvi`] module holds the transition engine and the action surface,
//! [`collections`] the persistent list and record used to build state
//! fragments, and [`host`] the state container the engine is mounted on.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use elmish::{Component, Program};
//!
//! elmish::messages! {
//!     pub enum Msg { Increment, Decrement }
//! }
//!
//! struct Counter;
//!
//! impl Program for Counter {
//!     type Model = i64;
//!     type Message = Msg;
//!     type Arg = ();
//!     type Props = ();
//!     type View = String;
//! }
//!
//! let counter = Component::<Counter>::new(
//!     |_| 0,
//!     |u| match u.message {
//!         Msg::Increment => Some(u.model + 1),
//!         Msg::Decrement => Some(u.model - 1),
//!     },
//!     |v| format!("count: {}", v.model),
//! );
//!
//! let mut instance = counter.mount(Rc::new(()));
//! instance.actions().fire(Msg::Increment);
//! assert_eq!(instance.rerender(), "count: 1");
//! ```

pub mod collections;
pub mod config;
pub mod error;
pub mod host;
pub mod mvi;
pub mod telemetry;

pub use collections::{PersistentList, PersistentRecord};
pub use config::{Config, ConfigError, HostConfig};
pub use error::HostError;
pub use host::{HostRuntime, LocalHost, StateContainer};
pub use mvi::{
    Action, Actions, AfterUpdate, Component, Dispatched, Engine, Init, Instance, Maybe, Message,
    Patchable, Program, Update, View,
};
