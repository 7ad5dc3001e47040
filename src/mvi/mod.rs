//! Model-View-Update primitives.
//!
//! This module provides the building blocks of unidirectional data flow
//! for one stateful component.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ dispatch ──→ Engine ──→ Model ──→ View
//!    ↑                                          │
//!    └──────────────────────────────────────────┘
//! ```
//!
//! - **Model**: state owned by one component instance, folded from
//!   partial results ([`Patchable`])
//! - **Message**: symbolic tag selecting the transition branch
//! - **Engine**: `update` plus optional `after_update`, the only place where
//!   state transitions happen
//! - **Actions**: callables synthesized per message, handed to every stage
//!   as `cmd`

mod actions;
mod component;
mod engine;
mod message;
mod params;
mod patch;
mod program;

pub use actions::{Action, Actions};
pub use component::{Component, InitFn, Instance, ViewFn};
pub use engine::{fold, AfterUpdateFn, Engine, UpdateFn};
pub use message::{Dispatched, Message};
pub use params::{AfterUpdate, Init, Update, View};
pub use patch::{Maybe, Patchable};
pub use program::Program;
