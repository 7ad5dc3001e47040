//! Shared fixtures for integration tests.
#![allow(dead_code, unused_imports)]

use std::rc::Rc;

use serde::Serialize;
use serde_json::{json, Value};

use elmish::{messages, record, Component, Instance, PersistentList, Program};

// -- Counter ------------------------------------------------------------------

messages! {
    pub enum CounterMsg {
        Increment,
        Decrement,
        Skip,
    }
}

/// Opaque `i64` state. `Skip` returns nothing, which resets the count.
pub struct Counter;

impl Program for Counter {
    type Model = i64;
    type Message = CounterMsg;
    type Arg = i64;
    type Props = ();
    type View = String;
}

pub fn counter() -> Component<Counter> {
    Component::<Counter>::new(
        |_| 0,
        |u| match u.message {
            CounterMsg::Increment => Some(u.model + u.arg(0).copied().unwrap_or(1)),
            CounterMsg::Decrement => Some(u.model - 1),
            CounterMsg::Skip => None,
        },
        |v| format!("count: {}", v.model),
    )
}

// -- Todo list ----------------------------------------------------------------

record! {
    #[derive(Debug, Serialize)]
    pub struct Item => ItemPatch {
        pub text: String,
        pub done: bool,
    }
}

record! {
    #[derive(Debug)]
    pub struct TodoModel => TodoPatch {
        pub items: PersistentList<Item>,
        pub input: String,
        pub remaining: usize,
    }
}

messages! {
    pub enum TodoMsg {
        SetInput,
        AddItem,
        ClickItem,
        Noop,
    }
}

/// Record state with JSON arguments, mirroring an event-handler surface.
pub struct Todo;

impl Program for Todo {
    type Model = TodoModel;
    type Message = TodoMsg;
    type Arg = Value;
    type Props = ();
    type View = Vec<String>;
}

pub fn item(text: &str, done: bool) -> Item {
    Item {
        text: text.to_string(),
        done,
    }
}

/// Clicking an item marks it done; clicking a done item removes it.
pub fn todo() -> Component<Todo> {
    Component::<Todo>::new(
        |_| TodoModel::default(),
        |u| match u.message {
            TodoMsg::SetInput => Some(TodoPatch {
                input: u.arg(0).and_then(Value::as_str).map(str::to_string),
                ..Default::default()
            }),
            TodoMsg::AddItem => Some(TodoPatch {
                items: Some(u.model.items.append(item(&u.model.input, false))),
                input: Some(String::new()),
                ..Default::default()
            }),
            TodoMsg::ClickItem => {
                let index = u.arg(0).and_then(Value::as_u64)? as usize;
                let items = u.model.items.mutate_at(
                    index,
                    |item| item.done,
                    |_| ItemPatch {
                        done: Some(true),
                        ..Default::default()
                    },
                );
                Some(TodoPatch {
                    items: Some(items),
                    ..Default::default()
                })
            }
            TodoMsg::Noop => None,
        },
        |v| {
            v.model
                .items
                .iter()
                .map(|item| format!("[{}] {}", if item.done { "x" } else { " " }, item.text))
                .collect()
        },
    )
}

/// [`todo`] plus a derived `remaining` count.
pub fn todo_with_remaining() -> Component<Todo> {
    todo().with_after_update(|a| {
        Some(TodoPatch {
            remaining: Some(a.model.items.iter().filter(|item| !item.done).count()),
            ..Default::default()
        })
    })
}

pub fn mount_todo() -> Instance<Todo> {
    todo().mount(Rc::new(()))
}

// -- Recorder -----------------------------------------------------------------

messages! {
    pub enum Step {
        First,
        Second,
        Third,
        Burst,
        Ping,
        Pong,
    }
}

/// State is the log of every transition it has seen.
///
/// `Burst` dispatches `First`, `Second`, `Third` from inside the transition;
/// `Ping` dispatches `Pong` once.
pub struct Recorder;

impl Program for Recorder {
    type Model = PersistentList<(Step, Vec<i64>)>;
    type Message = Step;
    type Arg = i64;
    type Props = &'static str;
    type View = usize;
}

pub fn recorder() -> Component<Recorder> {
    Component::<Recorder>::new(
        |_| PersistentList::new(),
        |u| {
            match u.message {
                Step::Burst => {
                    u.cmd.fire(Step::First);
                    u.cmd.fire(Step::Second);
                    u.cmd.fire(Step::Third);
                }
                Step::Ping => u.cmd.fire(Step::Pong),
                _ => {}
            }
            Some(u.model.append((u.message, u.arguments.to_vec())))
        },
        |v| v.model.len(),
    )
}

/// Message names of a recorder log, in order.
pub fn steps(log: &PersistentList<(Step, Vec<i64>)>) -> Vec<Step> {
    log.iter().map(|(step, _)| *step).collect()
}

// -- Dynamic state ------------------------------------------------------------

messages! {
    pub enum DynMsg {
        Merge,
        Nothing,
    }
}

/// `serde_json::Value` state; `Merge` returns its first argument as-is.
pub struct Dynamic;

impl Program for Dynamic {
    type Model = Value;
    type Message = DynMsg;
    type Arg = Value;
    type Props = Value;
    type View = Value;
}

pub fn dynamic(initial: Value) -> Component<Dynamic> {
    Component::<Dynamic>::new(
        move |_| initial.clone(),
        |u| match u.message {
            DynMsg::Merge => u.arg(0).cloned(),
            DynMsg::Nothing => None,
        },
        |v| v.model.clone(),
    )
}

pub fn props() -> Rc<Value> {
    Rc::new(json!({}))
}
