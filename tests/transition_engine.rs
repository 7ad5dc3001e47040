//! Transition engine: merge rules, absent results, secondary transition,
//! and dispatch ordering.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value};

use common::*;
use elmish::host::Dispatch;
use elmish::mvi::fold;
use elmish::{Actions, Dispatched, HostError, PersistentList, Program};

/// A surface whose dispatches are collected instead of applied.
fn detached<T: Program>(props: T::Props) -> (Actions<T>, Rc<RefCell<Vec<Dispatched<T>>>>) {
    let sent = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sent);
    let dispatch: Dispatch<Dispatched<T>> = Rc::new(move |dispatched: Dispatched<T>| {
        sink.borrow_mut().push(dispatched);
        Ok::<(), HostError>(())
    });
    (Actions::synthesize(Rc::new(props), dispatch), sent)
}

fn dispatched<T: Program>(
    cmd: &Actions<T>,
    message: T::Message,
    arguments: Vec<T::Arg>,
) -> Dispatched<T> {
    Dispatched {
        message,
        arguments,
        props: Rc::clone(cmd.props()),
    }
}

#[test]
fn merged_result_keeps_untouched_fields() {
    let model = json!({"a": 1, "b": {"deep": true}, "c": "x"});
    let next = fold(&model, Some(json!({"c": "y", "d": null})));
    for key in ["a", "b"] {
        assert_eq!(next[key], model[key]);
    }
    assert_eq!(next["c"], json!("y"));
    assert_eq!(next["d"], Value::Null);
}

#[test]
fn absent_result_is_a_no_op_for_records() {
    let engine = todo().engine();
    let (cmd, _) = detached::<Todo>(());
    let model = TodoModel {
        items: PersistentList::from(vec![item("milk", false)]),
        input: "bread".into(),
        remaining: 1,
    };
    let next = engine.reduce(&model, &cmd, &dispatched(&cmd, TodoMsg::Noop, vec![]));
    assert_eq!(next, model);
}

#[test]
fn absent_result_replaces_opaque_state() {
    let dynamic = dynamic(json!(5)).mount(props());
    dynamic.actions().fire(DynMsg::Nothing);
    assert_eq!(dynamic.model(), Value::Null);

    let counter = counter().mount(Rc::new(()));
    counter.actions().call(CounterMsg::Increment, [7]);
    counter.actions().fire(CounterMsg::Skip);
    assert_eq!(counter.model(), 0);
}

#[test]
fn object_state_merges_one_level() {
    let instance = dynamic(json!({"user": {"name": "ada", "age": 36}, "n": 1})).mount(props());
    instance
        .actions()
        .call(DynMsg::Merge, [json!({"user": {"age": 37}})]);
    assert_eq!(instance.model(), json!({"user": {"age": 37}, "n": 1}));
}

#[test]
fn non_object_result_over_object_state_is_ignored() {
    let instance = dynamic(json!({"n": 1})).mount(props());
    instance.actions().call(DynMsg::Merge, [json!([1, 2])]);
    assert_eq!(instance.model(), json!({"n": 1}));
}

#[test]
fn after_update_sees_merged_state() {
    let engine = todo_with_remaining().engine();
    assert!(engine.has_after_update());
    let (cmd, _) = detached::<Todo>(());

    let model = TodoModel {
        items: PersistentList::from(vec![item("a", false), item("b", false)]),
        ..Default::default()
    };
    let next = engine.reduce(&model, &cmd, &dispatched(&cmd, TodoMsg::ClickItem, vec![json!(0)]));
    assert_eq!(next.items[0], item("a", true));
    assert_eq!(next.remaining, 1);
    assert_eq!(model.remaining, 0);
}

#[test]
fn after_update_runs_even_when_update_returns_nothing() {
    let engine = todo_with_remaining().engine();
    let (cmd, _) = detached::<Todo>(());
    let model = TodoModel {
        items: PersistentList::from(vec![item("a", false)]),
        ..Default::default()
    };
    let next = engine.reduce(&model, &cmd, &dispatched(&cmd, TodoMsg::Noop, vec![]));
    assert_eq!(next.remaining, 1);
}

#[test]
fn reduce_does_not_apply_dispatches_it_issues() {
    let engine = recorder().engine();
    let (cmd, sent) = detached::<Recorder>("props");
    let model = PersistentList::new();

    let next = engine.reduce(&model, &cmd, &dispatched(&cmd, Step::Burst, vec![]));
    assert_eq!(steps(&next), vec![Step::Burst]);
    let issued: Vec<Step> = sent.borrow().iter().map(|d| d.message).collect();
    assert_eq!(issued, vec![Step::First, Step::Second, Step::Third]);
}

#[test]
fn dispatches_from_a_transition_apply_in_issue_order() {
    let instance = recorder().mount(Rc::new("props"));
    instance.actions().fire(Step::Burst);
    assert_eq!(
        steps(&instance.model()),
        vec![Step::Burst, Step::First, Step::Second, Step::Third]
    );
    assert_eq!(instance.version(), 4);
}

#[test]
fn queued_dispatches_fold_like_sequential_ones() {
    let queued = recorder().mount(Rc::new("props"));
    queued.actions().fire(Step::Burst);

    let engine = recorder().engine();
    let (cmd, _) = detached::<Recorder>("props");
    let sequential = [Step::Burst, Step::First, Step::Second, Step::Third]
        .into_iter()
        .fold(PersistentList::new(), |model, step| {
            engine.reduce(&model, &cmd, &dispatched(&cmd, step, vec![]))
        });
    assert_eq!(queued.model(), sequential);
}

#[test]
fn a_transition_that_dispatches_once_settles() {
    let instance = recorder().mount(Rc::new("props"));
    instance.actions().fire(Step::Ping);
    assert_eq!(steps(&instance.model()), vec![Step::Ping, Step::Pong]);

    instance.actions().fire(Step::First);
    assert_eq!(steps(&instance.model()), vec![Step::Ping, Step::Pong, Step::First]);
}

#[test]
fn arguments_arrive_in_call_order() {
    let instance = recorder().mount(Rc::new("props"));
    instance
        .actions()
        .get(Step::First)
        .bind([1])
        .bind([2, 3])
        .call([4]);
    let log = instance.model();
    assert_eq!(log[0], (Step::First, vec![1, 2, 3, 4]));
}
