//! Todo - nested namespaces and restricted dispatchers
//!
//! A scripted walkthrough:
//! - nested action tree (`todos.add`, `todos.remove`, `todos.toggle`)
//! - `action_paths!` constants instead of string literals
//! - `subset` to hand a component only the actions it may touch
//! - `prefix` for components that think in relative paths
//!
//! Run with RUST_LOG=trace to watch dispatches and store changes.

use serde_json::{json, Value};
use store_dispatch::prelude::*;
use tracing_subscriber::EnvFilter;

action_paths! {
    pub mod paths {
        set_name,
        todos {
            add,
            remove,
            toggle,
        },
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (store, dispatch) = create_reducer_with(
        json!({"name": "inbox", "todos": []}),
        StoreOptions::named("todo"),
        |_store, m| {
            actions!(m => {
                set_name(name) => m.set("name", name),
                todos => {
                    add(todo) => m.update("todos", move |list| {
                        let mut list = list.as_array().cloned().unwrap_or_default();
                        list.push(todo.clone());
                        json!(list)
                    }),
                    remove(id) => m.update("todos", move |list| {
                        let kept: Vec<Value> = list
                            .as_array()
                            .cloned()
                            .unwrap_or_default()
                            .into_iter()
                            .filter(|todo| todo["id"] != id)
                            .collect();
                        json!(kept)
                    }),
                    toggle(id) => m.update(
                        StorePath::root()
                            .key("todos")
                            .matching(move |todo| todo["id"] == id)
                            .key("done"),
                        |done| json!(!done.as_bool().unwrap_or(false)),
                    ),
                },
            })
        },
    );

    store.watch("todos", |todos| println!("todos: {todos}"));

    // Full capability at the root.
    dispatch
        .dispatch(paths::todos::ADD, json!({"id": 1, "text": "water plants", "done": false}))
        .expect("add");
    dispatch
        .dispatch(paths::todos::ADD, json!({"id": 2, "text": "file taxes", "done": false}))
        .expect("add");
    dispatch.dispatch(paths::todos::TOGGLE, 1).expect("toggle");

    // A component that may only touch the todo list.
    let todos_only = dispatch.subset([paths::todos::PREFIX]);
    todos_only.dispatch(paths::todos::REMOVE, 2).expect("remove");
    match todos_only.dispatch(paths::SET_NAME, "sneaky") {
        Ok(()) => unreachable!("set_name is outside the subset"),
        Err(err) => println!("subset rejected it: {err}"),
    }

    // A component that thinks in paths relative to the todos namespace.
    let relative = dispatch.prefix(paths::todos::PREFIX);
    relative
        .dispatch("add", json!({"id": 3, "text": "walk dog", "done": false}))
        .expect("relative add");
    match relative.call("archive") {
        Ok(()) => unreachable!("archive is not registered"),
        Err(err) => println!("prefix reported it relatively: {err}"),
    }

    println!("final state: {}", store.snapshot());
}
