//! Core types for store-dispatch
//!
//! This crate provides a path-addressed action dispatch layer over a small
//! fine-grained reactive value store.
//!
//! # Core Concepts
//!
//! - **Store**: one tree-shaped value behind a shared handle, with
//!   equality-checked change watchers
//! - **Mutator**: the write capability handlers close over; path-addressed
//!   partial updates at arbitrary depth
//! - **ActionTree**: named handlers arranged in nested namespaces, built once
//!   by a user factory
//! - **Dispatcher**: the callable entry point; routes dot-separated paths
//!   like `"todos.add"` to handlers
//! - **Subset / Prefixed**: derived dispatchers that narrow the addressable
//!   action space or re-root it under a namespace
//!
//! # Basic Example
//!
//! ```
//! use serde_json::json;
//! use store_dispatch_core::prelude::*;
//!
//! let (store, dispatch) = create_reducer(json!({"count": 0, "todos": []}), |_store, m| {
//!     actions!(m => {
//!         increment() => m.update("count", |c| json!(c.as_i64().unwrap_or(0) + 1)),
//!         todos => {
//!             add(todo) => m.update("todos", move |list| {
//!                 let mut list = list.as_array().cloned().unwrap_or_default();
//!                 list.push(todo.clone());
//!                 json!(list)
//!             }),
//!         },
//!     })
//! });
//!
//! dispatch.call("increment")?;
//! dispatch.dispatch("todos.add", json!({"id": 1, "text": "ship it"}))?;
//!
//! assert_eq!(store.get("count"), Some(json!(1)));
//!
//! // Hand a component only what it may touch.
//! let todos_only = dispatch.subset(["todos"]);
//! assert!(todos_only.call("increment").is_err());
//! # Ok::<(), store_dispatch_core::error::ActionNotFound>(())
//! ```
//!
//! # Restricted capabilities
//!
//! `subset` and `prefix` return dispatchers themselves, so views compose:
//! a subset of a prefix checks relative paths, and stacked prefixes
//! concatenate. Each derived dispatcher is an immutable value holding only
//! its parent capability and its restriction data.

pub mod action;
pub mod dispatch;
pub mod error;
mod macros;
pub mod path;
pub mod reducer;
pub mod store;
pub mod testing;

// Core exports
pub use action::{ActionNode, ActionTree, Handler, Payload};
pub use dispatch::{Dispatch, DispatchExt, Dispatcher, Prefixed, Subset};
pub use error::ActionNotFound;
pub use reducer::{create_reducer, create_reducer_with, StoreOptions};
pub use store::{Mutator, Step, Store, StorePath, WatchKey};

// Re-export the payload value type for convenience
pub use serde_json::Value;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{ActionNode, ActionTree, Handler, Payload};
    pub use crate::actions;
    pub use crate::dispatch::{Dispatch, DispatchExt, Dispatcher, Prefixed, Subset};
    pub use crate::error::ActionNotFound;
    pub use crate::reducer::{create_reducer, create_reducer_with, StoreOptions};
    pub use crate::store::{Mutator, Step, Store, StorePath, WatchKey};

    pub use serde_json::Value;
}
