//! store-dispatch: path-addressed actions over a reactive value store
//!
//! Define a tree of named mutation handlers once, get back a live store plus
//! a `dispatch("todos.add", payload)` entry point, and hand components
//! restricted views of it: `subset` narrows to an allow-list, `prefix`
//! re-roots under a namespace. Restriction composes to any depth.
//!
//! # Example
//! ```
//! use serde_json::json;
//! use store_dispatch::prelude::*;
//!
//! let (store, dispatch) = create_reducer(json!({"count": 0}), |_store, m| {
//!     actions!(m => {
//!         increment() => m.update("count", |c| json!(c.as_i64().unwrap_or(0) + 1)),
//!     })
//! });
//!
//! dispatch.call("increment")?;
//! assert_eq!(store.get("count"), Some(json!(1)));
//! # Ok::<(), store_dispatch::ActionNotFound>(())
//! ```

// Re-export everything from core
pub use store_dispatch_core::*;

// Re-export the proc macros
pub use store_dispatch_macros::action_paths;

/// Prelude for convenient imports
pub mod prelude {
    pub use store_dispatch_core::prelude::*;
    pub use store_dispatch_macros::action_paths;
}
