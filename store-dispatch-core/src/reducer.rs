//! Creation entry point: wire a store to an action tree
//!
//! [`create_reducer`] is the one place a store and its dispatcher come into
//! being. The user factory runs exactly once, synchronously, receiving the
//! readable store handle and the write capability; whatever tree it returns
//! is frozen into the root [`Dispatcher`].

use serde_json::Value;
use tracing::debug;

use crate::action::ActionTree;
use crate::dispatch::Dispatcher;
use crate::store::{Mutator, Store};

/// Options for [`create_reducer_with`].
#[derive(Clone, Debug, Default)]
pub struct StoreOptions {
    /// Diagnostic name attached to the store and its dispatcher.
    pub name: Option<String>,
}

impl StoreOptions {
    /// Options carrying a diagnostic name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Create a store from an initial value and a dispatcher over the actions
/// the factory registers.
///
/// The factory is called exactly once, synchronously, with a read handle on
/// the store and the [`Mutator`] its handlers should close over.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use store_dispatch_core::actions;
/// use store_dispatch_core::dispatch::Dispatch;
/// use store_dispatch_core::reducer::create_reducer;
///
/// let (store, dispatch) = create_reducer(json!({"count": 0}), |_store, m| {
///     actions!(m => {
///         increment() => m.update("count", |c| json!(c.as_i64().unwrap_or(0) + 1)),
///     })
/// });
///
/// dispatch.call("increment")?;
/// assert_eq!(store.get("count"), Some(json!(1)));
/// # Ok::<(), store_dispatch_core::error::ActionNotFound>(())
/// ```
pub fn create_reducer<F>(initial: Value, factory: F) -> (Store, Dispatcher)
where
    F: FnOnce(Store, Mutator) -> ActionTree,
{
    create_reducer_with(initial, StoreOptions::default(), factory)
}

/// [`create_reducer`] with options.
pub fn create_reducer_with<F>(
    initial: Value,
    options: StoreOptions,
    factory: F,
) -> (Store, Dispatcher)
where
    F: FnOnce(Store, Mutator) -> ActionTree,
{
    let store = match &options.name {
        Some(name) => Store::named(initial, name.clone()),
        None => Store::new(initial),
    };

    let tree = factory(store.clone(), store.mutator());
    debug!(
        store = %options.name.as_deref().unwrap_or("<unnamed>"),
        actions = tree.len(),
        "reducer created"
    );

    let dispatcher = match options.name {
        Some(name) => Dispatcher::with_name(tree, name),
        None => Dispatcher::new(tree),
    };

    (store, dispatcher)
}
