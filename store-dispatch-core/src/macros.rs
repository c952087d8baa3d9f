//! Declarative action tree construction

/// Build an [`ActionTree`](crate::action::ActionTree) from a nested listing.
///
/// The first token names the context value (typically the
/// [`Mutator`](crate::store::Mutator)) that every handler closes over; each
/// arm clones it into its own closure, so one binding serves the whole tree.
///
/// Three arm shapes:
///
/// - `name() => body` — handler with no payload
/// - `name(arg) => body` — handler receiving one payload value
/// - `name => { ... }` — nested namespace
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use store_dispatch_core::actions;
/// use store_dispatch_core::store::Store;
///
/// let store = Store::new(json!({"count": 0, "todos": []}));
/// let m = store.mutator();
///
/// let tree = actions!(m => {
///     increment() => m.update("count", |c| json!(c.as_i64().unwrap_or(0) + 1)),
///     todos => {
///         add(todo) => m.update("todos", move |list| {
///             let mut list = list.as_array().cloned().unwrap_or_default();
///             list.push(todo.clone());
///             json!(list)
///         }),
///     },
/// });
///
/// assert!(tree.resolve("increment").is_some());
/// assert!(tree.resolve("todos.add").is_some());
/// ```
#[macro_export]
macro_rules! actions {
    ($ctx:ident => { $($body:tt)* }) => {
        $crate::__actions_tree!($ctx; $crate::action::ActionTree::new(); $($body)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __actions_tree {
    ($ctx:ident; $acc:expr; ) => { $acc };

    // name() => body
    ($ctx:ident; $acc:expr; $name:ident () => $body:expr $(, $($rest:tt)*)?) => {
        $crate::__actions_tree!($ctx;
            $acc.on_unit(stringify!($name), {
                let $ctx = $ctx.clone();
                move || { $body; }
            });
            $($($rest)*)?
        )
    };

    // name(arg) => body
    ($ctx:ident; $acc:expr; $name:ident ($arg:pat_param) => $body:expr $(, $($rest:tt)*)?) => {
        $crate::__actions_tree!($ctx;
            $acc.on(stringify!($name), {
                let $ctx = $ctx.clone();
                move |$arg: $crate::action::Payload| { $body; }
            });
            $($($rest)*)?
        )
    };

    // name => { nested }
    ($ctx:ident; $acc:expr; $name:ident => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $crate::__actions_tree!($ctx;
            $acc.nest(
                stringify!($name),
                $crate::__actions_tree!($ctx; $crate::action::ActionTree::new(); $($inner)*)
            );
            $($($rest)*)?
        )
    };
}
