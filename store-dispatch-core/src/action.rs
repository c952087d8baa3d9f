//! Action tree: named handlers arranged in nested namespaces
//!
//! An [`ActionTree`] maps action names to handlers or to further trees. It is
//! built once by the user's factory at
//! [`create_reducer`](crate::reducer::create_reducer) time and never mutated
//! afterwards; the only way to change handlers is to rebuild the whole
//! dispatcher.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::path::segments;

/// Payload carried by a dispatched action.
pub type Payload = Value;

/// A registered action handler.
///
/// Handlers come in two shapes and the shape is part of the registration, not
/// a runtime inspection of the function value:
///
/// - [`Handler::Unit`] takes no payload. A payload supplied at dispatch time
///   is ignored.
/// - [`Handler::Payload`] takes exactly one payload. Dispatching without one
///   invokes it with [`Value::Null`].
pub enum Handler {
    /// Handler for an action with no payload.
    Unit(Box<dyn Fn()>),
    /// Handler for an action carrying one payload value.
    Payload(Box<dyn Fn(Payload)>),
}

impl Handler {
    /// Invoke the handler with an optional payload.
    pub fn invoke(&self, payload: Option<Payload>) {
        match self {
            Handler::Unit(f) => f(),
            Handler::Payload(f) => f(payload.unwrap_or(Value::Null)),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Unit(_) => f.write_str("Handler::Unit"),
            Handler::Payload(_) => f.write_str("Handler::Payload"),
        }
    }
}

/// One node of the action tree: a terminal handler or a nested namespace.
#[derive(Debug)]
pub enum ActionNode {
    /// A dispatchable handler.
    Leaf(Handler),
    /// A nested namespace of further actions.
    Namespace(ActionTree),
}

/// Nested mapping from action names to handlers or sub-trees.
///
/// # Example
///
/// ```
/// use store_dispatch_core::action::ActionTree;
///
/// let tree = ActionTree::new()
///     .on_unit("increment", || {})
///     .nest(
///         "todos",
///         ActionTree::new().on("add", |_todo| {}),
///     );
///
/// assert!(tree.resolve("increment").is_some());
/// assert!(tree.resolve("todos.add").is_some());
/// assert!(tree.resolve("todos").is_none());
/// ```
#[derive(Debug, Default)]
pub struct ActionTree {
    entries: BTreeMap<String, ActionNode>,
}

impl ActionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler that takes one payload value.
    pub fn on(self, name: impl Into<String>, handler: impl Fn(Payload) + 'static) -> Self {
        self.insert(name, ActionNode::Leaf(Handler::Payload(Box::new(handler))))
    }

    /// Register a handler that takes no payload.
    pub fn on_unit(self, name: impl Into<String>, handler: impl Fn() + 'static) -> Self {
        self.insert(name, ActionNode::Leaf(Handler::Unit(Box::new(handler))))
    }

    /// Register a nested namespace of actions.
    pub fn nest(self, name: impl Into<String>, tree: ActionTree) -> Self {
        self.insert(name, ActionNode::Namespace(tree))
    }

    /// Insert a node under a name, replacing any existing entry.
    pub fn insert(mut self, name: impl Into<String>, node: ActionNode) -> Self {
        self.entries.insert(name.into(), node);
        self
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if this level has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries at this level.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walk the tree along a dot-separated path to a terminal handler.
    ///
    /// A path resolves only when it descends one namespace per segment and
    /// lands exactly on a leaf:
    ///
    /// - a missing key at any level is `None`
    /// - segments left over after reaching a leaf are `None`
    /// - a path ending on a namespace (not a leaf) is `None`
    pub fn resolve(&self, path: &str) -> Option<&Handler> {
        let mut current = self;
        let mut segs = segments(path).peekable();

        while let Some(seg) = segs.next() {
            match current.entries.get(seg)? {
                ActionNode::Leaf(handler) => {
                    return if segs.peek().is_none() {
                        Some(handler)
                    } else {
                        // Cannot descend through a leaf.
                        None
                    };
                }
                ActionNode::Namespace(tree) => current = tree,
            }
        }

        // All segments consumed on a namespace node.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample_tree(hits: Rc<Cell<u32>>) -> ActionTree {
        let unit_hits = hits.clone();
        ActionTree::new()
            .on_unit("increment", move || unit_hits.set(unit_hits.get() + 1))
            .nest(
                "todos",
                ActionTree::new()
                    .on("add", |_| {})
                    .on("remove", |_| {})
                    .nest("archive", ActionTree::new().on("restore", |_| {})),
            )
    }

    #[test]
    fn test_resolve_top_level_leaf() {
        let tree = sample_tree(Rc::new(Cell::new(0)));
        assert!(tree.resolve("increment").is_some());
    }

    #[test]
    fn test_resolve_nested_leaf() {
        let tree = sample_tree(Rc::new(Cell::new(0)));
        assert!(tree.resolve("todos.add").is_some());
        assert!(tree.resolve("todos.archive.restore").is_some());
    }

    #[test]
    fn test_resolve_missing_key() {
        let tree = sample_tree(Rc::new(Cell::new(0)));
        assert!(tree.resolve("decrement").is_none());
        assert!(tree.resolve("todos.toggle").is_none());
    }

    #[test]
    fn test_resolve_namespace_is_not_a_handler() {
        let tree = sample_tree(Rc::new(Cell::new(0)));
        assert!(tree.resolve("todos").is_none());
        assert!(tree.resolve("todos.archive").is_none());
    }

    #[test]
    fn test_resolve_cannot_descend_through_leaf() {
        let tree = sample_tree(Rc::new(Cell::new(0)));
        assert!(tree.resolve("increment.more").is_none());
        assert!(tree.resolve("todos.add.deeper").is_none());
    }

    #[test]
    fn test_resolve_empty_path() {
        let tree = sample_tree(Rc::new(Cell::new(0)));
        assert!(tree.resolve("").is_none());
    }

    #[test]
    fn test_unit_handler_ignores_payload() {
        let hits = Rc::new(Cell::new(0));
        let tree = sample_tree(hits.clone());

        let handler = tree.resolve("increment").unwrap();
        handler.invoke(None);
        handler.invoke(Some(Value::from(42)));

        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_payload_handler_receives_null_when_omitted() {
        let seen = Rc::new(Cell::new(false));
        let seen_in = seen.clone();
        let tree = ActionTree::new().on("probe", move |payload| {
            assert_eq!(payload, Value::Null);
            seen_in.set(true);
        });

        tree.resolve("probe").unwrap().invoke(None);
        assert!(seen.get());
    }

    #[test]
    fn test_insert_replaces_existing_entry() {
        let tree = ActionTree::new().on_unit("a", || {}).on("a", |_| {});

        assert_eq!(tree.len(), 1);
        assert!(matches!(
            tree.resolve("a"),
            Some(Handler::Payload(_))
        ));
    }
}
