//! Fine-grained reactive value store
//!
//! The store holds one tree-shaped [`Value`] behind a shared handle. Reads go
//! through [`Store`]; writes go through the [`Mutator`] capability that
//! action handlers close over. Writes are path-addressed partial updates —
//! arbitrary depth, predicate-selected elements of arrays, or whole-value
//! replacement — and watchers are notified only when the subtree they watch
//! actually changed (equality check on the before/after values).
//!
//! Everything here is single-threaded and synchronous: one `Rc`-shared cell,
//! no locks, no suspension points.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{trace, warn};

use crate::path::segments;

/// One step of a store write path.
#[derive(Clone)]
pub enum Step {
    /// Descend into an object field by key.
    Key(String),
    /// Descend into an array element by position.
    Index(usize),
    /// Descend into every array element matching a predicate.
    Where(Rc<dyn Fn(&Value) -> bool>),
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(k) => f.debug_tuple("Key").field(k).finish(),
            Step::Index(i) => f.debug_tuple("Index").field(i).finish(),
            Step::Where(_) => f.write_str("Where(..)"),
        }
    }
}

/// A write path into the store value.
///
/// Built with the chaining constructors, or converted from a dotted key
/// string for the common object-field case:
///
/// ```
/// use store_dispatch_core::store::StorePath;
///
/// let by_string = StorePath::from("profile.name");
/// let by_builder = StorePath::root()
///     .key("todos")
///     .matching(|t| t["id"] == 2)
///     .key("done");
/// # let _ = (by_string, by_builder);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StorePath {
    steps: Vec<Step>,
}

impl StorePath {
    /// The empty path, addressing the whole store value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Append an object-key step.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.steps.push(Step::Key(key.into()));
        self
    }

    /// Append an array-index step.
    pub fn index(mut self, index: usize) -> Self {
        self.steps.push(Step::Index(index));
        self
    }

    /// Append a predicate step selecting every matching array element.
    pub fn matching(mut self, pred: impl Fn(&Value) -> bool + 'static) -> Self {
        self.steps.push(Step::Where(Rc::new(pred)));
        self
    }

    /// The steps of this path.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl From<&str> for StorePath {
    fn from(path: &str) -> Self {
        let steps = segments(path)
            .map(|seg| Step::Key(seg.to_owned()))
            .collect();
        Self { steps }
    }
}

impl From<String> for StorePath {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}

/// Identifies a watcher for removal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct WatchKey(u64);

#[derive(Clone)]
struct Watcher {
    key: WatchKey,
    path: Vec<String>,
    callback: Rc<dyn Fn(&Value)>,
}

struct StoreInner {
    name: Option<String>,
    value: RefCell<Value>,
    watchers: RefCell<Vec<Watcher>>,
    next_watch: Cell<u64>,
}

impl StoreInner {
    /// Compare every watched subtree against `before` and fire the callbacks
    /// whose subtree changed. Callbacks run without any store borrow held, so
    /// they may read the store or register further watchers.
    fn notify(&self, before: &Value) {
        let watchers: Vec<Watcher> = self.watchers.borrow().clone();
        if watchers.is_empty() {
            return;
        }
        let after = self.value.borrow().clone();

        for watcher in watchers {
            let old = resolve_keys(before, &watcher.path);
            let new = resolve_keys(&after, &watcher.path);
            if old != new {
                trace!(path = %watcher.path.join("."), "store change");
                (watcher.callback)(new.unwrap_or(&Value::Null));
            }
        }
    }
}

fn resolve_keys<'a>(value: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

/// Shared read handle over the store value.
///
/// Cloning shares the same underlying value and watcher table.
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

impl Store {
    /// Create a store holding the given initial value.
    pub fn new(initial: Value) -> Self {
        Self::build(initial, None)
    }

    /// Create a store with a diagnostic name used in trace output.
    pub fn named(initial: Value, name: impl Into<String>) -> Self {
        Self::build(initial, Some(name.into()))
    }

    fn build(initial: Value, name: Option<String>) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                name,
                value: RefCell::new(initial),
                watchers: RefCell::new(Vec::new()),
                next_watch: Cell::new(0),
            }),
        }
    }

    /// The diagnostic name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Deep copy of the current value.
    pub fn snapshot(&self) -> Value {
        self.inner.value.borrow().clone()
    }

    /// Run a closure against the current value without copying it.
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Read the subtree at a dotted key path, if present.
    pub fn get(&self, path: &str) -> Option<Value> {
        let keys: Vec<String> = segments(path).map(str::to_owned).collect();
        let value = self.inner.value.borrow();
        resolve_keys(&value, &keys).cloned()
    }

    /// Read and deserialize the subtree at a dotted key path.
    ///
    /// Returns `None` when the path is absent or the subtree does not
    /// deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.get(path)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Watch the subtree at a dotted key path.
    ///
    /// The callback receives the new subtree value after any mutation that
    /// changed it; mutations leaving the subtree equal do not fire. An empty
    /// path watches the whole value. Returns a key for [`unwatch`].
    ///
    /// [`unwatch`]: Store::unwatch
    pub fn watch(&self, path: &str, callback: impl Fn(&Value) + 'static) -> WatchKey {
        let key = WatchKey(self.inner.next_watch.get());
        self.inner.next_watch.set(key.0 + 1);

        let path: Vec<String> = if path.is_empty() {
            Vec::new()
        } else {
            segments(path).map(str::to_owned).collect()
        };

        self.inner.watchers.borrow_mut().push(Watcher {
            key,
            path,
            callback: Rc::new(callback),
        });
        key
    }

    /// Remove a watcher. Unknown keys are a no-op.
    pub fn unwatch(&self, key: WatchKey) {
        self.inner.watchers.borrow_mut().retain(|w| w.key != key);
    }

    /// Hand out the write capability for this store.
    pub fn mutator(&self) -> Mutator {
        Mutator {
            inner: self.inner.clone(),
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("value", &self.inner.value.borrow())
            .finish()
    }
}

/// Write capability over a store.
///
/// Handlers built by a reducer factory close over a clone of this. All writes
/// are applied synchronously and watchers are notified before the call
/// returns.
#[derive(Clone)]
pub struct Mutator {
    inner: Rc<StoreInner>,
}

impl Mutator {
    /// Replace the whole store value.
    pub fn replace(&self, value: Value) {
        self.apply(StorePath::root(), &move |_| value.clone());
    }

    /// Write a value at a path.
    pub fn set(&self, path: impl Into<StorePath>, value: impl Into<Value>) {
        let value = value.into();
        self.apply(path.into(), &move |_| value.clone());
    }

    /// Update the value at a path with a function of its current value.
    ///
    /// With a [`Step::Where`] in the path, the function runs once per
    /// matching element.
    pub fn update(&self, path: impl Into<StorePath>, f: impl Fn(&Value) -> Value) {
        self.apply(path.into(), &f);
    }

    fn apply(&self, path: StorePath, op: &dyn Fn(&Value) -> Value) {
        let before = self.inner.value.borrow().clone();
        {
            let mut value = self.inner.value.borrow_mut();
            apply_steps(&mut value, path.steps(), op);
        }
        self.inner.notify(&before);
    }
}

impl fmt::Debug for Mutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutator")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

fn apply_steps(target: &mut Value, steps: &[Step], op: &dyn Fn(&Value) -> Value) {
    let Some((step, rest)) = steps.split_first() else {
        *target = op(target);
        return;
    };

    match step {
        Step::Key(key) => {
            // Writing through a missing branch creates intermediate objects.
            if target.is_null() {
                *target = Value::Object(serde_json::Map::new());
            }
            match target {
                Value::Object(map) => {
                    let slot = map.entry(key.clone()).or_insert(Value::Null);
                    apply_steps(slot, rest, op);
                }
                _ => warn!(key = %key, "store write through non-object value discarded"),
            }
        }
        Step::Index(index) => match target {
            Value::Array(items) => match items.get_mut(*index) {
                Some(slot) => apply_steps(slot, rest, op),
                None => warn!(index = *index, "store write past end of array discarded"),
            },
            _ => warn!(index = *index, "store write through non-array value discarded"),
        },
        Step::Where(pred) => match target {
            Value::Array(items) => {
                for slot in items.iter_mut().filter(|item| pred(item)) {
                    apply_steps(slot, rest, op);
                }
            }
            _ => warn!("store predicate write through non-array value discarded"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_set_and_get_top_level() {
        let store = Store::new(json!({"count": 0, "name": "foo"}));
        let m = store.mutator();

        m.set("name", "bar");

        assert_eq!(store.get("name"), Some(json!("bar")));
        assert_eq!(store.get("count"), Some(json!(0)));
    }

    #[test]
    fn test_update_with_current_value() {
        let store = Store::new(json!({"count": 1}));
        let m = store.mutator();

        m.update("count", |c| json!(c.as_i64().unwrap_or(0) + 1));

        assert_eq!(store.get("count"), Some(json!(2)));
    }

    #[test]
    fn test_nested_write_creates_intermediate_objects() {
        let store = Store::new(json!({}));
        let m = store.mutator();

        m.set("profile.address.city", "Porto");

        assert_eq!(store.get("profile.address.city"), Some(json!("Porto")));
    }

    #[test]
    fn test_index_write() {
        let store = Store::new(json!({"items": [1, 2, 3]}));
        let m = store.mutator();

        m.set(StorePath::root().key("items").index(1), 20);
        m.set(StorePath::root().key("items").index(9), 90);

        assert_eq!(store.get("items"), Some(json!([1, 20, 3])));
    }

    #[test]
    fn test_predicate_write_touches_every_match() {
        let store = Store::new(json!({
            "todos": [
                {"id": 1, "done": false},
                {"id": 2, "done": false},
                {"id": 3, "done": false},
            ]
        }));
        let m = store.mutator();

        m.update(
            StorePath::root()
                .key("todos")
                .matching(|t| t["id"] != 2)
                .key("done"),
            |done| json!(!done.as_bool().unwrap_or(false)),
        );

        assert_eq!(
            store.get("todos"),
            Some(json!([
                {"id": 1, "done": true},
                {"id": 2, "done": false},
                {"id": 3, "done": true},
            ]))
        );
    }

    #[test]
    fn test_replace_whole_value() {
        let initial = json!({"count": 0, "todos": []});
        let store = Store::new(initial.clone());
        let m = store.mutator();

        m.set("count", 5);
        m.replace(initial.clone());

        assert_eq!(store.snapshot(), initial);
    }

    #[test]
    fn test_watch_fires_with_new_subtree() {
        let store = Store::new(json!({"count": 0, "name": "foo"}));
        let m = store.mutator();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.watch("count", move |v| sink.borrow_mut().push(v.clone()));

        m.set("count", 1);
        m.set("count", 2);

        assert_eq!(*seen.borrow(), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_watch_skips_equal_writes() {
        let store = Store::new(json!({"count": 0}));
        let m = store.mutator();

        let fired = Rc::new(Cell::new(0));
        let sink = fired.clone();
        store.watch("count", move |_| sink.set(sink.get() + 1));

        m.set("count", 0);
        assert_eq!(fired.get(), 0);

        m.set("count", 1);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_watch_is_scoped_to_its_subtree() {
        let store = Store::new(json!({"count": 0, "name": "foo"}));
        let m = store.mutator();

        let fired = Rc::new(Cell::new(0));
        let sink = fired.clone();
        store.watch("count", move |_| sink.set(sink.get() + 1));

        m.set("name", "bar");
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_watch_root_sees_every_change() {
        let store = Store::new(json!({"count": 0}));
        let m = store.mutator();

        let fired = Rc::new(Cell::new(0));
        let sink = fired.clone();
        store.watch("", move |_| sink.set(sink.get() + 1));

        m.set("count", 1);
        m.replace(json!({"count": 0}));

        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_unwatch() {
        let store = Store::new(json!({"count": 0}));
        let m = store.mutator();

        let fired = Rc::new(Cell::new(0));
        let sink = fired.clone();
        let key = store.watch("count", move |_| sink.set(sink.get() + 1));

        m.set("count", 1);
        store.unwatch(key);
        m.set("count", 2);

        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_write_through_scalar_is_discarded() {
        let store = Store::new(json!({"count": 0}));
        let m = store.mutator();

        m.set("count.nested", 1);

        assert_eq!(store.snapshot(), json!({"count": 0}));
    }

    #[test]
    fn test_get_as_deserializes_subtrees() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Todo {
            id: i64,
            done: bool,
        }

        let store = Store::new(json!({"todos": [{"id": 1, "done": false}]}));

        let todos: Vec<Todo> = store.get_as("todos").unwrap();
        assert_eq!(todos, vec![Todo { id: 1, done: false }]);

        assert_eq!(store.get_as::<Vec<Todo>>("missing"), None);
        assert_eq!(store.get_as::<i64>("todos"), None);
    }

    #[test]
    fn test_watcher_callback_may_read_store() {
        let store = Store::new(json!({"count": 0, "echo": 0}));
        let m = store.mutator();

        let reader = store.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.watch("count", move |_| {
            sink.borrow_mut().push(reader.get("count").unwrap());
        });

        m.set("count", 3);

        assert_eq!(*seen.borrow(), vec![json!(3)]);
    }
}
