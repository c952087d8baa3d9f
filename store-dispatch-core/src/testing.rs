//! Test utilities for store-dispatch applications
//!
//! - [`RecordingDispatch`]: a [`Dispatch`] that records calls instead of
//!   resolving them, for exercising [`Subset`](crate::dispatch::Subset) and
//!   [`Prefixed`](crate::dispatch::Prefixed) in isolation
//! - [`watch_values`]: collect store change notifications into a vec
//! - [`expect_not_found`]: assert a dispatch failed for a specific path

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::action::Payload;
use crate::dispatch::Dispatch;
use crate::error::ActionNotFound;
use crate::store::Store;

/// A dispatcher stand-in that records every call it receives.
///
/// In `rejecting` mode it records the call and then fails it with
/// [`ActionNotFound`], which is what a wrapped parent does on an unknown
/// path — useful for testing error re-wrapping.
///
/// # Example
///
/// ```
/// use store_dispatch_core::dispatch::{Dispatch, DispatchExt};
/// use store_dispatch_core::testing::RecordingDispatch;
///
/// let parent = RecordingDispatch::new();
/// parent.prefix("todos").call("add").unwrap();
///
/// assert_eq!(parent.calls(), vec![("todos.add".to_string(), None)]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingDispatch {
    calls: Rc<RefCell<Vec<(String, Option<Payload>)>>>,
    reject_all: bool,
}

impl RecordingDispatch {
    /// A recorder that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that records and then rejects every call.
    pub fn rejecting() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            reject_all: true,
        }
    }

    /// The calls seen so far, in order.
    pub fn calls(&self) -> Vec<(String, Option<Payload>)> {
        self.calls.borrow().clone()
    }

    /// Drain and return the calls seen so far.
    pub fn take_calls(&self) -> Vec<(String, Option<Payload>)> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl Dispatch for RecordingDispatch {
    fn dispatch_raw(&self, path: &str, payload: Option<Payload>) -> Result<(), ActionNotFound> {
        self.calls.borrow_mut().push((path.to_owned(), payload));
        if self.reject_all {
            Err(ActionNotFound::new(path))
        } else {
            Ok(())
        }
    }
}

/// Watch a store path and collect every notified value.
pub fn watch_values(store: &Store, path: &str) -> Rc<RefCell<Vec<Value>>> {
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = values.clone();
    store.watch(path, move |v| sink.borrow_mut().push(v.clone()));
    values
}

/// Assert that a dispatch failed with [`ActionNotFound`] for exactly `path`,
/// returning the error for further inspection.
///
/// # Panics
///
/// Panics if the result is `Ok` or names a different path.
pub fn expect_not_found(result: Result<(), ActionNotFound>, path: &str) -> ActionNotFound {
    match result {
        Ok(()) => panic!("expected ActionNotFound for {path:?}, but dispatch succeeded"),
        Err(err) => {
            assert_eq!(
                err.path(),
                path,
                "expected ActionNotFound for {path:?}, got {:?}",
                err.path()
            );
            err
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_dispatch_records_in_order() {
        let d = RecordingDispatch::new();

        d.call("a").unwrap();
        d.dispatch("b", json!(1)).unwrap();

        assert_eq!(
            d.take_calls(),
            vec![("a".to_string(), None), ("b".to_string(), Some(json!(1)))]
        );
        assert!(d.calls().is_empty());
    }

    #[test]
    fn test_rejecting_mode_records_then_fails() {
        let d = RecordingDispatch::rejecting();

        let err = expect_not_found(d.call("missing"), "missing");
        assert_eq!(err.path(), "missing");
        assert_eq!(d.calls().len(), 1);
    }

    #[test]
    fn test_watch_values() {
        let store = Store::new(json!({"count": 0}));
        let seen = watch_values(&store, "count");

        store.mutator().set("count", 1);
        store.mutator().set("count", 1);
        store.mutator().set("count", 2);

        assert_eq!(*seen.borrow(), vec![json!(1), json!(2)]);
    }
}
