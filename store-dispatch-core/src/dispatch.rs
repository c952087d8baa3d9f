//! Dispatchers: callable entry points over an action tree
//!
//! The root [`Dispatcher`] resolves dot-separated paths against its
//! [`ActionTree`]. Any dispatcher can be narrowed into a [`Subset`] (allow-list
//! of paths or namespace prefixes) or re-rooted with a [`Prefixed`] view;
//! both wrappers are dispatchers themselves, so restriction composes to any
//! depth. Every variant is a small immutable struct holding its parent
//! dispatch capability plus its own restriction data — cheap to create,
//! nothing to tear down.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::action::{ActionTree, Payload};
use crate::error::ActionNotFound;
use crate::path;

/// The dispatch capability: route a path and optional payload to a handler.
///
/// `dispatch_raw` is the single required, object-safe method; [`dispatch`]
/// and [`call`] are the ergonomic entry points. Dispatching either invokes
/// exactly one handler synchronously or fails with [`ActionNotFound`] — there
/// is no other observable effect and no return value from the handler.
///
/// [`dispatch`]: Dispatch::dispatch
/// [`call`]: Dispatch::call
pub trait Dispatch {
    /// Dispatch a path with an optional payload.
    fn dispatch_raw(&self, path: &str, payload: Option<Payload>) -> Result<(), ActionNotFound>;

    /// Dispatch an action that takes a payload.
    ///
    /// ```
    /// # use store_dispatch_core::action::ActionTree;
    /// # use store_dispatch_core::dispatch::{Dispatch, Dispatcher};
    /// # let d = Dispatcher::new(ActionTree::new().on("set_name", |_| {}));
    /// d.dispatch("set_name", "bar")?;
    /// # Ok::<(), store_dispatch_core::error::ActionNotFound>(())
    /// ```
    fn dispatch(&self, path: &str, payload: impl Into<Payload>) -> Result<(), ActionNotFound>
    where
        Self: Sized,
    {
        self.dispatch_raw(path, Some(payload.into()))
    }

    /// Dispatch an action that takes no payload.
    fn call(&self, path: &str) -> Result<(), ActionNotFound> {
        self.dispatch_raw(path, None)
    }
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn dispatch_raw(&self, path: &str, payload: Option<Payload>) -> Result<(), ActionNotFound> {
        (**self).dispatch_raw(path, payload)
    }
}

impl<D: Dispatch + ?Sized> Dispatch for Rc<D> {
    fn dispatch_raw(&self, path: &str, payload: Option<Payload>) -> Result<(), ActionNotFound> {
        (**self).dispatch_raw(path, payload)
    }
}

/// Composition operations available on every cloneable dispatcher.
pub trait DispatchExt: Dispatch + Clone {
    /// Narrow this dispatcher to an allow-list of paths and path prefixes.
    ///
    /// The returned dispatcher accepts a path only if some entry of
    /// `actions` is a segment-wise prefix of it, and rejects everything else
    /// with [`ActionNotFound`]. Narrowing a subset again intersects: a path
    /// must pass every layer.
    fn subset<I, S>(&self, actions: I) -> Subset<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Subset::new(self.clone(), actions)
    }

    /// Re-root this dispatcher under a namespace prefix.
    ///
    /// The returned dispatcher takes paths relative to `prefix` and reports
    /// failures in terms of those relative paths. Prefixing composes
    /// transitively: `d.prefix("a").prefix("b")` dispatches like
    /// `d.prefix("a.b")`.
    fn prefix(&self, prefix: impl Into<String>) -> Prefixed<Self> {
        Prefixed::new(self.clone(), prefix)
    }
}

impl<D: Dispatch + Clone> DispatchExt for D {}

/// Root dispatcher over an action tree.
///
/// Created by [`create_reducer`](crate::reducer::create_reducer) together
/// with its tree; the tree is exclusively owned and read-only from then on.
/// Cloning shares the tree, so handing out copies is cheap.
#[derive(Clone)]
pub struct Dispatcher {
    tree: Rc<ActionTree>,
    name: Option<Rc<str>>,
}

impl Dispatcher {
    /// Create a dispatcher over a finished action tree.
    pub fn new(tree: ActionTree) -> Self {
        Self {
            tree: Rc::new(tree),
            name: None,
        }
    }

    /// Create a dispatcher with a diagnostic name used in trace output.
    pub fn with_name(tree: ActionTree, name: impl Into<String>) -> Self {
        Self {
            tree: Rc::new(tree),
            name: Some(Rc::from(name.into())),
        }
    }

    /// The action tree this dispatcher routes into.
    pub fn tree(&self) -> &ActionTree {
        &self.tree
    }
}

impl Dispatch for Dispatcher {
    fn dispatch_raw(&self, path: &str, payload: Option<Payload>) -> Result<(), ActionNotFound> {
        match self.tree.resolve(path) {
            Some(handler) => {
                if let Some(name) = &self.name {
                    trace!(store = %name, action = %path, "dispatching action");
                } else {
                    trace!(action = %path, "dispatching action");
                }
                handler.invoke(payload);
                Ok(())
            }
            None => Err(ActionNotFound::new(path)),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.name)
            .field("actions", &self.tree.len())
            .finish()
    }
}

/// Dispatcher narrowed to an allow-list of paths and path prefixes.
///
/// The allow-list is captured at creation and immutable afterwards. Allowed
/// paths are forwarded to the parent unmodified; everything else fails with
/// [`ActionNotFound`] carrying the requested path. The list is re-matched on
/// every call — a subset holds no other state.
#[derive(Clone)]
pub struct Subset<D> {
    parent: D,
    allowed: Vec<String>,
}

impl<D: Dispatch> Subset<D> {
    /// Wrap a parent dispatcher with an allow-list.
    pub fn new<I, S>(parent: D, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parent,
            allowed: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// The captured allow-list, in declaration order.
    pub fn allow_list(&self) -> &[String] {
        &self.allowed
    }
}

impl<D: Dispatch> Dispatch for Subset<D> {
    fn dispatch_raw(&self, path: &str, payload: Option<Payload>) -> Result<(), ActionNotFound> {
        if !path::matches_any(&self.allowed, path) {
            return Err(ActionNotFound::new(path));
        }
        self.parent.dispatch_raw(path, payload)
    }
}

impl<D> fmt::Debug for Subset<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subset")
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

/// Dispatcher that addresses a namespace of the parent by relative paths.
///
/// Every call rewrites `rel` to `prefix.rel` and delegates. A failure coming
/// back from the parent is re-reported against the relative path the caller
/// actually used, with the parent's error chained as
/// [`source`](std::error::Error::source). Stacked prefixes each rewrite and
/// re-wrap at their own granularity.
#[derive(Clone)]
pub struct Prefixed<D> {
    parent: D,
    prefix: String,
}

impl<D: Dispatch> Prefixed<D> {
    /// Wrap a parent dispatcher with a fixed path prefix.
    pub fn new(parent: D, prefix: impl Into<String>) -> Self {
        Self {
            parent,
            prefix: prefix.into(),
        }
    }
}

impl<D: Dispatch> Dispatch for Prefixed<D> {
    fn dispatch_raw(&self, path: &str, payload: Option<Payload>) -> Result<(), ActionNotFound> {
        let full = path::join(&self.prefix, path);
        self.parent
            .dispatch_raw(&full, payload)
            .map_err(|inner| ActionNotFound::with_source(path, inner))
    }
}

impl<D> fmt::Debug for Prefixed<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefixed")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
