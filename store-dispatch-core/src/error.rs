//! The single error kind surfaced by dispatch

use thiserror::Error;

/// Error returned when a dispatched path fails to resolve or is disallowed.
///
/// The carried path is always the path exactly as the caller supplied it.
/// A dispatcher created with [`prefix`](crate::dispatch::DispatchExt::prefix)
/// reports failures in terms of its own relative paths and chains the error
/// from the layer below as [`source`](std::error::Error::source), so the
/// fully-qualified path the innermost resolver saw stays available for
/// diagnostics:
///
/// ```
/// use std::error::Error;
/// use store_dispatch_core::error::ActionNotFound;
///
/// let inner = ActionNotFound::new("todos.missing");
/// let outer = ActionNotFound::with_source("missing", inner);
///
/// assert_eq!(outer.path(), "missing");
/// assert_eq!(outer.to_string(), r#"action "missing" not found"#);
/// assert!(outer.source().unwrap().to_string().contains("todos.missing"));
/// ```
#[derive(Debug, Clone, Error)]
#[error("action \"{path}\" not found")]
pub struct ActionNotFound {
    path: String,
    #[source]
    source: Option<Box<ActionNotFound>>,
}

impl ActionNotFound {
    /// Create an error for the given requested path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: None,
        }
    }

    /// Create an error for `path` caused by a failure at an inner layer.
    pub fn with_source(path: impl Into<String>, source: ActionNotFound) -> Self {
        Self {
            path: path.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The path that failed to resolve, verbatim as the caller supplied it.
    pub fn path(&self) -> &str {
        &self.path
    }
}
