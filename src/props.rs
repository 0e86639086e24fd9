//! Building blocks shared by host props and view props.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Passthrough attributes, forwarded verbatim from host props to view props.
pub type Attrs = BTreeMap<String, String>;

/// A callback carried in props.
///
/// Host props use handlers to receive notifications from a controller
/// (`on_done`, `on_authenticated`, ...). View props use handlers bound with
/// [`Emitter::bind`](crate::Emitter::bind) to dispatch actions.
///
/// Handlers compare by identity: two handlers are equal only when they are clones
/// of the same callback. This keeps view props shallow-comparable, so a snapshot
/// whose handlers were bound once per mount compares equal across ticks.
pub struct Handler<T>(Arc<dyn Fn(T) + Send + Sync>);

impl<T> Handler<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, value: T) {
        (self.0)(value)
    }
}

impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for Handler<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}
