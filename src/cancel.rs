//! Cancellation of in-flight effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::AbortHandle;

/// Cancellation flag shared between a cancellable effect's emitter and its handle.
///
/// Actions emitted under a cancelled scope are discarded by the runtime when they
/// are dequeued, even if they were sent before the effect noticed the cancellation.
#[derive(Clone, Debug, Default)]
pub(crate) struct Scope(Arc<AtomicBool>);

impl Scope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Handle to a cancellable effect, returned by [`Effect::cancellable`](crate::Effect::cancellable).
///
/// Cancelling stops the effect's task at its next suspension point and
/// discards anything it already emitted but the runtime has not yet reduced.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    scope: Scope,
    abort: AbortHandle,
}

impl CancelHandle {
    pub(crate) fn new(scope: Scope, abort: AbortHandle) -> Self {
        Self { scope, abort }
    }

    pub fn cancel(&self) {
        self.scope.cancel();
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.scope.is_cancelled()
    }
}
