//! Observability hook for controller loops.

use core::fmt::Debug;

use crate::Action;

/// Taps into a controller loop.
///
/// Every method defaults to a no-op. Install one with
/// [`ControllerRuntime::with_observer`](crate::ControllerRuntime::with_observer).
pub trait Observer<A, S, V>: Send {
    /// An action is about to be reduced.
    fn on_action(&self, _action: &A) {}

    /// The reducer produced a new state.
    fn on_state(&self, _state: &S) {}

    /// A new view-props snapshot is about to be rendered.
    fn on_view_props(&self, _props: &V) {}
}

/// The default observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<A, S, V> Observer<A, S, V> for NoopObserver {}

/// Logs every tap through `tracing`, labelled with the controller name.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    label: &'static str,
}

impl TracingObserver {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl<A, S, V> Observer<A, S, V> for TracingObserver
where
    A: Action,
    S: Debug,
    V: Debug,
{
    fn on_action(&self, action: &A) {
        tracing::debug!(controller = self.label, kind = action.kind(), ?action, "event");
    }

    fn on_state(&self, state: &S) {
        tracing::trace!(controller = self.label, ?state, "state");
    }

    fn on_view_props(&self, props: &V) {
        tracing::trace!(controller = self.label, ?props, "view-props");
    }
}
