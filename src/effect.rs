//! Declarative effect system for describing deferred action processing.

use core::future::Future;

use futures::future::{self, AbortHandle, Abortable, BoxFuture, FutureExt};

use crate::cancel::{CancelHandle, Scope};
use crate::{Action, Emitter};

type Job<A> = Box<dyn FnOnce(&Emitter<A>) -> Option<BoxFuture<'static, ()>> + Send>;

/// Declarative description of follow-up work.
///
/// Effects are returned by [`Reaction`](crate::Reaction)s and by
/// [`ControllerLogic::init`](crate::ControllerLogic::init). The runtime executes
/// them right after the tick that produced them: synchronous emissions are queued
/// immediately, asynchronous tasks are spawned and tracked until they finish or
/// the controller is disposed.
///
/// # Example
///
/// ```rust
/// use vault_controllers::{Action, Effect};
///
/// #[derive(Clone, Debug)]
/// enum Event { Refresh, Loaded(String) }
///
/// impl Action for Event {
///     fn kind(&self) -> &'static str {
///         match self {
///             Event::Refresh => "REFRESH",
///             Event::Loaded(_) => "LOADED",
///         }
///     }
/// }
///
/// // Trigger a follow-up action
/// let effect = Effect::just(Event::Refresh);
///
/// // Resolve an asynchronous result into an action
/// let effect = effect.and(Effect::perform(async { Event::Loaded("cached".to_string()) }));
///
/// // No side effects
/// let effect: Effect<Event> = Effect::none();
/// assert!(effect.is_none());
/// ```
pub struct Effect<A>(Vec<Job<A>>);

impl<A: Action> Effect<A> {
    /// Create an empty effect.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Emit a single action as soon as the effect runs.
    pub fn just(action: A) -> Self {
        Self(vec![Box::new(move |emitter: &Emitter<A>| {
            emitter.emit(action);
            None
        })])
    }

    /// Run a side effect that emits nothing, e.g. invoking a host callback.
    pub fn call<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(vec![Box::new(move |_: &Emitter<A>| {
            f();
            None
        })])
    }

    /// Spawn an asynchronous task that may emit any number of actions.
    pub fn task<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Emitter<A>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self(vec![Box::new(move |emitter: &Emitter<A>| {
            Some(f(emitter.clone()).boxed())
        })])
    }

    /// Await a future and emit the action it resolves to.
    pub fn perform<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::task(move |emitter| async move {
            let action = future.await;
            emitter.emit(action);
        })
    }

    /// Combine multiple effects into a single effect, preserving their order.
    pub fn batch(effects: Vec<Effect<A>>) -> Self {
        Self(effects.into_iter().flat_map(|effect| effect.0).collect())
    }

    pub fn and(mut self, other: Effect<A>) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Make this effect cancellable.
    ///
    /// Once the returned handle is cancelled the effect's tasks are aborted and
    /// any action they emitted that was not reduced yet is discarded.
    pub fn cancellable(self) -> (Self, CancelHandle) {
        let scope = Scope::new();
        let (abort, registration) = AbortHandle::new_pair();
        let handle = CancelHandle::new(scope.clone(), abort);

        let effect = Self(vec![Box::new(move |emitter: &Emitter<A>| {
            let scoped = emitter.scoped(scope);
            let task = self.execute(&scoped)?;
            Some(
                Abortable::new(task, registration)
                    .map(|_| ())
                    .boxed(),
            )
        })]);

        (effect, handle)
    }

    /// Run every job against `emitter`.
    ///
    /// Returns the combined asynchronous remainder, if any job spawned a task.
    pub(crate) fn execute(self, emitter: &Emitter<A>) -> Option<BoxFuture<'static, ()>> {
        let mut tasks: Vec<BoxFuture<'static, ()>> =
            self.0.into_iter().filter_map(|job| job(emitter)).collect();

        match tasks.len() {
            0 => None,
            1 => tasks.pop(),
            _ => Some(future::join_all(tasks).map(|_| ()).boxed()),
        }
    }
}
