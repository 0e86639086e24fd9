//! Retry-on-401 authorization protocol for arbitrary requests.
//!
//! A request failing with status 401 emits a *requested* action so the host can
//! run an out-of-band authentication. The [`Authorizer`] then waits for either a
//! *resolved* action, upon which the request is retried once with the latest
//! state, or a *rejected* action, upon which it gives up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::RequestError;
use crate::{Action, ActionFactory, CancelHandle, Effect, Reaction};

/// Actions taking part in the default authorization protocol.
pub trait AuthorizationActions: Action {
    /// `AUTHENTICATION_REQUESTED`
    fn authentication_requested() -> Self;

    /// `AUTHENTICATION_RESOLVED`
    fn is_authentication_resolved(&self) -> bool;

    /// `AUTHENTICATION_REJECTED`
    fn is_authentication_rejected(&self) -> bool;
}

/// Which actions request, resolve and reject an authentication.
pub struct AuthorizationSpec<A> {
    pub requested: ActionFactory<(), A>,
    pub resolved: fn(&A) -> bool,
    pub rejected: fn(&A) -> bool,
}

impl<A> Clone for AuthorizationSpec<A> {
    fn clone(&self) -> Self {
        Self {
            requested: self.requested.clone(),
            resolved: self.resolved,
            rejected: self.rejected,
        }
    }
}

impl<A: AuthorizationActions> Default for AuthorizationSpec<A> {
    fn default() -> Self {
        Self {
            requested: ActionFactory::new(|()| A::authentication_requested()),
            resolved: A::is_authentication_resolved,
            rejected: A::is_authentication_rejected,
        }
    }
}

type Request<A, S> = Arc<dyn Fn(&S) -> BoxFuture<'static, Result<A, RequestError>> + Send + Sync>;
type Reject<A> = Arc<dyn Fn(RequestError) -> A + Send + Sync>;

/// Issues a request and drives the authorization protocol when it is unauthorized.
///
/// The authorizer is itself a [`Reaction`]: register it (or a reaction wrapping it)
/// so it can observe the resolving and rejecting actions.
pub struct Authorizer<A, S> {
    spec: AuthorizationSpec<A>,
    request: Request<A, S>,
    reject: Reject<A>,
    awaiting: Arc<AtomicBool>,
    inflight: Option<CancelHandle>,
}

impl<A: AuthorizationActions, S> Authorizer<A, S> {
    /// Authorizer using the default `AUTHENTICATION_*` actions.
    ///
    /// `request` builds the request from the latest state and resolves to the
    /// action to emit on success; `reject` maps a definitive failure to an action.
    pub fn new<Q, J>(request: Q, reject: J) -> Self
    where
        Q: Fn(&S) -> BoxFuture<'static, Result<A, RequestError>> + Send + Sync + 'static,
        J: Fn(RequestError) -> A + Send + Sync + 'static,
    {
        Self::with_spec(AuthorizationSpec::default(), request, reject)
    }
}

impl<A: Action, S> Authorizer<A, S> {
    pub fn with_spec<Q, J>(spec: AuthorizationSpec<A>, request: Q, reject: J) -> Self
    where
        Q: Fn(&S) -> BoxFuture<'static, Result<A, RequestError>> + Send + Sync + 'static,
        J: Fn(RequestError) -> A + Send + Sync + 'static,
    {
        Self {
            spec,
            request: Arc::new(request),
            reject: Arc::new(reject),
            awaiting: Arc::new(AtomicBool::new(false)),
            inflight: None,
        }
    }

    /// Issue the request; a 401 starts the authorization protocol, any other
    /// failure is rejected.
    pub fn request(&mut self, state: &S) -> Effect<A> {
        self.issue(state, true)
    }

    /// Request an authentication straight away, then issue the request once resolved.
    pub fn authorize(&mut self) -> Effect<A> {
        self.cancel();
        self.awaiting.store(true, Ordering::SeqCst);
        Effect::just(self.spec.requested.create(()))
    }

    /// Whether a resolving or rejecting action is awaited.
    pub fn is_awaiting(&self) -> bool {
        self.awaiting.load(Ordering::SeqCst)
    }

    /// Cancel the in-flight request and stop awaiting an authentication.
    pub fn cancel(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            inflight.cancel();
        }
        self.awaiting.store(false, Ordering::SeqCst);
    }

    fn issue(&mut self, state: &S, authorize_on_401: bool) -> Effect<A> {
        self.cancel();

        let request = (self.request)(state);
        let reject = self.reject.clone();
        let requested = self.spec.requested.clone();
        let awaiting = self.awaiting.clone();

        let (effect, inflight) = Effect::task(move |emitter| async move {
            match request.await {
                Ok(action) => emitter.emit(action),
                Err(error) if authorize_on_401 && error.is_unauthorized() => {
                    if !emitter.is_cancelled() {
                        awaiting.store(true, Ordering::SeqCst);
                        emitter.emit(requested.create(()));
                    }
                }
                Err(error) => emitter.emit(reject(error)),
            }
        })
        .cancellable();

        self.inflight = Some(inflight);
        effect
    }
}

impl<A: Action, S> Reaction<A, S> for Authorizer<A, S> {
    fn react(&mut self, action: &A, _previous: &S, current: &S) -> Effect<A> {
        if !self.is_awaiting() {
            return Effect::none();
        }

        if (self.spec.resolved)(action) {
            return self.issue(current, false);
        }
        if (self.spec.rejected)(action) {
            self.awaiting.store(false, Ordering::SeqCst);
        }
        Effect::none()
    }
}
