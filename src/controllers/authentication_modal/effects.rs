use std::sync::Arc;

use futures::StreamExt;

use super::{
    AuthenticationModalAction as Action, AuthenticationModalEnv, AuthenticationModalState, AuthenticationState,
};
use crate::{call_handler_on, Authenticator, CancelHandle, Effect, Reaction, Reactions, RequestError};

pub(super) fn reactions(env: AuthenticationModalEnv) -> Reactions<Action, AuthenticationModalState> {
    Reactions::new()
        .with(call_handler_on(
            |action: &Action| matches!(action, Action::Cancel),
            |state: &AuthenticationModalState| state.props.on_cancel.as_ref(),
            |_: &AuthenticationModalState, _: &Action| (),
        ))
        .with(call_handler_on(
            |action: &Action| matches!(action, Action::Submit),
            |state: &AuthenticationModalState| state.props.on_submit.as_ref(),
            |state: &AuthenticationModalState, _: &Action| state.value.clone(),
        ))
        .with(AuthenticateOnSubmit::new(env.authenticator))
}

/// Authenticates the submitted passphrase, one request at a time.
struct AuthenticateOnSubmit {
    authenticator: Arc<dyn Authenticator>,
    inflight: Option<CancelHandle>,
}

impl AuthenticateOnSubmit {
    fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            inflight: None,
        }
    }

    fn cancel(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            inflight.cancel();
        }
    }

    fn authenticate(&mut self, state: &AuthenticationModalState) -> Effect<Action> {
        self.cancel();

        let Some(on_authenticated) = state.props.on_authenticated.clone() else {
            return Effect::none();
        };
        let mut sessions = self.authenticator.authenticate(&state.value);

        let (effect, inflight) = Effect::task(move |emitter| async move {
            while let Some(result) = sessions.next().await {
                if emitter.is_cancelled() {
                    return;
                }
                match result {
                    Ok(session) => on_authenticated.call(session),
                    Err(error) => {
                        emitter.emit(rejection(&error));
                        return;
                    }
                }
            }
            emitter.emit(Action::AuthenticationDone);
        })
        .cancellable();

        self.inflight = Some(inflight);
        effect
    }
}

impl Reaction<Action, AuthenticationModalState> for AuthenticateOnSubmit {
    fn react(
        &mut self,
        action: &Action,
        _previous: &AuthenticationModalState,
        current: &AuthenticationModalState,
    ) -> Effect<Action> {
        match action {
            Action::Submit if current.state == AuthenticationState::Authenticating => self.authenticate(current),
            Action::Cancel => {
                self.cancel();
                Effect::none()
            }
            _ => Effect::none(),
        }
    }
}

fn rejection(error: &RequestError) -> Action {
    tracing::debug!(status = error.status_or_default(), "authentication failed");
    if error.is_unauthorized() {
        Action::Unauthorized(error.message_or_default())
    } else {
        Action::ServerError(error.message_or_default())
    }
}
