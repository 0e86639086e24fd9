//! Authentication modal: asks for the user's passphrase and authenticates it.

mod effects;
mod reducer;

use std::sync::Arc;

use crate::{
    Action, ActionFactory, Attrs, Authenticator, Automaton, ControllerLogic, Effect, Emitter, Handler, Reactions,
    Session,
};

/// Host props.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthenticationModalProps {
    pub on_cancel: Option<Handler<()>>,
    /// Receives the submitted passphrase.
    pub on_submit: Option<Handler<String>>,
    /// Receives the sessions of a successful authentication. Authentication is
    /// only attempted when this handler is present.
    pub on_authenticated: Option<Handler<Session>>,
    pub attrs: Attrs,
}

/// Collaborators of the authentication modal.
#[derive(Clone)]
pub struct AuthenticationModalEnv {
    pub authenticator: Arc<dyn Authenticator>,
}

#[derive(Clone, PartialEq)]
pub enum AuthenticationModalAction {
    Props(AuthenticationModalProps),
    Change(String),
    ToggleCleartext,
    Submit,
    Cancel,
    AuthenticationDone,
    Unauthorized(String),
    ServerError(String),
}

impl core::fmt::Debug for AuthenticationModalAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AuthenticationModalAction::Props(props) => f.debug_tuple("Props").field(props).finish(),
            AuthenticationModalAction::Change(_) => f.write_str("Change(<redacted>)"),
            AuthenticationModalAction::Unauthorized(message) => f.debug_tuple("Unauthorized").field(message).finish(),
            AuthenticationModalAction::ServerError(message) => f.debug_tuple("ServerError").field(message).finish(),
            AuthenticationModalAction::ToggleCleartext => f.write_str("ToggleCleartext"),
            AuthenticationModalAction::Submit => f.write_str("Submit"),
            AuthenticationModalAction::Cancel => f.write_str("Cancel"),
            AuthenticationModalAction::AuthenticationDone => f.write_str("AuthenticationDone"),
        }
    }
}

impl Action for AuthenticationModalAction {
    fn kind(&self) -> &'static str {
        match self {
            AuthenticationModalAction::Props(_) => "PROPS",
            AuthenticationModalAction::Change(_) => "CHANGE",
            AuthenticationModalAction::ToggleCleartext => "TOGGLE_CLEARTEXT",
            AuthenticationModalAction::Submit => "SUBMIT",
            AuthenticationModalAction::Cancel => "CANCEL",
            AuthenticationModalAction::AuthenticationDone => "AUTHENTICATION_DONE",
            AuthenticationModalAction::Unauthorized(_) => "UNAUTHORIZED",
            AuthenticationModalAction::ServerError(_) => "SERVER_ERROR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthenticationState {
    Idle,
    Authenticating,
    Authenticated,
    Error,
}

#[derive(Clone, PartialEq)]
pub struct AuthenticationModalState {
    pub props: AuthenticationModalProps,
    pub state: AuthenticationState,
    pub value: String,
    pub cleartext: bool,
    pub error: Option<String>,
}

impl core::fmt::Debug for AuthenticationModalState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthenticationModalState")
            .field("props", &self.props)
            .field("state", &self.state)
            .field("value", &"<redacted>")
            .field("cleartext", &self.cleartext)
            .field("error", &self.error)
            .finish()
    }
}

impl Automaton for AuthenticationModalState {
    type Tag = AuthenticationState;

    fn tag(&self) -> AuthenticationState {
        self.state
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticationModalHandlers {
    pub on_change: Handler<String>,
    pub on_toggle_cleartext: Handler<()>,
    pub on_submit: Handler<()>,
    pub on_cancel: Handler<()>,
}

#[derive(Clone, PartialEq)]
pub struct AuthenticationModalViewProps {
    pub attrs: Attrs,
    pub value: String,
    pub cleartext: bool,
    pub pending: bool,
    pub error: Option<String>,
    pub handlers: AuthenticationModalHandlers,
}

impl core::fmt::Debug for AuthenticationModalViewProps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthenticationModalViewProps")
            .field("attrs", &self.attrs)
            .field("cleartext", &self.cleartext)
            .field("pending", &self.pending)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

pub struct AuthenticationModal;

impl AuthenticationModal {
    pub fn initial_state(props: AuthenticationModalProps) -> AuthenticationModalState {
        AuthenticationModalState {
            props,
            state: AuthenticationState::Idle,
            value: String::new(),
            cleartext: false,
            error: None,
        }
    }

    pub fn reactions(
        env: AuthenticationModalEnv,
    ) -> Reactions<AuthenticationModalAction, AuthenticationModalState> {
        effects::reactions(env)
    }
}

impl ControllerLogic<AuthenticationModalAction, AuthenticationModalState, AuthenticationModalViewProps>
    for AuthenticationModal
{
    type Handlers = AuthenticationModalHandlers;

    fn init(
        &self,
        state: AuthenticationModalState,
    ) -> (AuthenticationModalState, Effect<AuthenticationModalAction>) {
        (state, Effect::none())
    }

    fn reduce(
        &self,
        state: &AuthenticationModalState,
        action: &AuthenticationModalAction,
    ) -> AuthenticationModalState {
        reducer::reduce(state, action)
    }

    fn bind(&self, emitter: &Emitter<AuthenticationModalAction>) -> AuthenticationModalHandlers {
        AuthenticationModalHandlers {
            on_change: emitter.bind(ActionFactory::new(AuthenticationModalAction::Change)),
            on_toggle_cleartext: emitter.bind(ActionFactory::constant(AuthenticationModalAction::ToggleCleartext)),
            on_submit: emitter.bind(ActionFactory::constant(AuthenticationModalAction::Submit)),
            on_cancel: emitter.bind(ActionFactory::constant(AuthenticationModalAction::Cancel)),
        }
    }

    fn view(
        &self,
        state: &AuthenticationModalState,
        handlers: &AuthenticationModalHandlers,
    ) -> AuthenticationModalViewProps {
        AuthenticationModalViewProps {
            attrs: state.props.attrs.clone(),
            value: state.value.clone(),
            cleartext: state.cleartext,
            pending: state.state == AuthenticationState::Authenticating,
            error: state.error.clone(),
            handlers: handlers.clone(),
        }
    }
}
