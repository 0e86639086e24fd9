//! Connection modal: opens a record's site and copies its credentials.
//!
//! Clicking "copy" opens (or refocuses) the record's web page, then asks the view
//! to copy the username and/or password. Cancelling clears the clipboard first
//! when it may still hold a credential.

mod effects;
mod reducer;

use std::sync::Arc;

pub use effects::CLIPBOARD_CLEARED;

use crate::{
    Action, ActionFactory, Attrs, Automaton, Clipboard, ControllerLogic, Effect, Emitter, Handler, Link,
    Reactions, WindowOpener, WindowRef,
};

/// Host props.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionModalProps {
    /// Called once the modal is done cancelling.
    pub on_done: Option<Handler<()>>,
    pub attrs: Attrs,
}

/// Collaborators of the connection modal.
#[derive(Clone)]
pub struct ConnectionModalEnv {
    pub clipboard: Arc<dyn Clipboard>,
    pub opener: Arc<dyn WindowOpener>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyField {
    Username,
    Password,
}

/// What a `COPY_ERROR` is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyTarget {
    Username,
    Password,
    ClearClipboard,
}

impl From<CopyField> for CopyTarget {
    fn from(field: CopyField) -> Self {
        match field {
            CopyField::Username => CopyTarget::Username,
            CopyField::Password => CopyTarget::Password,
        }
    }
}

/// Payload of a click on a copy button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickCopy {
    /// The field to copy; both when `None`.
    pub field: Option<CopyField>,
    /// The clicked element's link to the record's site.
    pub link: Link,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionModalAction {
    Props(ConnectionModalProps),
    Cancel,
    ToggleManual,
    ToggleCleartext,
    ClickCopy(ClickCopy),
    WindowOpenResolved(WindowRef),
    WindowOpenRejected,
    UsernameCopied,
    PasswordCopied,
    CopyError(CopyTarget),
    ClipboardCleared,
    Cancelled,
}

impl Action for ConnectionModalAction {
    fn kind(&self) -> &'static str {
        match self {
            ConnectionModalAction::Props(_) => "PROPS",
            ConnectionModalAction::Cancel => "CANCEL",
            ConnectionModalAction::ToggleManual => "TOGGLE_MANUAL",
            ConnectionModalAction::ToggleCleartext => "TOGGLE_CLEARTEXT",
            ConnectionModalAction::ClickCopy(_) => "CLICK_COPY",
            ConnectionModalAction::WindowOpenResolved(_) => "WINDOW_OPEN_RESOLVED",
            ConnectionModalAction::WindowOpenRejected => "WINDOW_OPEN_REJECTED",
            ConnectionModalAction::UsernameCopied => "USERNAME_COPIED",
            ConnectionModalAction::PasswordCopied => "PASSWORD_COPIED",
            ConnectionModalAction::CopyError(_) => "COPY_ERROR",
            ConnectionModalAction::ClipboardCleared => "CLIPBOARD_CLEARED",
            ConnectionModalAction::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    CopyUsername,
    CopyingUsername,
    CopyPassword,
    CopyingPassword,
    CopyAny,
    CopyingAny,
    ClearingClipboard,
    Cancelling,
    Manual,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionModalState {
    pub props: ConnectionModalProps,
    pub state: ConnectionState,
    pub manual: bool,
    pub cleartext: bool,
    pub error: bool,
    /// A credential was copied since mount.
    pub dirty: bool,
    pub windowref: Option<WindowRef>,
}

impl Automaton for ConnectionModalState {
    type Tag = ConnectionState;

    fn tag(&self) -> ConnectionState {
        self.state
    }
}

/// What the view is asked to copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyProp {
    All,
    Password,
    Username,
}

impl CopyProp {
    fn of(state: ConnectionState) -> Option<Self> {
        match state {
            ConnectionState::CopyAny | ConnectionState::CopyingAny => Some(CopyProp::All),
            ConnectionState::CopyPassword | ConnectionState::CopyingPassword => Some(CopyProp::Password),
            ConnectionState::CopyUsername | ConnectionState::CopyingUsername => Some(CopyProp::Username),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionModalHandlers {
    pub on_cancel: Handler<()>,
    pub on_toggle_manual: Handler<()>,
    pub on_toggle_cleartext: Handler<()>,
    pub on_click_copy: Handler<ClickCopy>,
    /// Reports whether the view managed to copy the username.
    pub on_username_copied: Handler<bool>,
    /// Reports whether the view managed to copy the password.
    pub on_password_copied: Handler<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionModalViewProps {
    pub attrs: Attrs,
    pub manual: bool,
    pub cleartext: bool,
    pub error: bool,
    pub copy: Option<CopyProp>,
    pub handlers: ConnectionModalHandlers,
}

pub struct ConnectionModal;

impl ConnectionModal {
    pub fn initial_state(props: ConnectionModalProps) -> ConnectionModalState {
        ConnectionModalState {
            props,
            state: ConnectionState::Idle,
            manual: false,
            cleartext: false,
            error: false,
            dirty: false,
            windowref: None,
        }
    }

    pub fn reactions(env: ConnectionModalEnv) -> Reactions<ConnectionModalAction, ConnectionModalState> {
        effects::reactions(env)
    }
}

fn on_field_copied(field: CopyField) -> ActionFactory<bool, ConnectionModalAction> {
    ActionFactory::new(move |success: bool| match (success, field) {
        (true, CopyField::Username) => ConnectionModalAction::UsernameCopied,
        (true, CopyField::Password) => ConnectionModalAction::PasswordCopied,
        (false, field) => ConnectionModalAction::CopyError(field.into()),
    })
}

impl ControllerLogic<ConnectionModalAction, ConnectionModalState, ConnectionModalViewProps>
    for ConnectionModal
{
    type Handlers = ConnectionModalHandlers;

    fn init(&self, state: ConnectionModalState) -> (ConnectionModalState, Effect<ConnectionModalAction>) {
        (state, Effect::none())
    }

    fn reduce(&self, state: &ConnectionModalState, action: &ConnectionModalAction) -> ConnectionModalState {
        reducer::reduce(state, action)
    }

    fn bind(&self, emitter: &Emitter<ConnectionModalAction>) -> ConnectionModalHandlers {
        ConnectionModalHandlers {
            on_cancel: emitter.bind(ActionFactory::constant(ConnectionModalAction::Cancel)),
            on_toggle_manual: emitter.bind(ActionFactory::constant(ConnectionModalAction::ToggleManual)),
            on_toggle_cleartext: emitter.bind(ActionFactory::constant(ConnectionModalAction::ToggleCleartext)),
            on_click_copy: emitter.bind(ActionFactory::new(ConnectionModalAction::ClickCopy)),
            on_username_copied: emitter.bind(on_field_copied(CopyField::Username)),
            on_password_copied: emitter.bind(on_field_copied(CopyField::Password)),
        }
    }

    fn view(&self, state: &ConnectionModalState, handlers: &ConnectionModalHandlers) -> ConnectionModalViewProps {
        ConnectionModalViewProps {
            attrs: state.props.attrs.clone(),
            manual: state.manual,
            cleartext: state.cleartext,
            error: state.error,
            copy: CopyProp::of(state.state),
            handlers: handlers.clone(),
        }
    }
}
