use super::{ClickCopy, ConnectionModalAction as Action, ConnectionModalState, ConnectionState as State, CopyField, CopyTarget};

pub(super) fn reduce(current: &ConnectionModalState, action: &Action) -> ConnectionModalState {
    let mut next = current.clone();

    // merged in every state
    match action {
        Action::Props(props) => {
            next.props = props.clone();
            return next;
        }
        Action::WindowOpenResolved(windowref) => next.windowref = Some(windowref.clone()),
        _ => {}
    }

    match (current.state, action) {
        (State::Cancelling, _) => {}

        (State::ClearingClipboard, Action::ClipboardCleared)
        | (State::ClearingClipboard, Action::CopyError(CopyTarget::ClearClipboard)) => {
            next.state = State::Cancelling;
        }
        (State::ClearingClipboard, _) => {}

        (_, Action::Cancel) => {
            next.state = if current.dirty {
                State::ClearingClipboard
            } else {
                State::Cancelling
            };
        }

        (_, Action::ToggleCleartext) => next.cleartext = !current.cleartext,

        (State::Idle | State::Manual | State::Error, Action::ToggleManual) => {
            next.manual = !current.manual;
            next.error = false;
            next.state = rest(next.manual);
        }

        (State::Idle | State::Manual | State::Error, Action::ClickCopy(ClickCopy { field, .. })) => {
            next.error = false;
            next.state = if current.manual {
                copying(*field)
            } else {
                copy(*field)
            };
        }

        (
            State::CopyUsername | State::CopyPassword | State::CopyAny,
            Action::WindowOpenResolved(_) | Action::WindowOpenRejected,
        ) => next.state = commit(current.state),

        (State::CopyingUsername, Action::UsernameCopied)
        | (State::CopyingPassword, Action::PasswordCopied) => {
            next.dirty = true;
            next.state = rest(current.manual);
        }
        (State::CopyingAny, Action::UsernameCopied) => {
            next.dirty = true;
            next.state = State::CopyingPassword;
        }
        (State::CopyingAny, Action::PasswordCopied) => {
            next.dirty = true;
            next.state = State::CopyingUsername;
        }

        (
            State::CopyingUsername | State::CopyingPassword | State::CopyingAny,
            Action::CopyError(CopyTarget::Username | CopyTarget::Password),
        ) => {
            next.error = true;
            next.state = State::Error;
        }

        _ => {}
    }

    next
}

fn rest(manual: bool) -> State {
    if manual {
        State::Manual
    } else {
        State::Idle
    }
}

fn copy(field: Option<CopyField>) -> State {
    match field {
        Some(CopyField::Username) => State::CopyUsername,
        Some(CopyField::Password) => State::CopyPassword,
        None => State::CopyAny,
    }
}

fn copying(field: Option<CopyField>) -> State {
    commit(copy(field))
}

fn commit(state: State) -> State {
    match state {
        State::CopyUsername => State::CopyingUsername,
        State::CopyPassword => State::CopyingPassword,
        State::CopyAny => State::CopyingAny,
        other => other,
    }
}
