use super::{AuthenticationModalAction as Action, AuthenticationModalState, AuthenticationState as State};

pub(super) fn reduce(current: &AuthenticationModalState, action: &Action) -> AuthenticationModalState {
    let mut next = current.clone();

    match (current.state, action) {
        (_, Action::Props(props)) => next.props = props.clone(),

        (_, Action::ToggleCleartext) => next.cleartext = !current.cleartext,

        (_, Action::Cancel) => {
            next.state = State::Idle;
            next.value.clear();
            next.error = None;
        }

        (State::Idle | State::Error, Action::Change(value)) => next.value = value.clone(),

        // nothing would resolve the request without a session handler
        (State::Idle | State::Error, Action::Submit) if current.props.on_authenticated.is_some() => {
            next.state = State::Authenticating;
            next.error = None;
        }

        (State::Authenticating, Action::AuthenticationDone) => {
            next.state = State::Authenticated;
            next.value.clear();
        }

        (State::Authenticating, Action::Unauthorized(message) | Action::ServerError(message)) => {
            next.state = State::Error;
            next.value.clear();
            next.error = Some(message.clone());
        }

        _ => {}
    }

    next
}
