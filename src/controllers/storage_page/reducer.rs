use super::{StoragePageAction as Action, StoragePageAutomaton as State, StoragePageState};

pub(super) fn reduce(current: &StoragePageState, action: &Action) -> StoragePageState {
    let mut next = current.clone();

    match (current.state, action) {
        (_, Action::Props(props)) => next.props = props.clone(),

        (state, Action::StatusResolved(status)) => {
            if matches!(state, State::Pending | State::Error) {
                next.state = State::Idle;
            }
            next.docs = Some(status.docs);
            next.maxdocs = Some(status.maxdocs);
            next.authenticate = false;
            next.error = None;
        }

        (state, Action::StatusRejected(message)) => {
            if state == State::Pending {
                next.state = State::Error;
            }
            next.error = Some(message.clone());
        }

        (State::Pending, Action::AuthenticationRejected) => {
            next.state = State::Error;
            next.authenticate = false;
        }

        (State::Idle, Action::ToggleOffline) => next.state = State::Offline,
        (State::Offline, Action::ToggleOffline) => next.state = State::Idle,

        // field merges
        (_, Action::OffersResolved(offers)) => next.offers = Some(offers.clone()),
        (_, Action::Change(value)) => next.value = Some(value.clone()),
        (_, Action::OfferQuantityChange { id, quantity }) => {
            next.quantities.insert(id.clone(), *quantity);
        }
        (_, Action::Error(message)) => next.error = Some(message.clone()),
        (_, Action::AuthenticationRequested) => next.authenticate = true,
        (_, Action::AuthenticationResolved | Action::AuthenticationRejected) => next.authenticate = false,

        _ => {}
    }

    next
}
