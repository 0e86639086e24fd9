use std::sync::Arc;

use futures::{FutureExt, StreamExt};

use super::{
    OfferQuery, StoragePageAction as Action, StoragePageAutomaton, StoragePageEnv, StoragePageState,
    StorageService,
};
use crate::{call_handler_on, from_fn, Authorizer, CancelHandle, Effect, Reaction, Reactions};

pub(super) fn reactions(env: StoragePageEnv) -> Reactions<Action, StoragePageState> {
    Reactions::new()
        .with(FetchStatus::new(env.service.clone()))
        .with(PriceOffersOnQueryChange::new(env.service))
        .with(from_fn(call_on_toggle_offline))
        .with(call_handler_on(
            |action: &Action| matches!(action, Action::Close),
            |state: &StoragePageState| state.props.on_close.as_ref(),
            |_: &StoragePageState, _: &Action| (),
        ))
        .with(call_handler_on(
            |action: &Action| matches!(action, Action::Error(_)),
            |state: &StoragePageState| state.props.on_error.as_ref(),
            |_: &StoragePageState, action: &Action| match action {
                Action::Error(message) => message.clone(),
                _ => String::new(),
            },
        ))
}

/// Tells the host about the new mode, only when the toggle actually switched it.
fn call_on_toggle_offline(action: &Action, previous: &StoragePageState, current: &StoragePageState) -> Effect<Action> {
    if !matches!(action, Action::ToggleOffline) || previous.state == current.state {
        return Effect::none();
    }
    match current.props.on_toggle_offline.clone() {
        Some(handler) => {
            let offline = current.state == StoragePageAutomaton::Offline;
            Effect::call(move || handler.call(offline))
        }
        None => Effect::none(),
    }
}

/// Fetches the storage status on mount and whenever the host's session changes.
struct FetchStatus {
    authorizer: Authorizer<Action, StoragePageState>,
}

impl FetchStatus {
    fn new(service: Arc<dyn StorageService>) -> Self {
        let authorizer = Authorizer::new(
            move |state: &StoragePageState| {
                service
                    .status(state.props.session.clone())
                    .map(|result| result.map(Action::StatusResolved))
                    .boxed()
            },
            |error| Action::StatusRejected(error.message_or_default()),
        );
        Self { authorizer }
    }
}

impl Reaction<Action, StoragePageState> for FetchStatus {
    fn react(&mut self, action: &Action, previous: &StoragePageState, current: &StoragePageState) -> Effect<Action> {
        match action {
            Action::Mount => self.authorizer.request(current),
            Action::Props(props) if props.session != previous.props.session => {
                tracing::debug!("session changed, fetching storage status");
                self.authorizer.request(current)
            }
            _ => self.authorizer.react(action, previous, current),
        }
    }
}

/// Prices the offers again whenever the query changes; a new query supersedes
/// the pricing in flight.
struct PriceOffersOnQueryChange {
    service: Arc<dyn StorageService>,
    query: Option<OfferQuery>,
    inflight: Option<CancelHandle>,
}

impl PriceOffersOnQueryChange {
    fn new(service: Arc<dyn StorageService>) -> Self {
        Self {
            service,
            query: None,
            inflight: None,
        }
    }
}

impl Reaction<Action, StoragePageState> for PriceOffersOnQueryChange {
    fn react(&mut self, _action: &Action, _previous: &StoragePageState, current: &StoragePageState) -> Effect<Action> {
        let query = OfferQuery::of(current);
        if self.query.as_ref() == Some(&query) {
            return Effect::none();
        }

        if let Some(inflight) = self.inflight.take() {
            inflight.cancel();
        }
        if query.is_empty() {
            self.query = Some(query);
            return Effect::none();
        }
        let mut offers = self.service.offers(&query);
        self.query = Some(query);

        let (effect, inflight) = Effect::task(move |emitter| async move {
            while let Some(result) = offers.next().await {
                match result {
                    Ok(offers) => emitter.emit(Action::OffersResolved(offers)),
                    Err(error) => {
                        emitter.emit(Action::Error(error.message_or_default()));
                        return;
                    }
                }
            }
        })
        .cancellable();

        self.inflight = Some(inflight);
        effect
    }
}
