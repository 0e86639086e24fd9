//! Storage page: shows the user's storage status and prices upgrade offers.
//!
//! The status is fetched on mount, through the authorization protocol when the
//! session needs refreshing. Offers are priced again whenever the offer query
//! (country, currency, requested specs) changes.

mod effects;
mod reducer;

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;

use crate::{
    Action, ActionFactory, Attrs, AuthorizationActions, Automaton, ControllerLogic, Effect, Emitter, Handler,
    Reactions, RequestError, Session,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Currency {
    Euro,
    Dollar,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Euro => "EUR",
            Currency::Dollar => "USD",
        }
    }
}

/// A storage plan the page offers, e.g. `{ uiid: "1kdocs", quantity: 1 }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageOfferSpec {
    pub uiid: String,
    pub quantity: u32,
}

/// A priced storage offer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offer {
    pub uiid: String,
    pub quantity: u32,
    /// Total price in cents.
    pub price: u64,
    pub currency: Currency,
}

/// What the pricing service is asked to price.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OfferQuery {
    pub country: Option<String>,
    pub currency: Option<Currency>,
    pub specs: Vec<StorageOfferSpec>,
}

impl OfferQuery {
    /// The query for the props' specs, with the user's quantity changes applied.
    pub fn of(state: &StoragePageState) -> Self {
        Self {
            country: state.props.country.clone(),
            currency: state.props.currency,
            specs: state
                .props
                .specs
                .iter()
                .map(|spec| StorageOfferSpec {
                    uiid: spec.uiid.clone(),
                    quantity: state.quantities.get(&spec.uiid).copied().unwrap_or(spec.quantity),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageStatus {
    pub docs: u32,
    pub maxdocs: u32,
}

/// Remote storage and pricing service.
#[cfg_attr(test, mockall::automock)]
pub trait StorageService: Send + Sync {
    fn status(&self, session: Option<Session>) -> BoxFuture<'static, Result<StorageStatus, RequestError>>;

    /// Price the queried offers; every item replaces the previous pricing.
    fn offers(&self, query: &OfferQuery) -> BoxStream<'static, Result<Vec<Offer>, RequestError>>;
}

/// Host props.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoragePageProps {
    pub session: Option<Session>,
    pub country: Option<String>,
    pub currency: Option<Currency>,
    pub specs: Vec<StorageOfferSpec>,
    pub ucid: Option<String>,
    pub i18nkey: Option<String>,
    pub on_close: Option<Handler<()>>,
    pub on_error: Option<Handler<String>>,
    /// Receives whether the page is now offline.
    pub on_toggle_offline: Option<Handler<bool>>,
    pub attrs: Attrs,
}

/// Collaborators of the storage page.
#[derive(Clone)]
pub struct StoragePageEnv {
    pub service: Arc<dyn StorageService>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoragePageAction {
    Props(StoragePageProps),
    Mount,
    StatusResolved(StorageStatus),
    StatusRejected(String),
    OffersResolved(Vec<Offer>),
    Change(String),
    OfferQuantityChange { id: String, quantity: u32 },
    ToggleOffline,
    Close,
    Error(String),
    AuthenticationRequested,
    AuthenticationResolved,
    AuthenticationRejected,
}

impl Action for StoragePageAction {
    fn kind(&self) -> &'static str {
        match self {
            StoragePageAction::Props(_) => "PROPS",
            StoragePageAction::Mount => "MOUNT",
            StoragePageAction::StatusResolved(_) => "STATUS_RESOLVED",
            StoragePageAction::StatusRejected(_) => "STATUS_REJECTED",
            StoragePageAction::OffersResolved(_) => "OFFERS_RESOLVED",
            StoragePageAction::Change(_) => "CHANGE",
            StoragePageAction::OfferQuantityChange { .. } => "OFFER_QUANTITY_CHANGE",
            StoragePageAction::ToggleOffline => "TOGGLE_OFFLINE",
            StoragePageAction::Close => "CLOSE",
            StoragePageAction::Error(_) => "ERROR",
            StoragePageAction::AuthenticationRequested => "AUTHENTICATION_REQUESTED",
            StoragePageAction::AuthenticationResolved => "AUTHENTICATION_RESOLVED",
            StoragePageAction::AuthenticationRejected => "AUTHENTICATION_REJECTED",
        }
    }
}

impl AuthorizationActions for StoragePageAction {
    fn authentication_requested() -> Self {
        StoragePageAction::AuthenticationRequested
    }

    fn is_authentication_resolved(&self) -> bool {
        matches!(self, StoragePageAction::AuthenticationResolved)
    }

    fn is_authentication_rejected(&self) -> bool {
        matches!(self, StoragePageAction::AuthenticationRejected)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoragePageAutomaton {
    Pending,
    Idle,
    Offline,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoragePageState {
    pub props: StoragePageProps,
    pub state: StoragePageAutomaton,
    pub value: Option<String>,
    pub docs: Option<u32>,
    pub maxdocs: Option<u32>,
    pub offers: Option<Vec<Offer>>,
    /// Quantities the user picked, by offer uiid.
    pub quantities: BTreeMap<String, u32>,
    /// An authentication was requested and is not settled yet.
    pub authenticate: bool,
    pub error: Option<String>,
}

impl Automaton for StoragePageState {
    type Tag = StoragePageAutomaton;

    fn tag(&self) -> StoragePageAutomaton {
        self.state
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoragePageHandlers {
    pub on_close: Handler<()>,
    pub on_error: Handler<String>,
    pub on_change: Handler<String>,
    pub on_offer_quantity_change: Handler<(String, u32)>,
    pub on_toggle_offline: Handler<()>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoragePageViewProps {
    pub attrs: Attrs,
    pub session: Option<Session>,
    pub country: Option<String>,
    pub currency: Option<Currency>,
    pub ucid: Option<String>,
    pub i18nkey: Option<String>,
    pub value: Option<String>,
    pub docs: Option<u32>,
    pub maxdocs: Option<u32>,
    pub offers: Option<Vec<Offer>>,
    pub init: bool,
    pub offline: bool,
    pub authenticate: bool,
    pub error: Option<String>,
    pub handlers: StoragePageHandlers,
}

pub struct StoragePage;

impl StoragePage {
    pub fn initial_state(props: StoragePageProps) -> StoragePageState {
        StoragePageState {
            props,
            state: StoragePageAutomaton::Pending,
            value: None,
            docs: None,
            maxdocs: None,
            offers: None,
            quantities: BTreeMap::new(),
            authenticate: false,
            error: None,
        }
    }

    pub fn reactions(env: StoragePageEnv) -> Reactions<StoragePageAction, StoragePageState> {
        effects::reactions(env)
    }
}

impl ControllerLogic<StoragePageAction, StoragePageState, StoragePageViewProps> for StoragePage {
    type Handlers = StoragePageHandlers;

    fn init(&self, state: StoragePageState) -> (StoragePageState, Effect<StoragePageAction>) {
        (state, Effect::just(StoragePageAction::Mount))
    }

    fn reduce(&self, state: &StoragePageState, action: &StoragePageAction) -> StoragePageState {
        reducer::reduce(state, action)
    }

    fn bind(&self, emitter: &Emitter<StoragePageAction>) -> StoragePageHandlers {
        StoragePageHandlers {
            on_close: emitter.bind(ActionFactory::constant(StoragePageAction::Close)),
            on_error: emitter.bind(ActionFactory::new(StoragePageAction::Error)),
            on_change: emitter.bind(ActionFactory::new(StoragePageAction::Change)),
            on_offer_quantity_change: emitter.bind(ActionFactory::new(|(id, quantity): (String, u32)| {
                StoragePageAction::OfferQuantityChange { id, quantity }
            })),
            on_toggle_offline: emitter.bind(ActionFactory::constant(StoragePageAction::ToggleOffline)),
        }
    }

    fn view(&self, state: &StoragePageState, handlers: &StoragePageHandlers) -> StoragePageViewProps {
        let props = &state.props;
        StoragePageViewProps {
            attrs: props.attrs.clone(),
            session: props.session.clone(),
            country: props.country.clone(),
            currency: props.currency,
            ucid: props.ucid.clone(),
            i18nkey: props.i18nkey.clone(),
            value: state.value.clone(),
            docs: state.docs,
            maxdocs: state.maxdocs,
            offers: state.offers.clone(),
            init: state.state == StoragePageAutomaton::Pending,
            offline: state.state == StoragePageAutomaton::Offline,
            authenticate: state.authenticate,
            error: state.error.clone(),
            handlers: handlers.clone(),
        }
    }
}
