//! Router: tracks the current route, the session and the locale, and exposes the
//! localized main menu of signed-in routes.

mod effects;
mod reducer;

use std::sync::Arc;

use crate::{
    Action, ActionFactory, Attrs, Automaton, ControllerLogic, Effect, Emitter, Handler, Link, Reactions, Session,
    Translator, WindowOpener,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Authentication,
    Home,
    Storage,
    Devices,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Authentication => "/authenticate",
            Route::Home => "/",
            Route::Storage => "/storage",
            Route::Devices => "/devices",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [Route::Authentication, Route::Home, Route::Storage, Route::Devices]
            .into_iter()
            .find(|route| route.path() == path)
    }

    fn is_signed_in(self) -> bool {
        self != Route::Authentication
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouterProps {
    /// Fallback locale when none was selected.
    pub locale: String,
    pub session: Option<Session>,
    pub attrs: Attrs,
}

/// Collaborators of the router.
#[derive(Clone)]
pub struct RouterEnv {
    pub opener: Arc<dyn WindowOpener>,
}

/// The menu element a user selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub link: Link,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RouterAction {
    Props(RouterProps),
    SelectMenuItem(MenuItem),
    SelectLocale(String),
    Navigate(Route),
    Login(Session),
    Logout,
    Help(Link),
}

impl Action for RouterAction {
    fn kind(&self) -> &'static str {
        match self {
            RouterAction::Props(_) => "PROPS",
            RouterAction::SelectMenuItem(_) => "SELECT_MENU_ITEM",
            RouterAction::SelectLocale(_) => "SELECT_LOCALE",
            RouterAction::Navigate(_) => "NAVIGATE",
            RouterAction::Login(_) => "LOGIN",
            RouterAction::Logout => "LOGOUT",
            RouterAction::Help(_) => "HELP",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouterState {
    pub props: RouterProps,
    pub route: Route,
    /// Selected locale, overriding `props.locale`.
    pub locale: Option<String>,
    pub session: Option<Session>,
}

impl RouterState {
    pub fn effective_locale(&self) -> &str {
        self.locale
            .as_deref()
            .filter(|locale| !locale.is_empty())
            .unwrap_or(&self.props.locale)
    }
}

impl Automaton for RouterState {
    type Tag = Route;

    fn tag(&self) -> Route {
        self.route
    }
}

/// One localized entry of the main menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: &'static str,
    pub label: String,
    pub href: Option<String>,
}

/// `(id, label key, href key)`
const MENU_OPTIONS: [(&str, &str, Option<&str>); 4] = [
    ("storage", "storage", None),
    ("devices", "devices", None),
    ("help", "help", Some("help-link")),
    ("logout", "logout", None),
];

#[derive(Clone, Debug, PartialEq)]
pub struct RouterHandlers {
    pub on_select_menu_item: Handler<MenuItem>,
    pub on_select_locale: Handler<String>,
    pub on_login: Handler<Session>,
    pub on_logout: Handler<()>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouterViewProps {
    pub attrs: Attrs,
    pub locale: String,
    pub path: &'static str,
    pub session: Option<Session>,
    pub menu: Option<Vec<MenuEntry>>,
    pub handlers: RouterHandlers,
}

pub struct Router {
    translator: Arc<dyn Translator>,
}

impl Router {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Mounts on the home route when the host already holds a session.
    pub fn initial_state(props: RouterProps) -> RouterState {
        let session = props.session.clone();
        RouterState {
            props,
            route: if session.is_some() {
                Route::Home
            } else {
                Route::Authentication
            },
            locale: None,
            session,
        }
    }

    pub fn reactions(env: RouterEnv) -> Reactions<RouterAction, RouterState> {
        effects::reactions(env)
    }

    fn menu(&self, locale: &str) -> Vec<MenuEntry> {
        MENU_OPTIONS
            .iter()
            .map(|&(id, label, href)| MenuEntry {
                id,
                label: self.translator.translate(locale, label),
                href: href.map(|key| self.translator.translate(locale, key)),
            })
            .collect()
    }
}

impl ControllerLogic<RouterAction, RouterState, RouterViewProps> for Router {
    type Handlers = RouterHandlers;

    fn init(&self, state: RouterState) -> (RouterState, Effect<RouterAction>) {
        (state, Effect::none())
    }

    fn reduce(&self, state: &RouterState, action: &RouterAction) -> RouterState {
        reducer::reduce(state, action)
    }

    fn bind(&self, emitter: &Emitter<RouterAction>) -> RouterHandlers {
        RouterHandlers {
            on_select_menu_item: emitter.bind(ActionFactory::new(RouterAction::SelectMenuItem)),
            on_select_locale: emitter.bind(ActionFactory::new(RouterAction::SelectLocale)),
            on_login: emitter.bind(ActionFactory::new(RouterAction::Login)),
            on_logout: emitter.bind(ActionFactory::constant(RouterAction::Logout)),
        }
    }

    fn view(&self, state: &RouterState, handlers: &RouterHandlers) -> RouterViewProps {
        let locale = state.effective_locale().to_string();
        RouterViewProps {
            attrs: state.props.attrs.clone(),
            path: state.route.path(),
            session: state.session.clone(),
            menu: state.route.is_signed_in().then(|| self.menu(&locale)),
            locale,
            handlers: handlers.clone(),
        }
    }
}
