use std::sync::Arc;

use super::{MenuItem, Route, RouterAction as Action, RouterEnv, RouterState};
use crate::{from_fn, Effect, Reaction, Reactions, WindowOpener};

const DEFAULT_TARGET: &str = "_blank";

pub(super) fn reactions(env: RouterEnv) -> Reactions<Action, RouterState> {
    Reactions::new()
        .with(actions_from_select_menu_item())
        .with(open_link_on_help(env.opener))
}

fn actions_from_select_menu_item() -> impl Reaction<Action, RouterState> {
    from_fn(|action: &Action, _previous: &RouterState, _current: &RouterState| {
        let Action::SelectMenuItem(item) = action else {
            return Effect::none();
        };
        match menu_action(item) {
            Some(action) => Effect::just(action),
            None => {
                tracing::warn!(id = %item.id, "unknown menu item");
                Effect::none()
            }
        }
    })
}

fn menu_action(item: &MenuItem) -> Option<Action> {
    match item.id.as_str() {
        "storage" => Some(Action::Navigate(Route::Storage)),
        "devices" => Some(Action::Navigate(Route::Devices)),
        "help" => Some(Action::Help(item.link.clone())),
        "logout" => Some(Action::Logout),
        _ => None,
    }
}

fn open_link_on_help(opener: Arc<dyn WindowOpener>) -> impl Reaction<Action, RouterState> {
    from_fn(move |action: &Action, _previous: &RouterState, _current: &RouterState| {
        let Action::Help(link) = action else {
            return Effect::none();
        };
        let Some(href) = link.href.clone().filter(|href| !href.is_empty()) else {
            return Effect::none();
        };
        let target = link.target.clone().unwrap_or_else(|| DEFAULT_TARGET.to_string());
        let opener = opener.clone();

        Effect::call(move || {
            if opener.open(&href, &target).is_none() {
                tracing::warn!(%href, "failed to open help link");
            }
        })
    })
}
