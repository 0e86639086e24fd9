use super::{Route, RouterAction as Action, RouterState};

pub(super) fn reduce(current: &RouterState, action: &Action) -> RouterState {
    let mut next = current.clone();

    match (current.route, action) {
        (_, Action::Props(props)) => next.props = props.clone(),

        (_, Action::SelectLocale(locale)) => next.locale = Some(locale.clone()),

        (Route::Authentication, Action::Login(session)) => {
            next.session = Some(session.clone());
            next.route = Route::Home;
        }

        (_, Action::Logout) => {
            next.session = None;
            next.route = Route::Authentication;
        }

        (_, Action::Navigate(route)) if current.session.is_some() && *route != Route::Authentication => {
            next.route = *route;
        }

        _ => {}
    }

    next
}
