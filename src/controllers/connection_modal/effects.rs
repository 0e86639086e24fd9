use std::sync::Arc;

use super::{ConnectionModalAction as Action, ConnectionModalEnv, ConnectionModalState, ConnectionState, CopyTarget};
use crate::{from_fn, on_entering, Clipboard, Effect, Reaction, Reactions, WindowOpener, WindowRef};

/// Written to the clipboard to wipe a copied credential.
pub const CLIPBOARD_CLEARED: &str = "Clipboard cleared by ZenyPass";

const DEFAULT_TARGET: &str = "_blank";

pub(super) fn reactions(env: ConnectionModalEnv) -> Reactions<Action, ConnectionModalState> {
    Reactions::new()
        .with(call_on_done_on_cancelling())
        .with(clear_clipboard_on_clearing_clipboard(env.clipboard))
        .with(open_window_on_click_copy(env.opener))
}

fn call_on_done_on_cancelling() -> impl Reaction<Action, ConnectionModalState> {
    on_entering(ConnectionState::Cancelling, |state: &ConnectionModalState| {
        let on_done = state.props.on_done.clone();
        Effect::call(move || {
            if let Some(on_done) = on_done {
                on_done.call(());
            }
        })
        .and(Effect::just(Action::Cancelled))
    })
}

fn clear_clipboard_on_clearing_clipboard(
    clipboard: Arc<dyn Clipboard>,
) -> impl Reaction<Action, ConnectionModalState> {
    on_entering(ConnectionState::ClearingClipboard, move |_: &ConnectionModalState| {
        let write = clipboard.write_text(CLIPBOARD_CLEARED);
        Effect::perform(async move {
            match write.await {
                Ok(()) => Action::ClipboardCleared,
                Err(error) => {
                    tracing::warn!(%error, "failed to clear clipboard");
                    Action::CopyError(CopyTarget::ClearClipboard)
                }
            }
        })
    })
}

fn open_window_on_click_copy(opener: Arc<dyn WindowOpener>) -> impl Reaction<Action, ConnectionModalState> {
    from_fn(
        move |action: &Action, previous: &ConnectionModalState, _current: &ConnectionModalState| {
            let Action::ClickCopy(click) = action else {
                return Effect::none();
            };
            if previous.manual {
                return Effect::none();
            }

            let opened = match &previous.windowref {
                Some(windowref) => {
                    windowref.focus();
                    Some(windowref.clone())
                }
                None => open(opener.as_ref(), click.link.href.as_deref(), click.link.target.as_deref()),
            };

            Effect::just(match opened {
                Some(windowref) => Action::WindowOpenResolved(windowref),
                None => Action::WindowOpenRejected,
            })
        },
    )
}

fn open(opener: &dyn WindowOpener, href: Option<&str>, target: Option<&str>) -> Option<WindowRef> {
    let href = href.filter(|href| !href.is_empty())?;
    opener.open(href, target.unwrap_or(DEFAULT_TARGET))
}
