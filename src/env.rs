//! Injected collaborators and the values they exchange with controllers.

use core::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;

use crate::error::{ClipboardError, RequestError};

/// An authenticated session token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Session(pub String);

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(..)")
    }
}

/// The `href`/`target` pair of the element that triggered an action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Link {
    pub href: Option<String>,
    pub target: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            target: Some(target.into()),
        }
    }
}

/// A browser window opened by a controller.
pub trait WindowHandle: Send + Sync {
    fn focus(&self);
}

/// Shared reference to an opened window; equal only to clones of itself.
#[derive(Clone)]
pub struct WindowRef(Arc<dyn WindowHandle>);

impl WindowRef {
    pub fn new(handle: impl WindowHandle + 'static) -> Self {
        Self(Arc::new(handle))
    }

    pub fn focus(&self) {
        self.0.focus()
    }
}

impl PartialEq for WindowRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WindowRef(..)")
    }
}

/// Remote authentication service.
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    /// Authenticate with the user's secret.
    ///
    /// The stream yields the resulting session(s) and ends when authentication
    /// is complete, or yields a single error.
    fn authenticate(&self, secret: &str) -> BoxStream<'static, Result<Session, RequestError>>;
}

/// System clipboard.
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> BoxFuture<'static, Result<(), ClipboardError>>;
}

/// Opens browser windows.
#[cfg_attr(test, mockall::automock)]
pub trait WindowOpener: Send + Sync {
    /// Open `url` in the browsing context named `target`.
    ///
    /// Returns `None` when the window could not be opened (e.g. blocked popup).
    fn open(&self, url: &str, target: &str) -> Option<WindowRef>;
}

/// Localization table lookup.
#[cfg_attr(test, mockall::automock)]
pub trait Translator: Send + Sync {
    fn translate(&self, locale: &str, key: &str) -> String;
}
