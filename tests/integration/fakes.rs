use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use mockall::mock;
use vault_controllers::controllers::storage_page::{Offer, OfferQuery, StorageService, StorageStatus};
use vault_controllers::{
    Authenticator, Clipboard, ClipboardError, RequestError, Session, Translator, WindowHandle, WindowOpener,
    WindowRef,
};

mock! {
    pub Clipboard {}

    impl Clipboard for Clipboard {
        fn write_text(&self, text: &str) -> BoxFuture<'static, Result<(), ClipboardError>>;
    }
}

mock! {
    pub WindowOpener {}

    impl WindowOpener for WindowOpener {
        fn open(&self, url: &str, target: &str) -> Option<WindowRef>;
    }
}

mock! {
    pub Authenticator {}

    impl Authenticator for Authenticator {
        fn authenticate(&self, secret: &str) -> BoxStream<'static, Result<Session, RequestError>>;
    }
}

mock! {
    pub Translator {}

    impl Translator for Translator {
        fn translate(&self, locale: &str, key: &str) -> String;
    }
}

mock! {
    pub StorageService {}

    impl StorageService for StorageService {
        fn status(&self, session: Option<Session>) -> BoxFuture<'static, Result<StorageStatus, RequestError>>;
        fn offers(&self, query: &OfferQuery) -> BoxStream<'static, Result<Vec<Offer>, RequestError>>;
    }
}

/// A window counting how often it was focused.
#[derive(Clone, Default)]
pub(crate) struct FakeWindow(pub(crate) Arc<AtomicU32>);

impl FakeWindow {
    pub(crate) fn focused(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

impl WindowHandle for FakeWindow {
    fn focus(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records every value a host handler receives.
pub(crate) fn recorder<T: Send + 'static>() -> (Arc<spin::Mutex<Vec<T>>>, vault_controllers::Handler<T>) {
    let received = Arc::new(spin::Mutex::new(Vec::new()));
    let sink = received.clone();
    (received, vault_controllers::Handler::new(move |value: T| sink.lock().push(value)))
}
