use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures::{stream, FutureExt, StreamExt};
use vault_controllers::controllers::storage_page::{
    Currency, Offer, OfferQuery, StorageOfferSpec, StoragePage, StoragePageAction, StoragePageAutomaton,
    StoragePageEnv, StoragePageProps, StoragePageState, StoragePageViewProps, StorageStatus,
};
use vault_controllers::{RequestError, Session, TestControllerDriver, TestControllerRuntime, TestRenderer};

use super::fakes::{recorder, MockStorageService};

type Driver = TestControllerDriver<
    StoragePageAction,
    StoragePageState,
    StoragePageViewProps,
    StoragePage,
    TestRenderer<StoragePageViewProps>,
>;

fn mount(service: MockStorageService, props: StoragePageProps) -> (TestRenderer<StoragePageViewProps>, Driver) {
    let renderer = TestRenderer::new();
    let driver = TestControllerRuntime::new(
        StoragePage::initial_state(props),
        StoragePage,
        StoragePage::reactions(StoragePageEnv {
            service: Arc::new(service),
        }),
        renderer.clone(),
    )
    .run();
    (renderer, driver)
}

fn specs() -> Vec<StorageOfferSpec> {
    vec![StorageOfferSpec {
        uiid: "5kdocs".to_string(),
        quantity: 1,
    }]
}

fn offer(quantity: u32) -> Offer {
    Offer {
        uiid: "5kdocs".to_string(),
        quantity,
        price: 4900 * u64::from(quantity),
        currency: Currency::Euro,
    }
}

#[test]
fn given_an_expired_session_should_request_authentication_then_show_the_status() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let mut service = MockStorageService::new();
    service.expect_status().times(2).returning(move |session| {
        let call = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            match (call, session) {
                (0, _) => Err(RequestError::with_status(401)),
                (_, Some(Session(token))) if token == "fresh" => Ok(StorageStatus { docs: 3, maxdocs: 1000 }),
                _ => Err(RequestError::with_status(403)),
            }
        }
        .boxed()
    });
    service.expect_offers().never();
    let (renderer, mut driver) = mount(
        service,
        StoragePageProps {
            session: Some(Session("stale".to_string())),
            ..Default::default()
        },
    );

    driver.process_events();
    let view = renderer.last().expect("rendered");
    assert!(view.init);
    assert!(view.authenticate);

    // the host authenticates, hands over the new session, then resolves
    let handle = driver.handle();
    handle
        .dispatch(StoragePageAction::Props(StoragePageProps {
            session: Some(Session("fresh".to_string())),
            ..Default::default()
        }))
        .expect("controller is mounted");
    handle
        .dispatch(StoragePageAction::AuthenticationResolved)
        .expect("controller is mounted");
    driver.process_events();

    let view = renderer.last().expect("rendered");
    assert!(!view.init);
    assert!(!view.authenticate);
    assert_eq!((view.docs, view.maxdocs), (Some(3), Some(1000)));
    assert!(calls.load(Ordering::SeqCst) >= 2);
}

#[test]
fn given_a_new_session_once_idle_should_show_the_refreshed_status() {
    let mut service = MockStorageService::new();
    service.expect_status().times(2).returning(|session| {
        let docs = match session {
            Some(Session(token)) if token == "b" => 99,
            _ => 1,
        };
        async move { Ok(StorageStatus { docs, maxdocs: 1000 }) }.boxed()
    });
    service.expect_offers().never();
    let (renderer, mut driver) = mount(
        service,
        StoragePageProps {
            session: Some(Session("a".to_string())),
            ..Default::default()
        },
    );
    driver.process_events();
    assert_eq!(renderer.last().and_then(|view| view.docs), Some(1));

    driver
        .handle()
        .dispatch(StoragePageAction::Props(StoragePageProps {
            session: Some(Session("b".to_string())),
            ..Default::default()
        }))
        .expect("controller is mounted");
    driver.process_events();

    assert_eq!(driver.state().state, StoragePageAutomaton::Idle);
    assert_eq!(renderer.last().and_then(|view| view.docs), Some(99));
}

#[test]
fn given_a_quantity_change_should_price_the_offers_again() {
    let mut service = MockStorageService::new();
    service
        .expect_status()
        .returning(|_| async { Ok(StorageStatus { docs: 3, maxdocs: 1000 }) }.boxed());
    service
        .expect_offers()
        .times(2)
        .returning(|query: &OfferQuery| {
            let quantity = query.specs[0].quantity;
            stream::iter(vec![Ok(vec![offer(quantity)])]).boxed()
        });
    let (renderer, mut driver) = mount(
        service,
        StoragePageProps {
            country: Some("FR".to_string()),
            currency: Some(Currency::Euro),
            specs: specs(),
            ..Default::default()
        },
    );
    driver.process_events();
    assert_eq!(renderer.last().and_then(|view| view.offers), Some(vec![offer(1)]));

    renderer.with_renders(|renders| {
        renders[0]
            .handlers
            .on_offer_quantity_change
            .call(("5kdocs".to_string(), 3))
    });
    driver.process_events();

    assert_eq!(renderer.last().and_then(|view| view.offers), Some(vec![offer(3)]));
}

#[test]
fn given_a_status_failure_should_show_the_error_state() {
    let mut service = MockStorageService::new();
    service
        .expect_status()
        .times(1)
        .returning(|_| async { Err(RequestError::with_status(500)) }.boxed());
    let (errors, on_error) = recorder::<String>();
    let (renderer, mut driver) = mount(
        service,
        StoragePageProps {
            on_error: Some(on_error),
            ..Default::default()
        },
    );

    driver.process_events();

    assert_eq!(driver.state().state, StoragePageAutomaton::Error);
    assert_eq!(renderer.last().and_then(|view| view.error), Some("ERROR 500".to_string()));
    // status failures are state, not host errors
    assert!(errors.lock().is_empty());
}

#[test]
fn given_offline_mode_should_tell_the_host() {
    let mut service = MockStorageService::new();
    service
        .expect_status()
        .returning(|_| async { Ok(StorageStatus { docs: 0, maxdocs: 100 }) }.boxed());
    let (toggles, on_toggle_offline) = recorder::<bool>();
    let (renderer, mut driver) = mount(
        service,
        StoragePageProps {
            on_toggle_offline: Some(on_toggle_offline),
            ..Default::default()
        },
    );
    driver.process_events();

    renderer.with_renders(|renders| renders[0].handlers.on_toggle_offline.call(()));
    driver.process_events();

    assert!(renderer.last().is_some_and(|view| view.offline));
    assert_eq!(*toggles.lock(), vec![true]);
}
