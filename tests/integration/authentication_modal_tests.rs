use std::sync::Arc;

use futures::{stream, StreamExt};
use vault_controllers::controllers::authentication_modal::{
    AuthenticationModal, AuthenticationModalAction, AuthenticationModalEnv, AuthenticationModalProps,
    AuthenticationModalState, AuthenticationModalViewProps, AuthenticationState,
};
use vault_controllers::{RequestError, Session, TestControllerDriver, TestControllerRuntime, TestRenderer};

use super::fakes::{recorder, MockAuthenticator};

type Driver = TestControllerDriver<
    AuthenticationModalAction,
    AuthenticationModalState,
    AuthenticationModalViewProps,
    AuthenticationModal,
    TestRenderer<AuthenticationModalViewProps>,
>;

fn mount(
    authenticator: MockAuthenticator,
    props: AuthenticationModalProps,
) -> (TestRenderer<AuthenticationModalViewProps>, Driver) {
    let renderer = TestRenderer::new();
    let env = AuthenticationModalEnv {
        authenticator: Arc::new(authenticator),
    };
    let driver = TestControllerRuntime::new(
        AuthenticationModal::initial_state(props),
        AuthenticationModal,
        AuthenticationModal::reactions(env),
        renderer.clone(),
    )
    .run();
    (renderer, driver)
}

fn submit(renderer: &TestRenderer<AuthenticationModalViewProps>, driver: &mut Driver, secret: &str) {
    let handlers = renderer.with_renders(|renders| renders[renders.len() - 1].handlers.clone());
    handlers.on_change.call(secret.to_string());
    handlers.on_submit.call(());
    driver.process_events();
}

#[test]
fn given_a_wrong_secret_should_show_unauthorized_and_let_the_user_retry() {
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_authenticate()
        .withf(|secret: &str| secret == "secret")
        .times(1)
        .returning(|_| stream::iter(vec![Err(RequestError::with_status(401))]).boxed());
    authenticator
        .expect_authenticate()
        .withf(|secret: &str| secret == "correct horse")
        .times(1)
        .returning(|_| stream::iter(vec![Ok(Session("token".to_string()))]).boxed());
    let (submitted, on_submit) = recorder::<String>();
    let (sessions, on_authenticated) = recorder::<Session>();
    let (renderer, mut driver) = mount(
        authenticator,
        AuthenticationModalProps {
            on_submit: Some(on_submit),
            on_authenticated: Some(on_authenticated),
            ..Default::default()
        },
    );

    submit(&renderer, &mut driver, "secret");

    let view = renderer.last().expect("rendered");
    assert_eq!(view.error.as_deref(), Some("ERROR 401"));
    assert!(view.value.is_empty());
    assert!(!view.pending);

    submit(&renderer, &mut driver, "correct horse");

    assert_eq!(driver.state().state, AuthenticationState::Authenticated);
    assert_eq!(*submitted.lock(), vec!["secret".to_string(), "correct horse".to_string()]);
    assert_eq!(*sessions.lock(), vec![Session("token".to_string())]);
}

#[test]
fn given_a_server_error_should_show_its_message() {
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_authenticate()
        .times(1)
        .returning(|_| stream::iter(vec![Err(RequestError::new(503, "maintenance"))]).boxed());
    let (_, on_authenticated) = recorder::<Session>();
    let (renderer, mut driver) = mount(
        authenticator,
        AuthenticationModalProps {
            on_authenticated: Some(on_authenticated),
            ..Default::default()
        },
    );

    submit(&renderer, &mut driver, "secret");

    assert_eq!(driver.state().state, AuthenticationState::Error);
    assert_eq!(driver.state().error.as_deref(), Some("maintenance"));
}

#[test]
fn given_cancel_while_authenticating_should_call_on_cancel_and_ignore_the_late_result() {
    let mut authenticator = MockAuthenticator::new();
    authenticator
        .expect_authenticate()
        .times(1)
        .returning(|_| stream::pending::<Result<Session, RequestError>>().boxed());
    let (cancelled, on_cancel) = recorder::<()>();
    let (sessions, on_authenticated) = recorder::<Session>();
    let (renderer, mut driver) = mount(
        authenticator,
        AuthenticationModalProps {
            on_cancel: Some(on_cancel),
            on_authenticated: Some(on_authenticated),
            ..Default::default()
        },
    );

    submit(&renderer, &mut driver, "secret");
    assert!(renderer.last().is_some_and(|view| view.pending));

    renderer.with_renders(|renders| renders[0].handlers.on_cancel.call(()));
    driver.process_events();

    assert_eq!(driver.state().state, AuthenticationState::Idle);
    assert_eq!(driver.live_tasks(), 0);
    assert_eq!(cancelled.lock().len(), 1);
    assert!(sessions.lock().is_empty());
}

#[test]
fn given_toggle_cleartext_should_flip_the_view_flag() {
    let mut authenticator = MockAuthenticator::new();
    authenticator.expect_authenticate().never();
    let (renderer, mut driver) = mount(authenticator, AuthenticationModalProps::default());

    renderer.with_renders(|renders| renders[0].handlers.on_toggle_cleartext.call(()));
    driver.process_events();

    assert!(renderer.last().is_some_and(|view| view.cleartext));
}
