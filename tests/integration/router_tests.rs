use std::sync::Arc;

use vault_controllers::controllers::router::{
    MenuItem, Route, Router, RouterAction, RouterEnv, RouterProps, RouterState, RouterViewProps,
};
use vault_controllers::{Link, Session, TestControllerDriver, TestControllerRuntime, TestRenderer};

use super::fakes::{MockTranslator, MockWindowOpener};

type Driver = TestControllerDriver<RouterAction, RouterState, RouterViewProps, Router, TestRenderer<RouterViewProps>>;

fn translator() -> MockTranslator {
    let mut translator = MockTranslator::new();
    translator
        .expect_translate()
        .returning(|locale, key| format!("{locale}:{key}"));
    translator
}

fn mount(opener: MockWindowOpener, props: RouterProps) -> (TestRenderer<RouterViewProps>, Driver) {
    let renderer = TestRenderer::new();
    let driver = TestControllerRuntime::new(
        Router::initial_state(props),
        Router::new(Arc::new(translator())),
        Router::reactions(RouterEnv {
            opener: Arc::new(opener),
        }),
        renderer.clone(),
    )
    .run();
    (renderer, driver)
}

fn select(renderer: &TestRenderer<RouterViewProps>, id: &str, href: Option<&str>) {
    renderer.with_renders(|renders| {
        renders[0].handlers.on_select_menu_item.call(MenuItem {
            id: id.to_string(),
            link: Link {
                href: href.map(str::to_string),
                target: None,
            },
        })
    });
}

#[test]
fn given_a_login_should_show_the_localized_home_menu() {
    let mut opener = MockWindowOpener::new();
    opener.expect_open().never();
    let (renderer, mut driver) = mount(
        opener,
        RouterProps {
            locale: "en".to_string(),
            ..Default::default()
        },
    );
    assert!(renderer.last().is_some_and(|view| view.menu.is_none() && view.path == "/authenticate"));

    renderer.with_renders(|renders| renders[0].handlers.on_login.call(Session("token".to_string())));
    driver.process_events();

    let view = renderer.last().expect("rendered");
    assert_eq!(view.path, "/");
    let labels: Vec<_> = view
        .menu
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.label)
        .collect();
    assert_eq!(labels, vec!["en:storage", "en:devices", "en:help", "en:logout"]);
}

#[test]
fn given_a_selected_locale_should_relocalize_the_menu() {
    let mut opener = MockWindowOpener::new();
    opener.expect_open().never();
    let (renderer, mut driver) = mount(
        opener,
        RouterProps {
            locale: "en".to_string(),
            session: Some(Session("token".to_string())),
            ..Default::default()
        },
    );

    renderer.with_renders(|renders| renders[0].handlers.on_select_locale.call("fr".to_string()));
    driver.process_events();

    let view = renderer.last().expect("rendered");
    assert_eq!(view.locale, "fr");
    assert_eq!(
        view.menu.and_then(|menu| menu.into_iter().find(|entry| entry.id == "help")).and_then(|entry| entry.href),
        Some("fr:help-link".to_string())
    );
}

#[test]
fn given_menu_selections_should_navigate_open_help_and_logout() {
    let mut opener = MockWindowOpener::new();
    opener
        .expect_open()
        .withf(|url: &str, target: &str| url == "https://help.example" && target == "_blank")
        .times(1)
        .returning(|_, _| None);
    let (renderer, mut driver) = mount(
        opener,
        RouterProps {
            locale: "en".to_string(),
            session: Some(Session("token".to_string())),
            ..Default::default()
        },
    );

    select(&renderer, "storage", None);
    driver.process_events();
    assert_eq!(driver.state().route, Route::Storage);

    select(&renderer, "help", Some("https://help.example"));
    driver.process_events();
    assert_eq!(driver.state().route, Route::Storage);

    select(&renderer, "logout", None);
    driver.process_events();
    assert_eq!(driver.state().route, Route::Authentication);
    assert_eq!(driver.state().session, None);
}
