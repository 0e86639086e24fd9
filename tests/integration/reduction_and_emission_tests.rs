use super::{build_integration_test, TestAction};
use vault_controllers::Effect;

#[test]
fn given_no_initial_event_should_render_initial_props() {
    let test = build_integration_test().given_no_initial_event().build();

    assert_eq!(test.renders.count(), 1);
    test.renders.with_renders(|renders| {
        assert_eq!(renders[0].count, 0);
    });
}

#[test]
fn given_an_initial_increment_event_should_render_twice() {
    let mut test = build_integration_test()
        .given_an_initial_effect(Effect::just(TestAction::Increment))
        .build();

    test.driver.process_events();

    assert_eq!(test.renders.count(), 2);
    test.renders.with_renders(|renders| {
        assert_eq!(renders[0].count, 0);
        assert_eq!(renders[1].count, 1);
    });
}

#[test]
fn given_no_initial_event_when_props_handler_invoked_should_render_again() {
    let mut test = build_integration_test().given_no_initial_event().build();

    test.renders.with_renders(|renders| {
        renders[0].on_increment.call(());
    });

    test.driver.process_events();

    assert_eq!(test.renders.count(), 2);
    test.renders.with_renders(|renders| {
        assert_eq!(renders[1].count, 1);
    });
}

#[test]
fn given_an_action_leaving_view_props_unchanged_should_not_render_again() {
    let mut test = build_integration_test().given_no_initial_event().build();

    test.driver.dispatch(TestAction::Reset);
    test.driver.dispatch(TestAction::Loaded(0));
    test.driver.process_events();

    assert_eq!(test.renders.count(), 1);
}

#[test]
fn given_several_renders_should_hand_out_the_same_handlers() {
    let mut test = build_integration_test().given_no_initial_event().build();

    test.driver.dispatch(TestAction::Increment);
    test.driver.process_events();

    test.renders.with_renders(|renders| {
        assert_eq!(renders.len(), 2);
        assert_eq!(renders[0].on_increment, renders[1].on_increment);
        assert_ne!(renders[0].on_increment, renders[1].on_reset);
    });
}

#[test]
fn given_the_same_actions_should_reduce_them_in_dispatch_order() {
    let mut test = build_integration_test().given_no_initial_event().build();

    for action in [
        TestAction::Increment,
        TestAction::Loaded(7),
        TestAction::Increment,
        TestAction::Reset,
        TestAction::Increment,
    ] {
        test.driver.dispatch(action);
    }
    test.driver.process_events();

    let counts: Vec<_> = test
        .renders
        .with_renders(|renders| renders.iter().map(|props| props.count).collect());
    assert_eq!(counts, vec![0, 1, 7, 8, 0, 1]);
}
