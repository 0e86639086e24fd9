mod fakes;
mod simple_logic;

use vault_controllers::{Effect, Reactions, TestControllerDriver, TestControllerRuntime, TestRenderer};
pub(crate) use simple_logic::*;

mod authentication_modal_tests;
mod reduction_and_emission_tests;
mod router_tests;
mod storage_page_tests;

pub(crate) type TestDriver = TestControllerDriver<TestAction, TestState, TestViewProps, TestLogic, TestRenderer<TestViewProps>>;

pub(crate) struct IntegrationTest {
    pub(crate) driver: TestDriver,
    pub(crate) renders: TestRenderer<TestViewProps>,
}

pub(crate) fn build_integration_test() -> IntegrationTestBuilder {
    IntegrationTestBuilder {
        initial_effect: None,
        on_increment: None,
        reactions: Reactions::new(),
    }
}

pub(crate) struct IntegrationTestBuilder {
    initial_effect: Option<Effect<TestAction>>,
    on_increment: Option<MockEffectsDependency>,
    reactions: Reactions<TestAction, TestState>,
}

impl IntegrationTestBuilder {
    pub(crate) fn given_no_initial_event(mut self) -> Self {
        self.initial_effect = Some(Effect::none());
        self
    }

    pub(crate) fn given_an_initial_effect(mut self, effect: Effect<TestAction>) -> Self {
        self.initial_effect = Some(effect);
        self
    }

    pub(crate) fn given_on_increment_has_no_side_effect(self) -> Self {
        self.given_an_on_increment_side_effect(|_| Effect::none())
    }

    // Called once per reduced increment with the incremented count.
    pub(crate) fn given_an_on_increment_side_effect<F>(mut self, side_effect: F) -> Self
    where
        F: Fn(i32) -> Effect<TestAction> + Send + 'static,
    {
        let mut effects = MockEffectsDependency::new();
        effects
            .expect_on_increment_side_effect()
            .returning(move |count| side_effect(count));
        self.on_increment = Some(effects);
        self
    }

    pub(crate) fn given_a_reaction<R>(mut self, reaction: R) -> Self
    where
        R: vault_controllers::Reaction<TestAction, TestState> + 'static,
    {
        self.reactions = self.reactions.with(reaction);
        self
    }

    pub(crate) fn build(self) -> IntegrationTest {
        let renders = TestRenderer::new();

        // Only acceptable in the context of integration testing.
        let initial_effect = self.initial_effect.unwrap_or_else(Effect::none);
        let mut initial_effects = MockInitialEffectsDependency::new();
        initial_effects
            .expect_on_init()
            .times(1)
            .return_once(move || initial_effect);

        let mut reactions = self.reactions;
        if let Some(effects) = self.on_increment {
            reactions = reactions.with(OnIncrement(Box::new(effects)));
        }

        let logic = TestLogic {
            initial_effects: Box::new(initial_effects),
        };

        let driver = TestControllerRuntime::new(TestState { count: 0 }, logic, reactions, renders.clone()).run();

        IntegrationTest { driver, renders }
    }
}
