use vault_controllers::{Action, ActionFactory, ControllerLogic, Effect, Emitter, Handler, Reaction};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TestAction {
    Increment,
    Reset,
    Loaded(i32),
}

impl Action for TestAction {
    fn kind(&self) -> &'static str {
        match self {
            TestAction::Increment => "INCREMENT",
            TestAction::Reset => "RESET",
            TestAction::Loaded(_) => "LOADED",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestState {
    pub(crate) count: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestViewProps {
    pub(crate) count: i32,
    pub(crate) on_increment: Handler<()>,
    pub(crate) on_reset: Handler<()>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestHandlers {
    on_increment: Handler<()>,
    on_reset: Handler<()>,
}

pub(crate) struct TestLogic {
    pub(crate) initial_effects: Box<dyn InitialEffectsDependency + Send>,
}

#[cfg_attr(test, mockall::automock)]
pub(crate) trait InitialEffectsDependency {
    fn on_init(&self) -> Effect<TestAction>;
}

#[cfg_attr(test, mockall::automock)]
pub(crate) trait EffectsDependency {
    fn on_increment_side_effect(&self, count: i32) -> Effect<TestAction>;
}

/// Reaction delegating increments to an [`EffectsDependency`].
pub(crate) struct OnIncrement(pub(crate) Box<dyn EffectsDependency + Send>);

impl Reaction<TestAction, TestState> for OnIncrement {
    fn react(&mut self, action: &TestAction, _previous: &TestState, current: &TestState) -> Effect<TestAction> {
        match action {
            TestAction::Increment => self.0.on_increment_side_effect(current.count),
            _ => Effect::none(),
        }
    }
}

impl ControllerLogic<TestAction, TestState, TestViewProps> for TestLogic {
    type Handlers = TestHandlers;

    fn init(&self, state: TestState) -> (TestState, Effect<TestAction>) {
        let effect = self.initial_effects.on_init();
        (state, effect)
    }

    fn reduce(&self, state: &TestState, action: &TestAction) -> TestState {
        match action {
            TestAction::Increment => TestState { count: state.count + 1 },
            TestAction::Reset => TestState { count: 0 },
            TestAction::Loaded(count) => TestState { count: *count },
        }
    }

    fn bind(&self, emitter: &Emitter<TestAction>) -> TestHandlers {
        TestHandlers {
            on_increment: emitter.bind(ActionFactory::constant(TestAction::Increment)),
            on_reset: emitter.bind(ActionFactory::constant(TestAction::Reset)),
        }
    }

    fn view(&self, state: &TestState, handlers: &TestHandlers) -> TestViewProps {
        TestViewProps {
            count: state.count,
            on_increment: handlers.on_increment.clone(),
            on_reset: handlers.on_reset.clone(),
        }
    }
}
