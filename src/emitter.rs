//! Action emitter shared by view handlers and effects.

use flume::Sender;

use crate::cancel::Scope;
use crate::{Action, ActionFactory, Handler};

/// What travels on a controller's inbound channel.
pub(crate) enum Envelope<A> {
    Action { action: A, scope: Option<Scope> },
    Dispose,
}

/// Action emitter feeding a controller's inbound channel.
///
/// Clone this handle to dispatch actions from view handlers or effect tasks.
/// `Emitter` wraps a channel sender, making it cheap to clone and safe to use
/// from any thread; actions are always reduced in the order they are received.
///
/// # Example
///
/// ```rust
/// use vault_controllers::{Action, ActionFactory, ControllerLogic, Effect, Emitter, Handler};
///
/// #[derive(Clone, Debug)]
/// enum Event { Click }
///
/// impl Action for Event {
///     fn kind(&self) -> &'static str { "CLICK" }
/// }
///
/// #[derive(Clone)]
/// struct State { clicks: u32 }
///
/// #[derive(Clone, PartialEq)]
/// struct ViewProps {
///     clicks: u32,
///     on_click: Handler<()>,
/// }
///
/// struct Clicker;
///
/// impl ControllerLogic<Event, State, ViewProps> for Clicker {
///     type Handlers = Handler<()>;
///
///     fn init(&self, state: State) -> (State, Effect<Event>) {
///         (state, Effect::none())
///     }
///
///     fn reduce(&self, state: &State, event: &Event) -> State {
///         match event {
///             Event::Click => State { clicks: state.clicks + 1 },
///         }
///     }
///
///     fn bind(&self, emitter: &Emitter<Event>) -> Handler<()> {
///         emitter.bind(ActionFactory::constant(Event::Click))
///     }
///
///     fn view(&self, state: &State, on_click: &Handler<()>) -> ViewProps {
///         ViewProps { clicks: state.clicks, on_click: on_click.clone() }
///     }
/// }
/// ```
pub struct Emitter<A> {
    sender: Sender<Envelope<A>>,
    scope: Option<Scope>,
}

impl<A: Send> Clone for Emitter<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            scope: self.scope.clone(),
        }
    }
}

impl<A: Action> Emitter<A> {
    pub(crate) fn new(sender: Sender<Envelope<A>>) -> Self {
        Self {
            sender,
            scope: None,
        }
    }

    /// Emitter whose actions are dropped once `scope` is cancelled.
    pub(crate) fn scoped(&self, scope: Scope) -> Self {
        Self {
            sender: self.sender.clone(),
            scope: Some(scope),
        }
    }

    /// Emit an action.
    ///
    /// The action is queued for the controller loop. Emitting after the
    /// controller was disposed is silently ignored.
    pub fn emit(&self, action: A) {
        self.send(action).ok();
    }

    pub(crate) fn send(&self, action: A) -> Result<(), flume::SendError<Envelope<A>>> {
        self.sender.send(Envelope::Action {
            action,
            scope: self.scope.clone(),
        })
    }

    pub(crate) fn send_dispose(&self) -> Result<(), flume::SendError<Envelope<A>>> {
        self.sender.send(Envelope::Dispose)
    }

    /// Whether the effect owning this emitter was cancelled.
    ///
    /// Always `false` for the controller's own emitter.
    pub fn is_cancelled(&self) -> bool {
        self.scope.as_ref().is_some_and(Scope::is_cancelled)
    }

    /// Bind an action factory to this emitter, producing a view handler.
    ///
    /// Call this once per mount (from [`ControllerLogic::bind`](crate::ControllerLogic::bind))
    /// so the handler keeps the same identity across renders.
    pub fn bind<Args: 'static>(&self, factory: ActionFactory<Args, A>) -> Handler<Args> {
        let emitter = self.clone();
        Handler::new(move |args| emitter.emit(factory.create(args)))
    }
}
