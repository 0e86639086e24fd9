//! The controller runtime that orchestrates the action loop.

use core::future::Future;
use core::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use flume::Receiver;
use futures::future::{AbortHandle, Abortable, BoxFuture, FutureExt};

#[cfg(any(test, feature = "testing"))]
use futures::executor::{LocalPool, LocalSpawner};
#[cfg(any(test, feature = "testing"))]
use futures::task::LocalSpawnExt;

use crate::emitter::Envelope;
use crate::error::ControllerError;
use crate::observe::{NoopObserver, Observer};
use crate::{Action, ControllerLogic, Effect, Emitter, Reactions, Renderer};

/// A spawner trait for executing effect tasks on an async runtime.
///
/// This abstraction allows you to use whatever executor you want (tokio,
/// async-std, wasm-bindgen-futures, ...).
///
/// Function pointers and closures automatically implement this trait via the blanket implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>);
}

/// Implement Spawner for any callable type that matches the signature.
///
/// This includes function pointers, closures, and function items.
impl<F> Spawner for F
where
    F: Fn(Pin<Box<dyn Future<Output = ()> + Send>>),
{
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self(future)
    }
}

/// Effect tasks spawned by one controller, aborted together on dispose.
#[derive(Default)]
struct TaskSet {
    tasks: Vec<(AbortHandle, Arc<AtomicBool>)>,
}

impl TaskSet {
    fn track(&mut self, task: BoxFuture<'static, ()>) -> BoxFuture<'static, ()> {
        self.tasks.retain(|(_, done)| !done.load(Ordering::Acquire));

        let (abort, registration) = AbortHandle::new_pair();
        let done = Arc::new(AtomicBool::new(false));
        self.tasks.push((abort, done.clone()));

        async move {
            let _ = Abortable::new(task, registration).await;
            done.store(true, Ordering::Release);
        }
        .boxed()
    }

    fn live(&self) -> usize {
        self.tasks
            .iter()
            .filter(|(_, done)| !done.load(Ordering::Acquire))
            .count()
    }

    fn abort_all(&mut self) {
        for (abort, _) in self.tasks.drain(..) {
            abort.abort();
        }
    }
}

/// Host-side handle to a running controller.
///
/// Use it to push host actions (including prop updates) and to unmount the
/// controller.
pub struct ControllerHandle<A: Action> {
    emitter: Emitter<A>,
}

impl<A: Action> Clone for ControllerHandle<A> {
    fn clone(&self) -> Self {
        Self {
            emitter: self.emitter.clone(),
        }
    }
}

impl<A: Action> ControllerHandle<A> {
    pub fn dispatch(&self, action: A) -> Result<(), ControllerError> {
        self.emitter
            .send(action)
            .map_err(|_| ControllerError::Disposed)
    }

    /// Stop the controller loop, aborting every in-flight effect.
    pub fn dispose(&self) -> Result<(), ControllerError> {
        self.emitter
            .send_dispose()
            .map_err(|_| ControllerError::Disposed)
    }
}

/// The controller runtime that orchestrates the action loop.
///
/// One runtime is one mounted controller. It:
/// 1. Initializes state and initial effects via [`ControllerLogic::init`]
/// 2. Reduces each received action through [`ControllerLogic::reduce`]
/// 3. Lets the [`Reactions`] observe the tick and executes their effects
/// 4. Projects state to view props via [`ControllerLogic::view`] and renders them
///    unless they equal the previous snapshot
///
/// Effects feed their actions back into the same channel. Every spawned task is
/// tracked and aborted when the controller is disposed or dropped.
///
/// For testing with manual control, use [`TestControllerRuntime`] with a [`crate::TestRenderer`].
///
/// # Type Parameters
///
/// * `A` - The controller's action type
/// * `S` - The automaton state type
/// * `V` - The view props type produced by the projection
/// * `L` - The logic implementation type (implements [`ControllerLogic`])
/// * `R` - The renderer implementation type (implements [`Renderer`])
/// * `Sp` - The spawner implementation type (implements [`Spawner`])
pub struct ControllerRuntime<A, S, V, L, R, Sp>
where
    A: Action,
    S: Clone,
    L: ControllerLogic<A, S, V>,
    R: Renderer<V>,
    Sp: Spawner,
{
    logic: L,
    renderer: R,
    reactions: Reactions<A, S>,
    receiver: Receiver<Envelope<A>>,
    emitter: Emitter<A>,
    handlers: L::Handlers,
    state: S,
    last_props: Option<V>,
    spawner: Sp,
    tasks: TaskSet,
    observer: Box<dyn Observer<A, S, V>>,
}

impl<A, S, V, L, R, Sp> ControllerRuntime<A, S, V, L, R, Sp>
where
    A: Action,
    S: Clone + 'static,
    V: Clone + PartialEq + 'static,
    L: ControllerLogic<A, S, V>,
    R: Renderer<V>,
    Sp: Spawner,
{
    /// Create a new runtime.
    ///
    /// The controller is not mounted until [`run`](Self::run) is called.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The mount-time automaton state
    /// * `logic` - Reducer and projection implementing [`ControllerLogic`]
    /// * `reactions` - The effect pipeline
    /// * `renderer` - Rendering implementation receiving view props
    /// * `spawner` - Spawner executing effect tasks on your chosen runtime
    pub fn new(
        initial_state: S,
        logic: L,
        reactions: Reactions<A, S>,
        renderer: R,
        spawner: Sp,
    ) -> Self {
        let (sender, receiver) = flume::unbounded();
        let emitter = Emitter::new(sender);
        let handlers = logic.bind(&emitter);

        ControllerRuntime {
            logic,
            renderer,
            reactions,
            receiver,
            emitter,
            handlers,
            state: initial_state,
            last_props: None,
            spawner,
            tasks: TaskSet::default(),
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<A, S, V> + 'static,
    {
        self.observer = Box::new(observer);
        self
    }

    pub fn handle(&self) -> ControllerHandle<A> {
        ControllerHandle {
            emitter: self.emitter.clone(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mount the controller and run the action loop until disposed.
    ///
    /// - Finalizes the initial state via [`ControllerLogic::init`] and renders it.
    /// - Executes the initial effect.
    /// - Processes actions from the channel until [`ControllerHandle::dispose`] is called.
    ///
    /// Actions can be dispatched from any thread, but are always reduced
    /// sequentially by the task awaiting this future.
    pub async fn run(mut self) {
        self.start();

        while let Ok(envelope) = self.receiver.recv_async().await {
            if !self.step(envelope) {
                break;
            }
        }

        self.dispose();
    }

    fn start(&mut self) {
        let (state, effect) = self.logic.init(self.state.clone());
        self.state = state;
        tracing::debug!("controller mounted");

        self.observer.on_state(&self.state);
        self.render();
        self.spawn(effect);
    }

    /// Handle one envelope; returns `false` once the controller must stop.
    fn step(&mut self, envelope: Envelope<A>) -> bool {
        match envelope {
            Envelope::Dispose => false,
            Envelope::Action { action, scope } => {
                if scope.as_ref().is_some_and(|scope| scope.is_cancelled()) {
                    tracing::trace!(kind = action.kind(), "dropping action of a cancelled effect");
                } else {
                    self.apply(action);
                }
                true
            }
        }
    }

    fn apply(&mut self, action: A) {
        self.observer.on_action(&action);

        let next = self.logic.reduce(&self.state, &action);
        let effect = self.reactions.react(&action, &self.state, &next);
        self.state = next;
        self.observer.on_state(&self.state);

        self.render();
        self.spawn(effect);
    }

    fn render(&mut self) {
        let props = self.logic.view(&self.state, &self.handlers);
        if self.last_props.as_ref() == Some(&props) {
            return;
        }

        self.observer.on_view_props(&props);
        self.renderer.render(props.clone());
        self.last_props = Some(props);
    }

    fn spawn(&mut self, effect: Effect<A>) {
        if let Some(task) = effect.execute(&self.emitter) {
            let task = self.tasks.track(task);
            self.spawner.spawn(task);
        }
    }

    /// Abort every in-flight effect task.
    ///
    /// Called when the loop stops; also runs when the runtime is dropped.
    pub fn dispose(&mut self) {
        let live = self.tasks.live();
        self.tasks.abort_all();
        tracing::debug!(aborted = live, "controller disposed");
    }
}

impl<A, S, V, L, R, Sp> Drop for ControllerRuntime<A, S, V, L, R, Sp>
where
    A: Action,
    S: Clone,
    L: ControllerLogic<A, S, V>,
    R: Renderer<V>,
    Sp: Spawner,
{
    fn drop(&mut self) {
        self.tasks.abort_all();
    }
}

#[cfg(any(test, feature = "testing"))]
/// Spawner running effect tasks on a single-threaded [`LocalPool`].
pub struct TestSpawner(LocalSpawner);

#[cfg(any(test, feature = "testing"))]
impl Spawner for TestSpawner {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        if let Err(error) = self.0.spawn_local(future) {
            tracing::warn!(%error, "failed to spawn effect task");
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime for controllers with manual action processing control.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`ControllerRuntime`], this runtime does not process actions when they
/// are dispatched. Tests call [`process_events`](TestControllerDriver::process_events)
/// on the returned driver, which reduces queued actions and drives effect tasks on
/// a single-threaded pool until nothing is left to do.
///
/// ```rust
/// use vault_controllers::{
///     Action, ActionFactory, ControllerLogic, Effect, Emitter, Handler, Reactions, TestControllerRuntime,
///     TestRenderer,
/// };
/// # #[derive(Clone, Debug)]
/// # enum Tick { Increment }
/// # impl Action for Tick { fn kind(&self) -> &'static str { "INCREMENT" } }
/// # #[derive(Clone, Debug)]
/// # struct State { count: i32 }
/// # #[derive(Clone, PartialEq)]
/// # struct ViewProps { count: i32, on_click: Handler<()> }
/// # struct Counter;
/// # impl ControllerLogic<Tick, State, ViewProps> for Counter {
/// #     type Handlers = Handler<()>;
/// #     fn init(&self, state: State) -> (State, Effect<Tick>) { (state, Effect::none()) }
/// #     fn reduce(&self, state: &State, _: &Tick) -> State { State { count: state.count + 1 } }
/// #     fn bind(&self, emitter: &Emitter<Tick>) -> Handler<()> {
/// #         emitter.bind(ActionFactory::constant(Tick::Increment))
/// #     }
/// #     fn view(&self, state: &State, on_click: &Handler<()>) -> ViewProps {
/// #         ViewProps { count: state.count, on_click: on_click.clone() }
/// #     }
/// # }
/// let renderer = TestRenderer::new();
/// let runtime = TestControllerRuntime::new(
///     State { count: 0 },
///     Counter,
///     Reactions::new(),
///     renderer.clone(),
/// );
/// let mut driver = runtime.run();
///
/// renderer.with_renders(|renders| renders[0].on_click.call(()));
/// driver.process_events();
///
/// assert_eq!(renderer.last().map(|props| props.count), Some(1));
/// ```
pub struct TestControllerRuntime<A, S, V, L, R>
where
    A: Action,
    S: Clone,
    L: ControllerLogic<A, S, V>,
    R: Renderer<V>,
{
    runtime: ControllerRuntime<A, S, V, L, R, TestSpawner>,
    pool: LocalPool,
}

#[cfg(any(test, feature = "testing"))]
impl<A, S, V, L, R> TestControllerRuntime<A, S, V, L, R>
where
    A: Action,
    S: Clone + 'static,
    V: Clone + PartialEq + 'static,
    L: ControllerLogic<A, S, V>,
    R: Renderer<V>,
{
    /// Create a new test runtime.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The mount-time automaton state
    /// * `logic` - Reducer and projection implementing [`ControllerLogic`]
    /// * `reactions` - The effect pipeline
    /// * `renderer` - Rendering implementation receiving view props
    pub fn new(initial_state: S, logic: L, reactions: Reactions<A, S>, renderer: R) -> Self {
        let pool = LocalPool::new();
        let spawner = TestSpawner(pool.spawner());

        TestControllerRuntime {
            runtime: ControllerRuntime::new(initial_state, logic, reactions, renderer, spawner),
            pool,
        }
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<A, S, V> + 'static,
    {
        self.runtime = self.runtime.with_observer(observer);
        self
    }

    /// Mounts the controller and returns a driver for manual action processing.
    ///
    /// The initial state is rendered and the initial effect executed, but its
    /// emitted actions stay queued until [`process_events`](TestControllerDriver::process_events).
    pub fn run(self) -> TestControllerDriver<A, S, V, L, R> {
        let TestControllerRuntime { mut runtime, pool } = self;
        runtime.start();

        TestControllerDriver {
            runtime,
            pool,
            disposed: false,
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test runtime driver for manual action processing control.
///
/// Returned by [`TestControllerRuntime::run`].
pub struct TestControllerDriver<A, S, V, L, R>
where
    A: Action,
    S: Clone,
    L: ControllerLogic<A, S, V>,
    R: Renderer<V>,
{
    runtime: ControllerRuntime<A, S, V, L, R, TestSpawner>,
    pool: LocalPool,
    disposed: bool,
}

#[cfg(any(test, feature = "testing"))]
impl<A, S, V, L, R> TestControllerDriver<A, S, V, L, R>
where
    A: Action,
    S: Clone + 'static,
    V: Clone + PartialEq + 'static,
    L: ControllerLogic<A, S, V>,
    R: Renderer<V>,
{
    pub fn handle(&self) -> ControllerHandle<A> {
        self.runtime.handle()
    }

    /// Queue an action, as a host or view would.
    pub fn dispatch(&self, action: A) {
        self.runtime.emitter.emit(action);
    }

    /// Process queued actions and run effect tasks until both are idle.
    pub fn process_events(&mut self) {
        if self.disposed {
            return;
        }

        loop {
            self.pool.run_until_stalled();

            let mut stepped = false;
            while let Ok(envelope) = self.runtime.receiver.try_recv() {
                stepped = true;
                if !self.runtime.step(envelope) {
                    self.unmount();
                    return;
                }
            }

            if !stepped {
                break;
            }
        }
    }

    /// Dispose the controller, aborting in-flight effects.
    pub fn unmount(&mut self) {
        self.disposed = true;
        self.runtime.dispose();
        self.pool.run_until_stalled();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn state(&self) -> &S {
        self.runtime.state()
    }

    /// Number of effect tasks still in flight.
    pub fn live_tasks(&self) -> usize {
        self.runtime.tasks.live()
    }
}
