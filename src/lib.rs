//! Event-driven finite-state controllers for a password manager client.
//!
//! Each controller turns host props and UI events into view props:
//!
//! ```text
//! view handlers / host ──► Emitter ──► channel ──► reduce ──► state
//!          ▲                                                 │
//!          │            Reactions ◄── (action, previous, current)
//!          │                │
//!          │                └─► Effect ──► emitted actions (re-enter the channel)
//!          │                                                  │
//!          └──────── Renderer ◄── view props ◄── view(state) ◄┘
//! ```
//!
//! A controller is a [`ControllerLogic`] (pure reducer and projection) plus a set of
//! [`Reactions`] (the effect pipeline), mounted by a [`ControllerRuntime`]. The
//! runtime is the single writer of state; effects only ever produce actions.
//! Cancellable effects are torn down by a designated action or when the controller
//! is disposed, whichever comes first.
//!
//! The [`controllers`] module provides the connection modal, authentication modal,
//! router and storage page controllers.
//!
//! ## Example
//!
//! ```rust
//! use vault_controllers::controllers::connection_modal::{
//!     ConnectionModal, ConnectionModalEnv, ConnectionModalProps, ConnectionModalViewProps,
//! };
//! use vault_controllers::{
//!     Clipboard, ClipboardError, ControllerRuntime, Renderer, TracingObserver, WindowOpener, WindowRef,
//! };
//! use futures::future::{BoxFuture, FutureExt};
//! use std::future::Future;
//! use std::pin::Pin;
//! use std::sync::Arc;
//!
//! struct NoClipboard;
//! impl Clipboard for NoClipboard {
//!     fn write_text(&self, _: &str) -> BoxFuture<'static, Result<(), ClipboardError>> {
//!         async { Ok(()) }.boxed()
//!     }
//! }
//!
//! struct NoWindows;
//! impl WindowOpener for NoWindows {
//!     fn open(&self, _: &str, _: &str) -> Option<WindowRef> { None }
//! }
//!
//! struct Log;
//! impl Renderer<ConnectionModalViewProps> for Log {
//!     fn render(&mut self, props: ConnectionModalViewProps) {
//!         println!("copy: {:?}", props.copy);
//!     }
//! }
//!
//! let env = ConnectionModalEnv {
//!     clipboard: Arc::new(NoClipboard),
//!     opener: Arc::new(NoWindows),
//! };
//!
//! // Spawn effect tasks on your chosen executor, e.g. tokio::spawn
//! let spawner = |_task: Pin<Box<dyn Future<Output = ()> + Send>>| {};
//!
//! let runtime = ControllerRuntime::new(
//!     ConnectionModal::initial_state(ConnectionModalProps::default()),
//!     ConnectionModal,
//!     ConnectionModal::reactions(env),
//!     Log,
//!     spawner,
//! )
//! .with_observer(TracingObserver::new("connection-modal"));
//!
//! let handle = runtime.handle();
//! // runtime.run() is a future; drive it on the executor and keep `handle`
//! // to dispatch host actions or dispose the controller.
//! # drop((runtime, handle));
//! ```

// Module declarations
mod action;
mod authorize;
mod cancel;
pub mod controllers;
mod effect;
mod emitter;
mod env;
mod error;
mod logic;
mod observe;
mod props;
mod reaction;
mod renderer;
mod runtime;

// Public re-exports
pub use action::{Action, ActionFactory};
pub use authorize::{AuthorizationActions, AuthorizationSpec, Authorizer};
pub use cancel::CancelHandle;
pub use effect::Effect;
pub use emitter::Emitter;
pub use env::{Authenticator, Clipboard, Link, Session, Translator, WindowHandle, WindowOpener, WindowRef};
pub use error::{ClipboardError, ControllerError, RequestError, DEFAULT_ERROR_STATUS, UNAUTHORIZED_STATUS};
pub use logic::{Automaton, ControllerLogic};
pub use observe::{NoopObserver, Observer, TracingObserver};
pub use props::{Attrs, Handler};
pub use reaction::{call_handler_on, from_fn, on_entering, FnReaction, Reaction, Reactions};
pub use renderer::Renderer;
pub use runtime::{ControllerHandle, ControllerRuntime, Spawner};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{TestControllerDriver, TestControllerRuntime, TestSpawner};
