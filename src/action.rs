//! Tagged actions and the factories that build them.

use core::fmt::Debug;
use std::sync::Arc;

/// An immutable record describing one discrete event entering a controller.
///
/// Every controller declares a closed enum of actions. The reducer matches on it
/// exhaustively; [`kind`](Self::kind) gives the stable tag used for logging.
pub trait Action: Clone + Debug + Send + Sync + 'static {
    /// Screaming-case tag of the action, e.g. `"CLICK_COPY"`.
    fn kind(&self) -> &'static str;
}

/// Builds actions from handler arguments.
///
/// A factory is a pure function: the same arguments always produce
/// structurally-equal actions. Factories are bound to an [`Emitter`](crate::Emitter)
/// with [`Emitter::bind`](crate::Emitter::bind) to produce view handlers.
///
/// # Example
///
/// ```rust
/// use vault_controllers::{Action, ActionFactory};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Event { Change(String), Cancel }
///
/// impl Action for Event {
///     fn kind(&self) -> &'static str {
///         match self {
///             Event::Change(_) => "CHANGE",
///             Event::Cancel => "CANCEL",
///         }
///     }
/// }
///
/// let change = ActionFactory::new(Event::Change);
/// assert_eq!(change.create("a".to_string()), Event::Change("a".to_string()));
///
/// let trimmed = ActionFactory::with_payload(Event::Change, |raw: &'static str| raw.trim().to_string());
/// assert_eq!(trimmed.create(" a "), Event::Change("a".to_string()));
///
/// let cancel = ActionFactory::constant(Event::Cancel);
/// assert_eq!(cancel.create(()), Event::Cancel);
/// ```
pub struct ActionFactory<Args, A> {
    make: Arc<dyn Fn(Args) -> A + Send + Sync>,
}

impl<Args, A> Clone for ActionFactory<Args, A> {
    fn clone(&self) -> Self {
        Self {
            make: self.make.clone(),
        }
    }
}

impl<Args: 'static, A: Action> ActionFactory<Args, A> {
    /// Factory whose payload is the argument itself.
    pub fn new<F>(ctor: F) -> Self
    where
        F: Fn(Args) -> A + Send + Sync + 'static,
    {
        Self {
            make: Arc::new(ctor),
        }
    }

    /// Factory that projects its arguments into the payload before building the action.
    pub fn with_payload<P, F, G>(ctor: F, projection: G) -> Self
    where
        P: 'static,
        F: Fn(P) -> A + Send + Sync + 'static,
        G: Fn(Args) -> P + Send + Sync + 'static,
    {
        Self {
            make: Arc::new(move |args| ctor(projection(args))),
        }
    }

    pub fn create(&self, args: Args) -> A {
        (self.make)(args)
    }
}

impl<A: Action> ActionFactory<(), A> {
    /// Factory for a payload-less action.
    pub fn constant(action: A) -> Self {
        Self {
            make: Arc::new(move |()| action.clone()),
        }
    }
}
