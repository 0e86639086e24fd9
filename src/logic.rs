//! Controller logic trait: reducer and projection.

use core::fmt::Debug;

use crate::{Action, Effect, Emitter};

/// Controller logic defining one finite-state machine and its projection.
///
/// Implementations provide pure functions:
/// - [`init`](Self::init): Finalize the mount-time state and produce initial effects
/// - [`reduce`](Self::reduce): Transform (State, Action) → State
/// - [`bind`](Self::bind): Bind view handlers to the controller's emitter (dispatch-to-props)
/// - [`view`](Self::view): Derive view props from state (state-to-props)
///
/// Side effects do not belong here; they are expressed as [`Reaction`](crate::Reaction)s.
pub trait ControllerLogic<A: Action, S, V> {
    /// Dispatching handlers exposed to the view, bound once per mount.
    type Handlers;

    /// Initialize the controller from its mount-time state.
    ///
    /// Called once when the runtime starts, before the first render.
    fn init(&self, state: S) -> (S, Effect<A>);

    /// Reduce an action to the next state.
    ///
    /// Must be total: actions that have no meaning in the current state return the
    /// state unchanged, except for fields that are merged in every state (host props).
    fn reduce(&self, state: &S, action: &A) -> S;

    /// Create the view handlers dispatching through `emitter`.
    fn bind(&self, emitter: &Emitter<A>) -> Self::Handlers;

    /// Project state to view props.
    fn view(&self, state: &S, handlers: &Self::Handlers) -> V;
}

/// A state record with a single active state tag.
pub trait Automaton {
    type Tag: Copy + Eq + Debug;

    fn tag(&self) -> Self::Tag;

    /// Whether going from `previous` to `self` enters `target`.
    ///
    /// Staying in `target` is not an entry.
    fn entered(&self, previous: &Self, target: Self::Tag) -> bool {
        self.tag() == target && previous.tag() != target
    }
}
