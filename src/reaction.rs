//! Reactions: the effect pipeline observing every reduced action.

use crate::{Action, Automaton, Effect, Handler};

/// Observes each tick of a controller and describes the follow-up work.
///
/// A tick is one reduced action along with the state before and after it.
/// Reactions run in registration order right after the reducer; the effects
/// they return are merged and executed by the runtime. Actions emitted by those
/// effects re-enter the same reducer.
pub trait Reaction<A: Action, S>: Send {
    fn react(&mut self, action: &A, previous: &S, current: &S) -> Effect<A>;
}

/// Reaction backed by a closure, see [`from_fn`].
pub struct FnReaction<F>(F);

impl<A, S, F> Reaction<A, S> for FnReaction<F>
where
    A: Action,
    F: FnMut(&A, &S, &S) -> Effect<A> + Send,
{
    fn react(&mut self, action: &A, previous: &S, current: &S) -> Effect<A> {
        (self.0)(action, previous, current)
    }
}

pub fn from_fn<A, S, F>(f: F) -> FnReaction<F>
where
    A: Action,
    F: FnMut(&A, &S, &S) -> Effect<A> + Send,
{
    FnReaction(f)
}

/// Every reaction of one controller, merged.
pub struct Reactions<A, S>(Vec<Box<dyn Reaction<A, S>>>);

impl<A: Action, S> Default for Reactions<A, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action, S> Reactions<A, S> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with<R>(mut self, reaction: R) -> Self
    where
        R: Reaction<A, S> + 'static,
    {
        self.0.push(Box::new(reaction));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn react(&mut self, action: &A, previous: &S, current: &S) -> Effect<A> {
        Effect::batch(
            self.0
                .iter_mut()
                .map(|reaction| reaction.react(action, previous, current))
                .collect(),
        )
    }
}

/// Call a host handler whenever a matching action is reduced.
///
/// The handler is read from the state after the action was reduced. When it is
/// absent nothing happens; when present it is called exactly once with
/// `project(state, action)`. The reaction never emits actions.
pub fn call_handler_on<A, S, V, M, H, P>(
    matches: M,
    handler: H,
    project: P,
) -> impl Reaction<A, S>
where
    A: Action,
    V: Send + 'static,
    M: Fn(&A) -> bool + Send,
    H: Fn(&S) -> Option<&Handler<V>> + Send,
    P: Fn(&S, &A) -> V + Send,
{
    from_fn(move |action: &A, _previous: &S, current: &S| {
        if !matches(action) {
            return Effect::none();
        }
        match handler(current) {
            Some(handler) => {
                let handler = handler.clone();
                let value = project(current, action);
                Effect::call(move || handler.call(value))
            }
            None => Effect::none(),
        }
    })
}

/// React once per entry into the `target` state.
///
/// Remaining in `target` across ticks does not fire again; leaving and
/// re-entering it does.
pub fn on_entering<A, S, F>(target: S::Tag, mut f: F) -> impl Reaction<A, S>
where
    A: Action,
    S: Automaton,
    S::Tag: Send,
    F: FnMut(&S) -> Effect<A> + Send,
{
    from_fn(move |_action: &A, previous: &S, current: &S| {
        if current.entered(previous, target) {
            f(current)
        } else {
            Effect::none()
        }
    })
}
