//! Renderer abstraction for view props.

#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// Renderer abstraction for view props.
///
/// Implement this trait to hand view props to the rendering layer
/// (DOM bindings, terminal, native widgets, ...).
///
/// [`render`](Self::render) is called on mount and then whenever a reduced action
/// yields view props that differ from the previous snapshot.
///
/// # Example
///
/// ```rust
/// use vault_controllers::Renderer;
///
/// struct BannerProps {
///     pending: bool,
///     error: Option<String>,
/// }
///
/// struct StatusLine(String);
///
/// impl Renderer<BannerProps> for StatusLine {
///     fn render(&mut self, props: BannerProps) {
///         self.0 = match (props.pending, props.error) {
///             (_, Some(error)) => error,
///             (true, None) => "...".to_string(),
///             (false, None) => String::new(),
///         };
///     }
/// }
///
/// let mut line = StatusLine(String::new());
/// line.render(BannerProps { pending: false, error: Some("ERROR 401".to_string()) });
/// assert_eq!(line.0, "ERROR 401");
/// ```
pub trait Renderer<V> {
    /// Render the given view props.
    ///
    /// View props may carry [`Handler`](crate::Handler)s that dispatch actions
    /// back into the controller.
    fn render(&mut self, props: V);
}

impl<V> Renderer<V> for Box<dyn Renderer<V> + Send> {
    fn render(&mut self, props: V) {
        (**self).render(props)
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test renderer that captures all rendered view props for assertions.
///
/// Only available with the `testing` feature.
///
/// # Example
///
/// ```rust
/// use vault_controllers::{Renderer, TestRenderer};
///
/// let renderer = TestRenderer::<u32>::new();
/// let mut boxed = renderer.boxed();
/// boxed.render(7);
///
/// assert_eq!(renderer.count(), 1);
/// assert_eq!(renderer.last(), Some(7));
/// ```
pub struct TestRenderer<V> {
    renders: Arc<Mutex<Vec<V>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<V> Clone for TestRenderer<V> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<V> Renderer<V> for TestRenderer<V> {
    fn render(&mut self, props: V) {
        self.renders.lock().push(props);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<V: 'static + Send> Default for TestRenderer<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<V: 'static + Send> TestRenderer<V> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a boxed renderer sharing this renderer's capture storage.
    pub fn boxed(&self) -> Box<dyn Renderer<V> + Send> {
        Box::new(self.clone())
    }

    /// Get the number of renders that have occurred.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the captured renders with a closure.
    ///
    /// Use it to assert on view props or to invoke their handlers.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<V>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }

    pub fn last(&self) -> Option<V>
    where
        V: Clone,
    {
        self.renders.lock().last().cloned()
    }
}
