//! The asynchronous unit of work bound to a clickable element.

use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Outcome of one action execution.
pub type ActionResult = anyhow::Result<()>;

type ActionFn = dyn Fn() -> BoxFuture<'static, ActionResult> + Send + Sync;

/// A zero-argument async action.
///
/// Each call to [`Action::invoke`] builds a fresh future, so the same action
/// can run any number of times, including concurrently with itself. Clones
/// share the underlying closure.
#[derive(Clone)]
pub struct Action {
    inner: Arc<ActionFn>,
}

impl Action {
    /// Wrap an async closure that cannot fail.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            inner: Arc::new(move || -> BoxFuture<'static, ActionResult> {
                f().map(Ok::<(), anyhow::Error>).boxed()
            }),
        }
    }

    /// Wrap an async closure whose future may return an error.
    pub fn fallible<F, Fut, E>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        Self {
            inner: Arc::new(move || -> BoxFuture<'static, ActionResult> {
                f().map(|res| res.map_err(Into::<anyhow::Error>::into)).boxed()
            }),
        }
    }

    /// Build the future for one execution.
    pub fn invoke(&self) -> BoxFuture<'static, ActionResult> {
        (self.inner)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}
