//! Task scheduling seam.
//!
//! The adapter never names a runtime directly; it hands boxed futures to a
//! [`Spawner`]. Handles returned to callers are built on `futures`
//! primitives so they behave the same on every spawner.

use crate::error::SpawnError;
use futures::channel::oneshot;
use futures::future::AbortHandle;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A detached unit of work ready to be scheduled.
pub type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Something that can run a future to completion in the background.
pub trait Spawner: Send + Sync {
    /// Schedule `task` and return without waiting for it.
    fn spawn(&self, task: BoxedTask);
}

impl<F> Spawner for F
where
    F: Fn(BoxedTask) + Send + Sync,
{
    fn spawn(&self, task: BoxedTask) {
        self(task)
    }
}

/// Spawner for the Tokio runtime.
///
/// Holds a runtime handle rather than relying on `tokio::spawn`, so it can be
/// used from threads that are not inside the runtime (a UI thread, for
/// instance).
#[derive(Debug, Clone)]
pub struct TokioSpawner {
    handle: tokio::runtime::Handle,
}

impl TokioSpawner {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime the calling thread is running in.
    pub fn current() -> Result<Self, SpawnError> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|_| SpawnError::NoRuntime)
    }
}

impl Spawner for TokioSpawner {
    fn spawn(&self, task: BoxedTask) {
        // Dropping the JoinHandle detaches the task.
        drop(self.handle.spawn(task));
    }
}

/// Opt-in handle to one spawned action execution.
///
/// Dropping the handle detaches the execution; it keeps running.
pub struct TaskHandle {
    abort: AbortHandle,
    finished: Arc<AtomicBool>,
    done: oneshot::Receiver<()>,
}

impl TaskHandle {
    pub(crate) fn new(
        abort: AbortHandle,
        finished: Arc<AtomicBool>,
        done: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            abort,
            finished,
            done,
        }
    }

    /// Request cancellation. The action stops at its next suspension point.
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Whether the execution has ended, by completing or by being aborted.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Wait until the execution has ended.
    pub async fn join(self) {
        // The sender is dropped without sending if the task itself is
        // dropped by its runtime; either way the execution is over.
        let _ = self.done.await;
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("finished", &self.is_finished())
            .field("aborted", &self.is_aborted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokio_spawner() {
        let spawner = TokioSpawner::current().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();

        spawner.spawn(Box::pin(async move {
            tx.send(42).unwrap();
        }));

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[test]
    fn test_tokio_spawner_outside_runtime() {
        assert!(matches!(TokioSpawner::current(), Err(SpawnError::NoRuntime)));
    }

    #[test]
    fn test_spawn_from_foreign_thread() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let spawner = TokioSpawner::new(runtime.handle().clone());
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            spawner.spawn(Box::pin(async move {
                tx.send("ran").unwrap();
            }));
        })
        .join()
        .unwrap();

        let got = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        assert_eq!(got, "ran");
    }

    #[test]
    fn test_closure_spawner() {
        let spawner = |task: BoxedTask| futures::executor::block_on(task);
        let (tx, rx) = std::sync::mpsc::channel();
        spawner.spawn(Box::pin(async move {
            tx.send(7).unwrap();
        }));
        assert_eq!(rx.try_recv().unwrap(), 7);
    }
}
