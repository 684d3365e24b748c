//! Trigger-to-task translation.
//!
//! A host element calls its trigger callback synchronously on its
//! event-dispatch context. [`ActionAdapter`] answers that call by spawning one
//! independent execution of its [`Action`] and returning at once. Executions
//! are never awaited, serialized or coalesced, and they outlive the adapter.

use crate::action::Action;
use crate::error::{ActionFailure, ErrorPolicy};
use crate::spawn::{Spawner, TaskHandle};
use futures::channel::oneshot;
use futures::future::{self, FutureExt};
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Synchronous callback handed to a host element.
pub type TriggerCallback = Arc<dyn Fn() + Send + Sync>;

/// Binds one [`Action`] to a spawner and an error policy.
///
/// The binding is fixed once the adapter exists.
pub struct ActionAdapter {
    action: Action,
    spawner: Arc<dyn Spawner>,
    policy: ErrorPolicy,
    triggers: AtomicU64,
}

impl ActionAdapter {
    pub fn new(action: Action, spawner: Arc<dyn Spawner>) -> Self {
        Self {
            action,
            spawner,
            policy: ErrorPolicy::default(),
            triggers: AtomicU64::new(0),
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn error_policy(&self) -> &ErrorPolicy {
        &self.policy
    }

    /// Spawn one execution and return immediately. No handle is kept.
    pub fn trigger(&self) {
        let seq = self.next_seq();
        let run = execute(self.action.clone(), self.policy.clone(), seq);
        self.spawner.spawn(Box::pin(run));
    }

    /// Spawn one execution and return a handle that can abort or await it.
    pub fn trigger_with_handle(&self) -> TaskHandle {
        let seq = self.next_seq();
        let (run, abort) =
            future::abortable(execute(self.action.clone(), self.policy.clone(), seq));
        let finished = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = oneshot::channel();

        let completion = Completion {
            finished: finished.clone(),
            done: Some(done_tx),
        };
        self.spawner.spawn(Box::pin(async move {
            // Signals completion on drop, so a policy that panics still
            // marks the execution as ended.
            let _completion = completion;
            if run.await.is_err() {
                tracing::debug!(seq, "async action aborted");
            }
        }));

        TaskHandle::new(abort, finished, done_rx)
    }

    /// Consume the adapter into the callback a host element stores.
    pub fn into_callback(self) -> TriggerCallback {
        let adapter = Arc::new(self);
        Arc::new(move || adapter.trigger())
    }

    fn next_seq(&self) -> u64 {
        self.triggers.fetch_add(1, Ordering::Relaxed)
    }
}

impl fmt::Debug for ActionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionAdapter")
            .field("policy", &self.policy)
            .field("triggers", &self.triggers.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Marks a handled execution as ended when the wrapper task finishes or
/// unwinds.
struct Completion {
    finished: Arc<AtomicBool>,
    done: Option<oneshot::Sender<()>>,
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.finished.store(true, Ordering::Release);
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
    }
}

/// Body of every spawned task: run the action, then report any failure.
async fn execute(action: Action, policy: ErrorPolicy, seq: u64) {
    tracing::debug!(seq, "async action started");
    // Building the future runs caller code too, so it happens inside the
    // guarded block.
    let outcome = AssertUnwindSafe(async { action.invoke().await })
        .catch_unwind()
        .await;
    let failure = match outcome {
        Ok(Ok(())) => {
            tracing::debug!(seq, "async action finished");
            return;
        }
        Ok(Err(e)) => ActionFailure::Failed(e),
        Err(payload) => ActionFailure::from_panic(payload),
    };
    policy.report(failure);
}
