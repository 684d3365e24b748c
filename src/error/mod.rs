//! Failure taxonomy and the policy applied to failed action executions.
//!
//! Nothing raised by an action ever escapes the trigger callback. Once the
//! spawned task finishes with an error or a panic, the adapter hands the
//! failure to its [`ErrorPolicy`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// What went wrong inside one action execution.
#[derive(Debug, Error)]
pub enum ActionFailure {
    #[error("action returned an error: {0:#}")]
    Failed(anyhow::Error),

    #[error("action panicked: {0}")]
    Panicked(String),
}

impl ActionFailure {
    /// Build a failure from a panic payload caught with `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        ActionFailure::Panicked(panic_message(&*payload))
    }
}

/// The message carried by a panic payload, if it has one.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Raised when a button is built without an explicit spawner outside a
/// tokio runtime.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("no tokio runtime is running on this thread; pass a spawner explicitly")]
    NoRuntime,
}

/// Callback receiving failures under [`ErrorPolicy::Sink`].
pub type ErrorSink = Arc<dyn Fn(ActionFailure) + Send + Sync>;

/// How a failed action execution is reported.
#[derive(Clone, Default)]
pub enum ErrorPolicy {
    /// Emit a `tracing` error event.
    #[default]
    Log,
    /// Drop the failure.
    Discard,
    /// Re-panic inside the spawned task and leave it to the runtime.
    Propagate,
    /// Hand the failure to a caller-supplied callback.
    Sink(ErrorSink),
}

impl ErrorPolicy {
    pub fn sink<F>(f: F) -> Self
    where
        F: Fn(ActionFailure) + Send + Sync + 'static,
    {
        ErrorPolicy::Sink(Arc::new(f))
    }

    /// Apply the policy. Runs on the task that executed the action.
    pub fn report(&self, failure: ActionFailure) {
        match self {
            ErrorPolicy::Log => {
                tracing::error!(error = %failure, "async action failed");
            }
            ErrorPolicy::Discard => {}
            ErrorPolicy::Propagate => panic!("{failure}"),
            ErrorPolicy::Sink(sink) => sink(failure),
        }
    }
}

impl fmt::Debug for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Log => f.write_str("Log"),
            ErrorPolicy::Discard => f.write_str("Discard"),
            ErrorPolicy::Propagate => f.write_str("Propagate"),
            ErrorPolicy::Sink(_) => f.write_str("Sink(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_panic_payload_message() {
        let failure = ActionFailure::from_panic(Box::new("boom"));
        assert_eq!(failure.to_string(), "action panicked: boom");

        let failure = ActionFailure::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(failure.to_string(), "action panicked: owned boom");

        let failure = ActionFailure::from_panic(Box::new(42u32));
        assert_eq!(failure.to_string(), "action panicked: non-string panic payload");
    }

    #[test]
    fn test_failed_display_includes_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("upload");
        let failure = ActionFailure::Failed(err);
        assert_eq!(
            failure.to_string(),
            "action returned an error: upload: connection refused"
        );
    }

    #[test]
    fn test_sink_receives_failure() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let policy = ErrorPolicy::sink(move |f| seen_clone.lock().unwrap().push(f.to_string()));

        policy.report(ActionFailure::Panicked("x".into()));
        assert_eq!(*seen.lock().unwrap(), vec!["action panicked: x".to_string()]);
    }

    #[test]
    #[should_panic(expected = "action panicked: escalate")]
    fn test_propagate_repanics() {
        ErrorPolicy::Propagate.report(ActionFailure::Panicked("escalate".into()));
    }

    #[test]
    fn test_default_is_log() {
        assert!(matches!(ErrorPolicy::default(), ErrorPolicy::Log));
    }
}
