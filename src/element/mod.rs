//! Label and role descriptions, the host element contract, and the single
//! construction path for async buttons.
//!
//! Every combination of {custom label, localized key, plain text} and
//! {role, no role} goes through [`AsyncButton`]. The adapter never looks
//! inside a [`Label`] or [`Role`]; both reach the host element unchanged.

use crate::action::Action;
use crate::adapter::{ActionAdapter, TriggerCallback};
use crate::error::{ErrorPolicy, SpawnError};
use crate::spawn::{Spawner, TokioSpawner};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Key into a string catalog, resolved by the host when it renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedKey(String);

impl LocalizedKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the element shows. `V` is the host's pre-built visual type.
#[derive(Debug, Clone, PartialEq)]
pub enum Label<V> {
    Custom(V),
    Localized(LocalizedKey),
    Text(String),
}

impl<V> Label<V> {
    pub fn custom(view: V) -> Self {
        Label::Custom(view)
    }

    pub fn localized(key: impl Into<String>) -> Self {
        Label::Localized(LocalizedKey::new(key))
    }

    pub fn text(title: impl Into<String>) -> Self {
        Label::Text(title.into())
    }
}

impl<V> From<&str> for Label<V> {
    fn from(title: &str) -> Self {
        Label::Text(title.to_string())
    }
}

impl<V> From<String> for Label<V> {
    fn from(title: String) -> Self {
        Label::Text(title)
    }
}

impl<V> From<LocalizedKey> for Label<V> {
    fn from(key: LocalizedKey) -> Self {
        Label::Localized(key)
    }
}

/// Semantic purpose of an element. Absence means no assigned role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The action deletes user data or is otherwise irreversible.
    Destructive,
    /// The action cancels an operation.
    Cancel,
}

/// A UI element that can be built from a trigger callback plus a label and
/// role description.
///
/// The host calls `on_trigger` whenever the user interacts with the element.
pub trait HostElement: Sized {
    /// The host's pre-built visual label type.
    type CustomLabel;

    fn from_trigger(
        on_trigger: TriggerCallback,
        label: Label<Self::CustomLabel>,
        role: Option<Role>,
    ) -> Self;
}

/// Builder for a host element whose action is async.
pub struct AsyncButton<V> {
    label: Label<V>,
    action: Action,
    role: Option<Role>,
    policy: ErrorPolicy,
    spawner: Option<Arc<dyn Spawner>>,
}

impl<V> AsyncButton<V> {
    pub fn new(label: impl Into<Label<V>>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            role: None,
            policy: ErrorPolicy::default(),
            spawner: None,
        }
    }

    pub fn role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run executions on `spawner` instead of the ambient tokio runtime.
    pub fn spawner(mut self, spawner: Arc<dyn Spawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Build the host element.
    ///
    /// Without an explicit spawner this binds to the tokio runtime of the
    /// calling thread and fails with [`SpawnError::NoRuntime`] outside one.
    pub fn build<H>(self) -> Result<H, SpawnError>
    where
        H: HostElement<CustomLabel = V>,
    {
        let spawner = match self.spawner {
            Some(spawner) => spawner,
            None => Arc::new(TokioSpawner::current()?),
        };
        let adapter = ActionAdapter::new(self.action, spawner).with_error_policy(self.policy);
        Ok(H::from_trigger(adapter.into_callback(), self.label, self.role))
    }
}

impl<V: fmt::Debug> fmt::Debug for AsyncButton<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncButton")
            .field("label", &self.label)
            .field("role", &self.role)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
