//! Clickable UI elements whose action is asynchronous.
//!
//! A host UI toolkit calls a synchronous trigger callback when the user
//! interacts with an element. [`ActionAdapter`] turns an async [`Action`] into
//! such a callback: every trigger spawns one independent task on a
//! [`Spawner`] and returns immediately.
//!
//! ```no_run
//! use async_button::{Action, AsyncButton, Label, Role};
//! use async_button::tui::Button;
//!
//! # async fn save() {}
//! # async fn demo() -> Result<(), async_button::SpawnError> {
//! let button: Button = AsyncButton::new(Label::text("Save"), Action::new(save))
//!     .role(Some(Role::Destructive))
//!     .build()?;
//! button.press();
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod adapter;
pub mod config;
pub mod element;
pub mod error;
pub mod logging;
pub mod spawn;
pub mod tui;

pub use action::Action;
pub use adapter::{ActionAdapter, TriggerCallback};
pub use element::{AsyncButton, HostElement, Label, LocalizedKey, Role};
pub use error::{ActionFailure, ErrorPolicy, SpawnError};
pub use spawn::{BoxedTask, Spawner, TaskHandle, TokioSpawner};
