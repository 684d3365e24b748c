//! The buttons shown by the demo and the async work behind them.

use crate::app::event::AppEvent;
use anyhow::Result;
use async_button::config::ErrorPolicyKind;
use async_button::tui::Button;
use async_button::{Action, AsyncButton, ErrorPolicy, Label, Role, Spawner};
use ratatui::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Counts running executions. Decrements on drop, so failed and aborted
/// executions are released too.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Everything a demo action needs to report back to the event loop.
#[derive(Clone)]
struct Reporter {
    event_tx: mpsc::UnboundedSender<AppEvent>,
    in_flight: Arc<AtomicUsize>,
}

impl Reporter {
    /// An action that announces itself, sleeps, then reports `detail`.
    fn timed(&self, name: &'static str, delay: Duration, detail: &'static str) -> Action {
        let reporter = self.clone();
        Action::new(move || {
            let reporter = reporter.clone();
            async move {
                let _guard = InFlight::enter(&reporter.in_flight);
                let _ = reporter.event_tx.send(AppEvent::ActionStarted { name });
                tokio::time::sleep(delay).await;
                let _ = reporter.event_tx.send(AppEvent::ActionFinished {
                    name,
                    detail: detail.to_string(),
                });
            }
        })
    }
}

/// The configured policy, with `log` also surfacing failures in the UI.
fn demo_policy(kind: ErrorPolicyKind, event_tx: mpsc::UnboundedSender<AppEvent>) -> ErrorPolicy {
    match kind {
        ErrorPolicyKind::Log => ErrorPolicy::sink(move |failure| {
            tracing::error!(error = %failure, "async action failed");
            let _ = event_tx.send(AppEvent::ActionFailed {
                error: failure.to_string(),
            });
        }),
        other => other.into(),
    }
}

pub fn build_buttons(
    spawner: Arc<dyn Spawner>,
    policy: ErrorPolicyKind,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    in_flight: Arc<AtomicUsize>,
) -> Result<Vec<Button>> {
    let reporter = Reporter {
        event_tx: event_tx.clone(),
        in_flight,
    };
    let policy = demo_policy(policy, event_tx.clone());
    let make = |label: Label<Line<'static>>, role: Option<Role>, action: Action| {
        AsyncButton::new(label, action)
            .role(role)
            .spawner(spawner.clone())
            .error_policy(policy.clone())
            .build::<Button>()
    };

    let sync_label = Line::from(vec![
        Span::styled("⟳ ", Style::default().fg(Color::Cyan)),
        Span::styled("Sync", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ]);

    let delete = {
        let reporter = reporter.clone();
        Action::fallible(move || {
            let reporter = reporter.clone();
            async move {
                let _guard = InFlight::enter(&reporter.in_flight);
                let _ = reporter.event_tx.send(AppEvent::ActionStarted { name: "delete" });
                tokio::time::sleep(Duration::from_millis(300)).await;
                Err::<(), _>(anyhow::anyhow!("permission denied: archive is read-only"))
            }
        })
    };

    let quit = {
        let event_tx = event_tx.clone();
        Action::new(move || {
            let event_tx = event_tx.clone();
            async move {
                let _ = event_tx.send(AppEvent::Quit);
            }
        })
    };

    let buttons = vec![
        make(
            Label::text("Fetch"),
            None,
            reporter.timed("fetch", Duration::from_millis(1500), "fetched 42 items"),
        )?,
        make(
            Label::localized("demo.refresh"),
            None,
            reporter.timed("refresh", Duration::from_millis(500), "feed refreshed"),
        )?,
        make(
            Label::custom(sync_label),
            None,
            reporter.timed("sync", Duration::from_secs(5), "sync complete"),
        )?,
        make(Label::text("Delete"), Some(Role::Destructive), delete)?,
        make(Label::localized("demo.quit"), Some(Role::Cancel), quit)?,
    ];
    Ok(buttons)
}
