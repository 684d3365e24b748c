mod app;
mod ui;

use crate::app::buttons;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use anyhow::{Context, Result};
use async_button::config::{self, AppConfig};
use async_button::error::panic_message;
use async_button::tui::{ButtonBar, Catalog};
use async_button::{logging, Spawner, TokioSpawner};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::collections::BTreeMap;
use std::io;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::mpsc;

fn main() -> Result<()> {
    let cfg = config::load_config()?;
    let log_guard = logging::init(&cfg.logging)?;
    write_default_config(&cfg);

    let runtime = build_runtime(cfg.runtime.worker_threads)?;

    // Panics inside actions are expected and often caught, so the hook only
    // logs. The terminal is restored once the event loop itself unwinds.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "panic");
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let log_dir = log_guard.as_ref().map(|g| g.log_dir().to_path_buf());
    let result = with_restore(
        || runtime.block_on(run_app(&mut terminal, cfg, log_dir)),
        restore_terminal,
    )?;

    if let Err(e) = result {
        tracing::error!(error = %e, "demo exited with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn build_runtime(worker_threads: usize) -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads.max(1))
        .enable_all()
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        })
        .context("Failed to create tokio runtime")
}

/// Run the event loop, then restore the terminal whether it returned or
/// unwound. Panics on other threads never reach here.
fn with_restore<T>(run: impl FnOnce() -> T, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(run));
    restore()?;
    match outcome {
        Ok(value) => Ok(value),
        Err(payload) => {
            eprintln!("demo panicked: {}", panic_message(&*payload));
            std::panic::resume_unwind(payload)
        }
    }
}

/// Write the defaults on first run so there is a file to edit.
fn write_default_config(cfg: &AppConfig) {
    let path = config::config_path();
    if path.exists() {
        return;
    }
    match config::save_config_to(cfg, &path) {
        Ok(()) => tracing::info!(path = %path.display(), "wrote default config"),
        Err(e) => tracing::warn!(error = %e, "could not write default config"),
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: AppConfig,
    log_dir: Option<PathBuf>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let spawner: Arc<dyn Spawner> = Arc::new(TokioSpawner::current()?);
    let in_flight = Arc::new(AtomicUsize::new(0));
    let buttons = buttons::build_buttons(
        spawner,
        cfg.errors.policy,
        event_tx.clone(),
        in_flight.clone(),
    )?;

    // Built-in strings, overridable from the [strings] config table
    let mut strings = BTreeMap::from([
        ("demo.refresh".to_string(), "Refresh".to_string()),
        ("demo.quit".to_string(), "Quit".to_string()),
    ]);
    strings.extend(cfg.strings.clone());

    let mut state = AppState::new(
        ButtonBar::new(buttons),
        Catalog::new(strings),
        in_flight,
        cfg.ui.clone(),
    );
    state.system_message("Every press spawns an independent task; the UI never waits.".to_string());
    state.system_message(format!("Error policy: {:?}", cfg.errors.policy));
    if let Some(dir) = log_dir {
        state.system_message(format!("Logging to {}", dir.display()));
    }
    tracing::info!(policy = ?cfg.errors.policy, "demo started");

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (10 FPS = 100ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &mut state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        handler::handle_event(&mut state, event);

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &mut state))?;
            state.dirty = false;
        }
    }

    tracing::info!(
        completed = state.completed,
        failed = state.failed,
        "demo finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_restore_runs_after_normal_exit() {
        let restored = Cell::new(0);
        let value = with_restore(
            || 7,
            || {
                restored.set(restored.get() + 1);
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(value, 7);
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_runs_when_event_loop_panics() {
        let restored = Cell::new(0);
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
            with_restore(
                || -> i32 { panic!("event loop died") },
                || {
                    restored.set(restored.get() + 1);
                    Ok(())
                },
            )
        }));
        assert!(outcome.is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_caught_task_panic_leaves_terminal_alone() {
        let restored = Cell::new(0);
        let runtime = build_runtime(2).unwrap();
        let task_panicked = with_restore(
            || {
                runtime.block_on(async {
                    tokio::spawn(async { panic!("action blew up") })
                        .await
                        .is_err()
                })
            },
            || {
                restored.set(restored.get() + 1);
                Ok(())
            },
        )
        .unwrap();
        assert!(task_panicked);
        // Only the final, unconditional restore ran.
        assert_eq!(restored.get(), 1);
    }
}
