use async_button::config::UiConfig;
use async_button::tui::{ButtonBar, Catalog};
use chrono::Local;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityKind {
    Started,
    Finished,
    Error,
    System,
}

#[derive(Debug, Clone)]
pub struct Activity {
    pub timestamp: String,
    pub text: String,
    pub kind: ActivityKind,
}

pub struct AppState {
    pub bar: ButtonBar,
    pub catalog: Catalog,
    pub activity: VecDeque<Activity>,
    pub in_flight: Arc<AtomicUsize>,
    pub completed: usize,
    pub failed: usize,
    pub should_quit: bool,
    pub dirty: bool,
    ui: UiConfig,
}

impl AppState {
    pub fn new(
        bar: ButtonBar,
        catalog: Catalog,
        in_flight: Arc<AtomicUsize>,
        mut ui: UiConfig,
    ) -> Self {
        if let Err(e) = ui.validate() {
            tracing::warn!(error = %e, "falling back to default timestamp format");
            ui.timestamp_format = UiConfig::default().timestamp_format;
        }
        Self {
            bar,
            catalog,
            activity: VecDeque::new(),
            in_flight,
            completed: 0,
            failed: 0,
            should_quit: false,
            dirty: true,
            ui,
        }
    }

    pub fn push_activity(&mut self, kind: ActivityKind, text: String) {
        let timestamp = Local::now().format(&self.ui.timestamp_format).to_string();
        self.activity.push_back(Activity {
            timestamp,
            text,
            kind,
        });
        while self.activity.len() > self.ui.max_activity {
            self.activity.pop_front();
        }
        self.dirty = true;
    }

    pub fn system_message(&mut self, text: String) {
        self.push_activity(ActivityKind::System, text);
    }

    pub fn status_line(&self) -> String {
        format!(
            "running: {}  done: {}  failed: {}",
            self.in_flight.load(Ordering::Relaxed),
            self.completed,
            self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_limit(max_activity: usize) -> AppState {
        let ui = UiConfig {
            max_activity,
            ..UiConfig::default()
        };
        AppState::new(
            ButtonBar::default(),
            Catalog::default(),
            Arc::new(AtomicUsize::new(0)),
            ui,
        )
    }

    #[test]
    fn test_activity_is_capped() {
        let mut state = state_with_limit(2);
        state.system_message("one".into());
        state.system_message("two".into());
        state.system_message("three".into());

        let texts: Vec<_> = state.activity.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
        assert!(state.dirty);
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        let ui = UiConfig {
            timestamp_format: "%Q".to_string(),
            ..UiConfig::default()
        };
        let mut state = AppState::new(
            ButtonBar::default(),
            Catalog::default(),
            Arc::new(AtomicUsize::new(0)),
            ui,
        );
        state.system_message("hi".into());
        assert_eq!(state.activity[0].timestamp.len(), "00:00:00".len());
    }

    #[test]
    fn test_status_line() {
        let mut state = state_with_limit(10);
        state.in_flight.store(2, Ordering::Relaxed);
        state.failed = 1;
        assert_eq!(state.status_line(), "running: 2  done: 0  failed: 1");
    }
}
