use crate::app::event::AppEvent;
use crate::app::state::*;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent);
        }
        AppEvent::ActionStarted { name } => {
            state.push_activity(ActivityKind::Started, format!("{} started", name));
        }
        AppEvent::ActionFinished { name, detail } => {
            state.completed += 1;
            state.push_activity(ActivityKind::Finished, format!("{}: {}", name, detail));
        }
        AppEvent::ActionFailed { error } => {
            state.failed += 1;
            state.push_activity(ActivityKind::Error, error);
        }
        AppEvent::Quit => {
            state.should_quit = true;
        }
        AppEvent::Tick => {
            // Keep the running counter fresh while actions are in flight.
            if state.in_flight.load(std::sync::atomic::Ordering::Relaxed) > 0 {
                state.dirty = true;
            }
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) {
    match event {
        CEvent::Key(key) => handle_key(state, key),
        CEvent::Mouse(mouse) => {
            state.bar.handle_mouse(&mouse);
        }
        _ => {}
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
        state.should_quit = true;
        return;
    }

    if key.code == KeyCode::Char('c') {
        state.activity.clear();
        return;
    }

    state.bar.handle_key(&key);
}
