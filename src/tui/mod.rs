//! ratatui/crossterm host for async buttons.

mod button;
mod catalog;
pub mod theme;

pub use button::{Button, ButtonView};
pub use catalog::Catalog;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use ratatui::prelude::*;

/// A horizontal row of buttons with one focused entry.
#[derive(Debug, Default)]
pub struct ButtonBar {
    buttons: Vec<Button>,
    focus: usize,
    areas: Vec<Rect>,
}

impl ButtonBar {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self {
            buttons,
            focus: 0,
            areas: Vec::new(),
        }
    }

    pub fn push(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&Button> {
        self.buttons.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.buttons.is_empty() {
            self.focus = (self.focus + 1) % self.buttons.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.buttons.is_empty() {
            self.focus = (self.focus + self.buttons.len() - 1) % self.buttons.len();
        }
    }

    /// Tab/arrows move focus; other keys go to the focused button.
    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Right => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.focus_prev();
                true
            }
            _ => self.focused().is_some_and(|b| b.handle_key(key)),
        }
    }

    /// A left click on a button focuses and presses it. Hit testing uses
    /// the areas from the last render.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        let pos = Position::new(mouse.column, mouse.row);
        let Some(idx) = self.areas.iter().position(|r| r.contains(pos)) else {
            return false;
        };
        self.focus = idx;
        self.buttons[idx].press();
        true
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, catalog: &Catalog) {
        let constraints: Vec<Constraint> = self
            .buttons
            .iter()
            .map(|b| Constraint::Length(b.width(catalog)))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();
        let chunks = Layout::horizontal(constraints).spacing(1).split(area);

        self.areas.clear();
        for (idx, button) in self.buttons.iter().enumerate() {
            let rect = chunks[idx];
            button.view(catalog, idx == self.focus).render(rect, buf);
            self.areas.push(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::TriggerCallback;
    use crate::element::{HostElement, Label, Role};
    use crossterm::event::KeyModifiers;
    use std::sync::{Arc, Mutex};

    fn bar_with_log(names: &[&str]) -> (ButtonBar, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let buttons = names
            .iter()
            .map(|name| {
                let log = log.clone();
                let name = name.to_string();
                let label = Label::text(name.clone());
                let callback: TriggerCallback =
                    Arc::new(move || log.lock().unwrap().push(name.clone()));
                Button::from_trigger(callback, label, None)
            })
            .collect();
        (ButtonBar::new(buttons), log)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_focus_wraps() {
        let (mut bar, _) = bar_with_log(&["A", "B", "C"]);
        bar.focus_prev();
        assert_eq!(bar.focus(), 2);
        bar.handle_key(&key(KeyCode::Tab));
        assert_eq!(bar.focus(), 0);
        bar.handle_key(&key(KeyCode::Right));
        assert_eq!(bar.focus(), 1);
    }

    #[test]
    fn test_enter_presses_focused_button() {
        let (mut bar, log) = bar_with_log(&["Fetch", "Save"]);
        bar.handle_key(&key(KeyCode::Tab));
        assert!(bar.handle_key(&key(KeyCode::Enter)));
        assert!(!bar.handle_key(&key(KeyCode::Char('z'))));
        assert_eq!(*log.lock().unwrap(), vec!["Save".to_string()]);
    }

    #[test]
    fn test_click_hits_rendered_button() {
        let (mut bar, log) = bar_with_log(&["Fetch", "Save"]);
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf, &Catalog::default());

        // "Fetch" spans columns 0..9, a one-column gap, then "Save" from 10.
        assert!(bar.handle_mouse(&click(12, 1)));
        assert_eq!(bar.focus(), 1);
        assert!(!bar.handle_mouse(&click(30, 1)));
        assert_eq!(*log.lock().unwrap(), vec!["Save".to_string()]);
    }

    #[test]
    fn test_empty_bar_is_inert() {
        let mut bar = ButtonBar::default();
        bar.focus_next();
        assert_eq!(bar.focus(), 0);
        assert!(!bar.handle_key(&key(KeyCode::Enter)));
        assert!(bar.focused().is_none());
    }

    #[test]
    fn test_render_styles_by_role() {
        let noop: TriggerCallback = Arc::new(|| {});
        let mut bar = ButtonBar::new(vec![Button::from_trigger(
            noop,
            Label::text("Delete"),
            Some(Role::Destructive),
        )]);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf, &Catalog::default());

        assert_eq!(buf[(2, 1)].symbol(), "D");
        assert_eq!(buf[(2, 1)].fg, Color::Red);
    }
}
