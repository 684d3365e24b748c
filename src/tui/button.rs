//! Terminal button built on ratatui.

use crate::adapter::TriggerCallback;
use crate::element::{HostElement, Label, Role};
use crate::tui::catalog::Catalog;
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::fmt;

/// A clickable terminal element. Custom labels are pre-styled lines.
pub struct Button {
    on_trigger: TriggerCallback,
    label: Label<Line<'static>>,
    role: Option<Role>,
}

impl HostElement for Button {
    type CustomLabel = Line<'static>;

    fn from_trigger(
        on_trigger: TriggerCallback,
        label: Label<Line<'static>>,
        role: Option<Role>,
    ) -> Self {
        Self {
            on_trigger,
            label,
            role,
        }
    }
}

impl Button {
    pub fn label(&self) -> &Label<Line<'static>> {
        &self.label
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Fire the trigger callback.
    pub fn press(&self) {
        (self.on_trigger)();
    }

    /// Enter and Space activate the button. Returns whether it fired.
    pub fn handle_key(&self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.press();
                true
            }
            _ => false,
        }
    }

    /// The line shown inside the border. Text labels take the role style;
    /// custom lines keep their own.
    pub fn display_line(&self, catalog: &Catalog) -> Line<'static> {
        match &self.label {
            Label::Custom(line) => line.clone(),
            Label::Localized(key) => {
                Line::from(catalog.resolve(key).to_string()).style(Theme::label(self.role))
            }
            Label::Text(text) => Line::from(text.clone()).style(Theme::label(self.role)),
        }
    }

    /// Columns needed to draw the button, border included.
    pub fn width(&self, catalog: &Catalog) -> u16 {
        let inner = u16::try_from(self.display_line(catalog).width()).unwrap_or(u16::MAX);
        inner.saturating_add(4)
    }

    pub fn view<'a>(&'a self, catalog: &'a Catalog, focused: bool) -> ButtonView<'a> {
        ButtonView {
            button: self,
            catalog,
            focused,
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Renderable borrow of a [`Button`].
pub struct ButtonView<'a> {
    button: &'a Button,
    catalog: &'a Catalog,
    focused: bool,
}

impl Widget for ButtonView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (border_style, border_type) = if self.focused {
            (Theme::border_focused(), Theme::border_type_focused())
        } else {
            (Theme::border(), Theme::border_type())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.button.display_line(self.catalog))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_button(
        label: Label<Line<'static>>,
        role: Option<Role>,
    ) -> (Button, Arc<AtomicUsize>) {
        let presses = Arc::new(AtomicUsize::new(0));
        let counter = presses.clone();
        let callback: TriggerCallback = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (Button::from_trigger(callback, label, role), presses)
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_enter_and_space_press() {
        let (button, presses) = counting_button(Label::text("Go"), None);

        assert!(button.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(button.handle_key(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(!button.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert_eq!(presses.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let (button, presses) = counting_button(Label::text("Go"), None);
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;

        assert!(!button.handle_key(&release));
        assert_eq!(presses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_oversized_label_width_saturates() {
        let (button, _) = counting_button(Label::text("x".repeat(70_000)), None);
        assert_eq!(button.width(&Catalog::default()), u16::MAX);
    }

    #[test]
    fn test_localized_label_resolves_through_catalog() {
        let (button, _) = counting_button(Label::localized("demo.save"), Some(Role::Destructive));
        let mut catalog = Catalog::default();
        catalog.insert("demo.save", "Save all");

        let line = button.display_line(&catalog);
        assert_eq!(line.to_string(), "Save all");
        assert_eq!(line.style, Theme::label(Some(Role::Destructive)));
        assert_eq!(button.width(&catalog), 12);
        // The stored label is untouched.
        assert_eq!(button.label(), &Label::localized("demo.save"));
    }

    #[test]
    fn test_custom_label_keeps_its_style() {
        let custom = Line::from(vec![
            Span::raw("★ "),
            Span::styled("Star", Style::default().fg(Color::Yellow)),
        ]);
        let (button, _) = counting_button(Label::custom(custom.clone()), Some(Role::Cancel));

        assert_eq!(button.display_line(&Catalog::default()), custom);
        assert_eq!(button.role(), Some(Role::Cancel));
    }

    #[test]
    fn test_render_draws_border_and_label() {
        let (button, _) = counting_button(Label::text("Fetch"), None);
        let catalog = Catalog::default();
        let area = Rect::new(0, 0, button.width(&catalog), 3);
        let mut buf = Buffer::empty(area);

        button.view(&catalog, true).render(area, &mut buf);

        assert_eq!(row(&buf, 0), "╭───────╮");
        assert_eq!(row(&buf, 1), "│ Fetch │");
        assert_eq!(row(&buf, 2), "╰───────╯");
    }
}
