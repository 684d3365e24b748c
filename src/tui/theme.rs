use crate::element::Role;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Rounded
    }

    /// Label style for a button with the given role.
    pub fn label(role: Option<Role>) -> Style {
        match role {
            None => Style::default().fg(Color::White),
            Some(Role::Destructive) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Some(Role::Cancel) => Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        }
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn timestamp() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn activity_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}
