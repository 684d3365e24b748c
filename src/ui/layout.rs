use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub button_bar: Rect,
    pub activity: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Buttons
            Constraint::Min(3),    // Activity log
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        button_bar: chunks[0],
        activity: chunks[1],
        status_bar: chunks[2],
    }
}
