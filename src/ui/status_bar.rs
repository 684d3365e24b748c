use crate::app::state::*;
use async_button::tui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const HINT: &str = "Tab/←→ focus  Enter/Space/click press  c clear  q quit";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = format!(" {} ", state.status_line());
    let used = status.chars().count() + HINT.chars().count() + 1;
    let remaining = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(status, Theme::status_bar()),
        Span::styled(" ".repeat(remaining), Theme::status_bar()),
        Span::styled(format!("{} ", HINT), Theme::status_bar()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
