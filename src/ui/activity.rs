use crate::app::state::*;
use async_button::tui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Activity ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    // Newest entries that fit, oldest first.
    let visible = block.inner(area).height as usize;
    let skip = state.activity.len().saturating_sub(visible);

    let items: Vec<ListItem> = state
        .activity
        .iter()
        .skip(skip)
        .map(|entry| {
            let style = match entry.kind {
                ActivityKind::Error => Theme::error_message(),
                ActivityKind::System => Theme::timestamp(),
                ActivityKind::Started | ActivityKind::Finished => Theme::activity_text(),
            };
            let marker = match entry.kind {
                ActivityKind::Started => "▶ ",
                ActivityKind::Finished => "✓ ",
                ActivityKind::Error => "✗ ",
                ActivityKind::System => "  ",
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", entry.timestamp), Theme::timestamp()),
                Span::styled(marker, style),
                Span::styled(entry.text.clone(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
