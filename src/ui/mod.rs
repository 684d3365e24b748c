mod activity;
mod layout;
mod status_bar;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    state
        .bar
        .render(app_layout.button_bar, frame.buffer_mut(), &state.catalog);
    activity::render(frame, app_layout.activity, state);
    status_bar::render(frame, app_layout.status_bar, state);
}
