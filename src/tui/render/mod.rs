pub mod drag_proxy;
pub mod filter_bar;
pub mod header;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function. Also rebuilds `app.hits` for the next mouse event.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: input line | filter bar | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    filter_bar::render_filter_bar(frame, app, chunks[1]);
    list_view::render_list_view(frame, app, chunks[2]);
    drag_proxy::render_drag_proxy(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);
}
