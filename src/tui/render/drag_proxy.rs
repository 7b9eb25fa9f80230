use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::app::App;
use crate::util::text::display_width;

use super::list_view::proxy_label;

const MAX_PROXY_CELLS: usize = 32;

/// Floating copy of the dragged row, drawn just right of the touch point
/// and kept inside `area`.
pub fn render_drag_proxy(frame: &mut Frame, app: &App, area: Rect) {
    let visuals = app.gestures.visuals();
    let (Some(at), Some(source)) = (visuals.proxy, visuals.dragging) else {
        return;
    };
    if area.width == 0 || area.height == 0 {
        return;
    }
    let rows = app.flat_rows();
    let Some(flat) = rows.iter().find(|r| r.row == source) else {
        return;
    };

    let label = proxy_label(flat, MAX_PROXY_CELLS.min(area.width as usize));
    let width = display_width(&label) as u16;
    let right = area.x + area.width;
    let x = at.x.saturating_add(1).min(right.saturating_sub(width)).max(area.x);
    let y = at.y.clamp(area.y, area.y + area.height - 1);
    let rect = Rect::new(x, y, width, 1);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(label).style(
            Style::default()
                .fg(app.theme.background)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        rect,
    );
}
