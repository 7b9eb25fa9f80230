use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::App;

/// "N items left" plus the three filters, the active one highlighted
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        format!(" {} items left ", app.hierarchy().items_left()),
        Style::default().fg(app.theme.text).bg(bg),
    )];
    spans.push(Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    for filter in Filter::ALL {
        let style = if filter == app.filter {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
