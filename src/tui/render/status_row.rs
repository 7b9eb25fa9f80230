use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::drag::Phase;
use crate::tui::app::{App, Mode};
use crate::util::text::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans = Vec::new();
    if let Some(msg) = &app.status {
        spans.push(Span::styled(
            format!(" {msg}"),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    } else if let Some(err) = app.save_error() {
        spans.push(Span::styled(
            format!(" save failed: {err}"),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    } else {
        match app.gestures.phase() {
            Phase::Armed => spans.push(Span::styled(" hold to drag\u{2026}", dim)),
            Phase::Dragging => {
                let id = app.gestures.session().map_or("", |s| s.id());
                spans.push(Span::styled(
                    format!(" dragging {id}"),
                    Style::default().fg(app.theme.highlight).bg(bg),
                ));
            }
            Phase::Idle => {}
        }
    }

    let hint = match (&app.mode, app.gestures.phase()) {
        (Mode::AddItem | Mode::AddSub { .. }, _) => "Enter save  Esc cancel".to_string(),
        (Mode::Navigate, Phase::Dragging | Phase::Armed) => "Esc cancel".to_string(),
        (Mode::Navigate, Phase::Idle) if app.show_key_hints => format!(
            "a add  s sub  space done  d del  f filter  t {}  q quit",
            app.input_mode.label()
        ),
        _ => String::new(),
    };

    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(&hint);
    if !hint.is_empty() && content_width + hint_width + 1 < width {
        let padding = width - content_width - hint_width - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
