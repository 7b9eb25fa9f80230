use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::text::truncate_to_width;

pub const PLACEHOLDER: &str = "What needs to be done?";

/// Render the new-item input line (top of screen)
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let base = Style::default().bg(bg);
    let mut spans = vec![Span::styled(
        " \u{276F} ",
        Style::default().fg(app.theme.highlight).bg(bg),
    )];

    let prompt = match &app.mode {
        Mode::Navigate => None,
        Mode::AddItem => Some(String::new()),
        Mode::AddSub { parent } => {
            let owner = app.hierarchy().item(parent).map_or("?", |i| i.text.as_str());
            Some(format!("{} \u{203A} ", truncate_to_width(owner, 20)))
        }
    };

    match prompt {
        None => spans.push(Span::styled(PLACEHOLDER, Style::default().fg(app.theme.dim).bg(bg))),
        Some(prefix) => {
            spans.push(Span::styled(prefix, Style::default().fg(app.theme.dim).bg(bg)));
            spans.push(Span::styled(
                app.edit_buffer.clone(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
            spans.push(Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}
