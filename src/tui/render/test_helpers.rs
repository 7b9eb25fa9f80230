use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, Hierarchy, Item, SubItem};
use crate::ops::{HierarchyStore, NullSink};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles)
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Full-screen render of the app. Also refreshes `app.hits`.
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _area| super::render(frame, app))
}

/// Build an App over `items`, each given as (id, text, sub ids)
pub fn app_with(items: Vec<(&str, &str, Vec<&str>)>) -> App {
    let items = items
        .into_iter()
        .map(|(id, text, subs)| {
            let mut item = Item::new(id.into(), text);
            for sub in subs {
                item.subs.push(SubItem::new(sub.into(), format!("{text} / {sub}")));
            }
            item
        })
        .collect();
    App::new(
        HierarchyStore::new(Hierarchy::new(items), Box::new(NullSink)),
        &Config::default(),
    )
}
