use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::drag::{Area, ControlKind, DragVisuals, Element, HitMap, RowRef};
use crate::tui::app::{App, FlatRow};
use crate::tui::theme::Theme;
use crate::util::text::{pad_to_width, truncate_to_width};

pub const EMPTY_MESSAGE: &str = "No Items are present";

/// Cells before the text: " [ ] " for items, "    [ ] " for sub-items
const ITEM_PREFIX: u16 = 5;
const SUB_PREFIX: u16 = 8;
/// Cells after the text: " [+] [x] "
const SUFFIX: u16 = 9;

/// What the list looks like this frame, besides the rows themselves
pub struct ListView<'a> {
    pub scroll: usize,
    pub cursor: usize,
    pub visuals: &'a DragVisuals,
    pub theme: &'a Theme,
}

/// Lines to draw plus the hit regions they occupy
pub struct ListLayout {
    pub lines: Vec<Line<'static>>,
    pub hits: HitMap,
}

/// Render the list and record its hit regions on the app
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.flat_rows();
    let bg = app.theme.background;

    if rows.is_empty() {
        app.hits.clear();
        let empty = Paragraph::new(format!(" {EMPTY_MESSAGE}"))
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    app.cursor = app.cursor.min(rows.len() - 1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let visuals = app.gestures.visuals();
    let layout = layout_list(
        &rows,
        area,
        &ListView {
            scroll: app.scroll_offset,
            cursor: app.cursor,
            visuals: &visuals,
            theme: &app.theme,
        },
    );
    app.hits = layout.hits;

    let paragraph = Paragraph::new(layout.lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Lay out the visible slice of `rows` in `area`.
///
/// Regions are pushed container-first: each row, then its buttons; each
/// run of sub rows is preceded by a sub-list region spanning the run.
pub fn layout_list(rows: &[FlatRow], area: Rect, view: &ListView) -> ListLayout {
    let mut lines = Vec::new();
    let mut hits = HitMap::new();
    let end = rows.len().min(view.scroll + area.height as usize);
    let width = area.width;

    let mut idx = view.scroll;
    while idx < end {
        let y = area.y + (idx - view.scroll) as u16;
        let run_end = match &rows[idx].row {
            RowRef::Sub { parent, .. } => {
                let run = rows[idx..end]
                    .iter()
                    .take_while(|r| matches!(&r.row, RowRef::Sub { parent: p, .. } if p == parent))
                    .count();
                hits.push(
                    Area::new(area.x, y, width, run as u16),
                    Element::SubList {
                        owner: parent.clone(),
                    },
                );
                idx + run
            }
            RowRef::Item(_) => idx + 1,
        };
        for (offset, flat) in rows[idx..run_end].iter().enumerate() {
            let row_y = y + offset as u16;
            push_row_regions(&mut hits, flat, area.x, row_y, width);
            lines.push(row_line(flat, width, idx + offset == view.cursor, view));
        }
        idx = run_end;
    }

    ListLayout { lines, hits }
}

fn push_row_regions(hits: &mut HitMap, flat: &FlatRow, x: u16, y: u16, width: u16) {
    hits.push(Area::new(x, y, width, 1), Element::Row(flat.row.clone()));
    if width < SUB_PREFIX + SUFFIX {
        return;
    }
    let toggle_x = if flat.row.is_item() { x + 1 } else { x + 4 };
    let mut control = |at: u16, kind: ControlKind| {
        hits.push(
            Area::new(at, y, 3, 1),
            Element::Control {
                kind,
                row: flat.row.clone(),
            },
        );
    };
    control(toggle_x, ControlKind::Toggle);
    if flat.row.is_item() {
        control(x + width - 8, ControlKind::AddSub);
    }
    control(x + width - 4, ControlKind::Delete);
}

fn row_line(flat: &FlatRow, width: u16, is_cursor: bool, view: &ListView) -> Line<'static> {
    let theme = view.theme;
    let is_dragging = view.visuals.dragging.as_ref() == Some(&flat.row);
    let is_target = view.visuals.drop_target.as_ref() == Some(&flat.row);

    let bg = if is_target {
        theme.drop_target
    } else if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);

    let mut text_style = base.fg(if is_cursor { theme.text_bright } else { theme.text });
    if flat.done {
        text_style = text_style.fg(theme.done).add_modifier(Modifier::CROSSED_OUT);
    }
    if is_dragging {
        text_style = text_style.fg(theme.dim).add_modifier(Modifier::ITALIC);
    }
    let box_style = base.fg(if is_cursor { theme.highlight } else { theme.dim });

    let checkbox = if flat.done { "[x]" } else { "[ ]" };
    let (indent, prefix) = if flat.row.is_item() {
        (" ", ITEM_PREFIX)
    } else {
        ("    ", SUB_PREFIX)
    };

    if width < SUB_PREFIX + SUFFIX {
        let text = pad_to_width(&format!("{indent}{checkbox} {}", flat.text), width as usize);
        return Line::from(Span::styled(text, text_style));
    }

    let text_cells = (width - prefix - SUFFIX) as usize;
    let add = if flat.row.is_item() { "[+]" } else { "   " };
    Line::from(vec![
        Span::styled(indent.to_string(), base),
        Span::styled(checkbox.to_string(), box_style),
        Span::styled(" ".to_string(), base),
        Span::styled(pad_to_width(&flat.text, text_cells), text_style),
        Span::styled(" ".to_string(), base),
        Span::styled(add.to_string(), box_style),
        Span::styled(" ".to_string(), base),
        Span::styled("[x]".to_string(), box_style),
        Span::styled(" ".to_string(), base),
    ])
}

/// Label for the floating drag proxy
pub fn proxy_label(flat: &FlatRow, max_cells: usize) -> String {
    truncate_to_width(&format!(" \u{2261} {} ", flat.text), max_cells)
}
