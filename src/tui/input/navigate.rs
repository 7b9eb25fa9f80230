use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Filter;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.cancel_gesture(),

        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),

        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(row) = app.selected_row() {
                app.toggle_row(&row);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(row) = app.selected_row() {
                app.delete_row(&row);
            }
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.begin_add_item(),
        KeyCode::Char('s') => {
            if let Some(row) = app.selected_row() {
                app.begin_add_sub(row.item_id().clone());
            }
        }

        KeyCode::Char('f') => app.set_filter(app.filter.next()),
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),

        KeyCode::Char('t') => app.toggle_input_mode(),
        _ => {}
    }
}
