mod edit;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

pub use mouse::{handle_mouse, tick};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::AddItem | Mode::AddSub { .. } => edit::handle_edit(app, key),
    }
}

/// Positions from the last frame no longer mean anything
pub fn handle_resize(app: &mut App) {
    app.cancel_gesture();
}
