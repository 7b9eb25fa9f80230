//! Terminal mouse reports mapped onto the two raw input families the
//! gesture normalizer understands.
//!
//! Pointer mode behaves like a native drag: the first motion with the
//! button held starts the drag at the press point. Touch mode feeds
//! press/motion/release as touch start/move/end, so a drag needs the
//! press held for the arm delay first.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::drag::{self, ControlKind, Element, GestureEvent, GestureOutcome, Point};
use crate::model::InputMode;
use crate::tui::app::{App, Mode};

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    if app.mode != Mode::Navigate {
        return;
    }
    let at = Point::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        MouseEventKind::ScrollDown => app.move_cursor(1),
        kind => match app.input_mode {
            InputMode::Pointer => pointer(app, kind, at, now),
            InputMode::Touch => touch(app, kind, at, now),
        },
    }
}

/// Fire the touch arm timer once its deadline has passed
pub fn tick(app: &mut App, now: Instant) {
    let outcome = app.gestures.tick(now);
    apply_outcome(app, outcome);
}

fn pointer(app: &mut App, kind: MouseEventKind, at: Point, now: Instant) {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if activate_control(app, at) {
                return;
            }
            if let Some(row) = app.hits.row_at(at).cloned() {
                app.select_id(row.id());
                app.press = Some(at);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(origin) = app.press.take() {
                let outcome =
                    app.gestures
                        .process(GestureEvent::PointerDragStart(origin), &app.hits, now);
                apply_outcome(app, outcome);
            }
            let outcome = app
                .gestures
                .process(GestureEvent::PointerDragOver(at), &app.hits, now);
            apply_outcome(app, outcome);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.press = None;
            let outcome = app
                .gestures
                .process(GestureEvent::PointerDrop(at), &app.hits, now);
            apply_outcome(app, outcome);
            let outcome = app
                .gestures
                .process(GestureEvent::PointerDragEnd, &app.hits, now);
            apply_outcome(app, outcome);
        }
        _ => {}
    }
}

fn touch(app: &mut App, kind: MouseEventKind, at: Point, now: Instant) {
    let event = match kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Presses on buttons belong to the button
            if activate_control(app, at) {
                return;
            }
            GestureEvent::TouchStart(at)
        }
        MouseEventKind::Drag(MouseButton::Left) => GestureEvent::TouchMove(at),
        MouseEventKind::Up(MouseButton::Left) => GestureEvent::TouchEnd(at),
        _ => return,
    };
    let outcome = app.gestures.process(event, &app.hits, now);
    apply_outcome(app, outcome);
}

fn activate_control(app: &mut App, at: Point) -> bool {
    let Some(Element::Control { kind, row }) = app.hits.element_at(at).cloned() else {
        return false;
    };
    match kind {
        ControlKind::Toggle => app.toggle_row(&row),
        ControlKind::AddSub => app.begin_add_sub(row.item_id().clone()),
        ControlKind::Delete => app.delete_row(&row),
    }
    true
}

fn apply_outcome(app: &mut App, outcome: GestureOutcome) {
    match outcome {
        GestureOutcome::Started(session) => app.select_id(session.id()),
        GestureOutcome::Tap(at) => {
            if let Some(row) = app.hits.row_at(at).cloned() {
                app.select_id(row.id());
            }
        }
        GestureOutcome::Committed(request) => {
            let result = drag::commit(&mut app.store, &request);
            if app.report(result).is_some() {
                app.select_id(request.session.id());
            }
        }
        GestureOutcome::Ignored
        | GestureOutcome::Armed
        | GestureOutcome::Scrolled
        | GestureOutcome::Hovered(_)
        | GestureOutcome::Cancelled => {}
    }
}
