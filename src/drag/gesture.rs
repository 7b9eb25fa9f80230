//! Turns raw pointer-drag and touch sequences into one drag-session
//! protocol.
//!
//! Phases: `Idle → Armed → Dragging → Idle`. Pointer drags skip `Armed`.
//! Touch presses arm first and only become drags once held for the arm
//! delay; moving earlier is a scroll, releasing earlier is a tap.
//!
//! At most one session exists. Start events arriving while not `Idle` are
//! ignored, as are moves/ends/drops with no session. Every terminating
//! path (commit, cancel, scroll, tap) lands back in `Idle`, and
//! [`DragVisuals`] are derived from the current state, so nothing visual
//! outlives its session.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::model::DragConfig;

use super::session::{DragSession, DropRequest, Modality};
use super::target::{HitMap, Point, RowRef};

/// Timing for touch discrimination
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// How long a touch must be held before it becomes a drag (default: 200ms)
    pub arm_delay: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            arm_delay: Duration::from_millis(200),
        }
    }
}

impl From<&DragConfig> for GestureConfig {
    fn from(config: &DragConfig) -> Self {
        GestureConfig {
            arm_delay: Duration::from_millis(config.arm_delay_ms),
        }
    }
}

/// Raw input, already mapped to screen cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Native drag start at the press point
    PointerDragStart(Point),
    PointerDragOver(Point),
    PointerDrop(Point),
    /// Native drag end; always terminates the pointer session
    PointerDragEnd,
    TouchStart(Point),
    TouchMove(Point),
    TouchEnd(Point),
    TouchCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Armed,
    Dragging,
}

/// What an event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing happened (malformed sequence, re-entrant start, etc.)
    Ignored,
    /// Touch landed on a row; the arm timer is running
    Armed,
    /// Touch moved before the arm timer fired; no drag
    Scrolled,
    /// Touch released before the arm timer fired
    Tap(Point),
    Started(DragSession),
    /// Hover target changed (or was refreshed)
    Hovered(Option<RowRef>),
    /// Drop happened; hand this to the resolver
    Committed(DropRequest),
    Cancelled,
}

/// Visual state for the renderer: the `dragging` row, the `drop-target`
/// row and the floating proxy position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragVisuals {
    pub dragging: Option<RowRef>,
    pub drop_target: Option<RowRef>,
    pub proxy: Option<Point>,
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Armed {
        source: RowRef,
        origin: Point,
        deadline: Instant,
    },
    Dragging {
        session: DragSession,
        at: Point,
        hover: Option<RowRef>,
    },
}

pub struct GestureNormalizer {
    config: GestureConfig,
    state: State,
}

impl GestureNormalizer {
    pub fn new(config: GestureConfig) -> Self {
        GestureNormalizer {
            config,
            state: State::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Armed { .. } => Phase::Armed,
            State::Dragging { .. } => Phase::Dragging,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            State::Dragging { session, .. } => Some(session),
            _ => None,
        }
    }

    /// When the pending arm timer fires, if one is running
    pub fn arm_deadline(&self) -> Option<Instant> {
        match self.state {
            State::Armed { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    pub fn visuals(&self) -> DragVisuals {
        match &self.state {
            State::Dragging { session, at, hover } => DragVisuals {
                dragging: Some(session.source.clone()),
                drop_target: hover.clone(),
                proxy: (session.modality == Modality::Touch).then_some(*at),
            },
            _ => DragVisuals::default(),
        }
    }

    /// Feed one raw event. `hits` is the layout the event's coordinates
    /// refer to; `now` drives the touch arm timer.
    pub fn process(&mut self, event: GestureEvent, hits: &HitMap, now: Instant) -> GestureOutcome {
        trace!(?event, phase = ?self.phase(), "gesture event");
        match event {
            GestureEvent::PointerDragStart(at) => self.pointer_start(at, hits),
            GestureEvent::PointerDragOver(at) => self.hover(Modality::Pointer, at, hits),
            GestureEvent::PointerDrop(at) => self.drop_at(Modality::Pointer, at, hits),
            GestureEvent::PointerDragEnd => self.pointer_end(),
            GestureEvent::TouchStart(at) => self.touch_start(at, hits, now),
            GestureEvent::TouchMove(at) => self.touch_move(at, hits),
            GestureEvent::TouchEnd(at) => self.touch_end(at, hits),
            GestureEvent::TouchCancel => self.cancel(),
        }
    }

    /// Fire the arm timer if its deadline has passed
    pub fn tick(&mut self, now: Instant) -> GestureOutcome {
        let (source, origin) = match &self.state {
            State::Armed {
                source,
                origin,
                deadline,
            } if now >= *deadline => (source.clone(), *origin),
            _ => return GestureOutcome::Ignored,
        };
        let session = DragSession::new(source, Modality::Touch);
        debug!(id = session.id(), "touch armed into drag");
        self.state = State::Dragging {
            session: session.clone(),
            at: origin,
            hover: None,
        };
        GestureOutcome::Started(session)
    }

    /// Abort whatever is in progress. No resolver call follows.
    pub fn cancel(&mut self) -> GestureOutcome {
        if self.is_idle() {
            return GestureOutcome::Ignored;
        }
        debug!(phase = ?self.phase(), "gesture cancelled");
        self.state = State::Idle;
        GestureOutcome::Cancelled
    }

    fn pointer_start(&mut self, at: Point, hits: &HitMap) -> GestureOutcome {
        if !self.is_idle() {
            return GestureOutcome::Ignored;
        }
        let Some(source) = hits.drag_source_at(at) else {
            return GestureOutcome::Ignored;
        };
        let session = DragSession::new(source.clone(), Modality::Pointer);
        debug!(id = session.id(), "pointer drag started");
        self.state = State::Dragging {
            session: session.clone(),
            at,
            hover: None,
        };
        GestureOutcome::Started(session)
    }

    fn pointer_end(&mut self) -> GestureOutcome {
        let pointer_drag = matches!(
            &self.state,
            State::Dragging { session, .. } if session.modality == Modality::Pointer
        );
        if pointer_drag {
            self.cancel()
        } else {
            GestureOutcome::Ignored
        }
    }

    fn touch_start(&mut self, at: Point, hits: &HitMap, now: Instant) -> GestureOutcome {
        if !self.is_idle() {
            return GestureOutcome::Ignored;
        }
        let Some(source) = hits.drag_source_at(at) else {
            return GestureOutcome::Ignored;
        };
        self.state = State::Armed {
            source: source.clone(),
            origin: at,
            deadline: now + self.config.arm_delay,
        };
        GestureOutcome::Armed
    }

    fn touch_move(&mut self, at: Point, hits: &HitMap) -> GestureOutcome {
        match &self.state {
            State::Armed { origin, .. } => {
                if *origin == at {
                    return GestureOutcome::Ignored;
                }
                debug!("touch moved before arming; treating as scroll");
                self.state = State::Idle;
                GestureOutcome::Scrolled
            }
            State::Dragging { .. } => self.hover(Modality::Touch, at, hits),
            State::Idle => GestureOutcome::Ignored,
        }
    }

    fn touch_end(&mut self, at: Point, hits: &HitMap) -> GestureOutcome {
        match &self.state {
            State::Armed { .. } => {
                self.state = State::Idle;
                GestureOutcome::Tap(at)
            }
            State::Dragging { .. } => self.drop_at(Modality::Touch, at, hits),
            State::Idle => GestureOutcome::Ignored,
        }
    }

    fn hover(&mut self, modality: Modality, at: Point, hits: &HitMap) -> GestureOutcome {
        let State::Dragging {
            session,
            at: current,
            hover,
        } = &mut self.state
        else {
            return GestureOutcome::Ignored;
        };
        if session.modality != modality {
            return GestureOutcome::Ignored;
        }
        *current = at;
        *hover = hits
            .row_at(at)
            .filter(|row| **row != session.source)
            .cloned();
        GestureOutcome::Hovered(hover.clone())
    }

    fn drop_at(&mut self, modality: Modality, at: Point, hits: &HitMap) -> GestureOutcome {
        let session = match &self.state {
            State::Dragging { session, .. } if session.modality == modality => session.clone(),
            _ => return GestureOutcome::Ignored,
        };
        self.state = State::Idle;
        let target = hits.drop_target_at(at);
        debug!(id = session.id(), ?target, "drop committed");
        GestureOutcome::Committed(DropRequest { session, target })
    }
}

impl Default for GestureNormalizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
