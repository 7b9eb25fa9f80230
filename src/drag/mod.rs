pub mod gesture;
pub mod resolver;
pub mod session;
pub mod target;

pub use gesture::{DragVisuals, GestureConfig, GestureEvent, GestureNormalizer, GestureOutcome, Phase};
pub use resolver::{DropAction, apply, commit, resolve};
pub use session::{DragKind, DragSession, DropRequest, Modality};
pub use target::{Area, ControlKind, DropTarget, Element, HitMap, Point, RowRef};
