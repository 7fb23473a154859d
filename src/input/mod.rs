mod machine;

pub use machine::InputStateMachine;

use crate::raster::Point;
use crate::session::SelectionRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer event in image pixel space. Translating from screen space is
/// the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    pub const fn down(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
        }
    }

    pub const fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
        }
    }

    pub const fn up(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Up,
            x,
            y,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Why an event left every buffer and the phase untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Pointer-down while a rectangle drag or stroke is in progress
    AlreadyDragging,
    /// Move or release with no drag in progress
    NotDragging,
}

/// What a single event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    DragStarted(Point),
    RectanglePreviewed(SelectionRect),
    RectangleFinalized(SelectionRect),
    Stamped { center: Point, stroke_ended: bool },
    Ignored(IgnoreReason),
}

impl Outcome {
    /// True when the host should redraw the preview.
    pub fn changed_preview(&self) -> bool {
        matches!(
            self,
            Outcome::RectanglePreviewed(_)
                | Outcome::RectangleFinalized(_)
                | Outcome::Stamped { .. }
        )
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }
}
