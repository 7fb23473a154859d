//! Session state shared between the input machine and the tool palette.

mod brush;

pub use brush::{BrushMode, BrushState};

use serde::Serialize;

use crate::raster::Point;

/// Axis-aligned selection in image pixels. `x + width` and `y + height`
/// are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SelectionRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SelectionRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `(min(ix,x), min(iy,y), |ix-x|, |iy-y|)` for an anchor and a
    /// current point. Both points must already be clamped to the image.
    pub fn from_corners(anchor: Point, current: Point) -> Self {
        Self {
            x: anchor.x.min(current.x).max(0) as u32,
            y: anchor.y.min(current.y).max(0) as u32,
            width: anchor.x.abs_diff(current.x),
            height: anchor.y.abs_diff(current.y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && px - self.x < self.width
            && py - self.y < self.height
    }

    /// Restrict to a `(width, height)` image.
    pub fn clip_to(&self, (width, height): (u32, u32)) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }
}

/// Where the input machine is in the two-phase gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Rectangle drag in progress from `anchor`
    RectDragging { anchor: Point },
    RectDone,
    StrokeDragging,
}

/// Everything the input machine consults between events.
///
/// The phase and rectangle are written only by the input machine; the
/// brush only by the palette through [`SessionState::set_brush`].
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: Phase,
    rectangle: Option<SelectionRect>,
    brush: BrushState,
    strokes: u32,
}

impl SessionState {
    pub fn new(brush: BrushState) -> Self {
        Self {
            phase: Phase::Idle,
            rectangle: None,
            brush,
            strokes: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rectangle(&self) -> Option<SelectionRect> {
        self.rectangle
    }

    pub fn rectangle_finalized(&self) -> bool {
        self.rectangle.is_some()
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn set_brush(&mut self, brush: BrushState) {
        tracing::debug!(
            "Brush set to {} radius {}",
            brush.mode(),
            brush.radius()
        );
        self.brush = brush;
    }

    /// Number of strokes applied since the rectangle was finalized.
    pub fn strokes(&self) -> u32 {
        self.strokes
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Lock in the selection and move to the stroke phase. Only reachable
    /// from a rectangle drag, which a finalized session never re-enters.
    pub(crate) fn finalize_rectangle(&mut self, rect: SelectionRect) {
        debug_assert!(self.rectangle.is_none());
        self.rectangle = Some(rect);
        self.phase = Phase::RectDone;
    }

    pub(crate) fn record_stroke(&mut self) {
        self.strokes += 1;
    }
}
