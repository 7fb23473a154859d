use image::Rgb;

use super::{IgnoreReason, Outcome, PointerEvent, PointerKind};
use crate::mask::MaskStore;
use crate::palette::Palette;
use crate::raster::Point;
use crate::session::{Phase, SelectionRect, SessionState};

/// Interprets pointer events in two phases: one rectangle drag, then any
/// number of brush strokes.
///
/// All state lives in the [`SessionState`] and [`MaskStore`] passed to
/// [`handle`](Self::handle); the machine itself only carries the outline
/// styling from the palette.
#[derive(Debug, Clone)]
pub struct InputStateMachine {
    outline_color: Rgb<u8>,
    outline_thickness: u32,
}

impl InputStateMachine {
    pub fn new(palette: &Palette) -> Self {
        Self {
            outline_color: palette.rectangle_rgb(),
            outline_thickness: palette.outline_thickness,
        }
    }

    /// Apply one event. Runs to completion; ignored events change nothing.
    pub fn handle(
        &self,
        state: &mut SessionState,
        store: &mut MaskStore,
        event: PointerEvent,
    ) -> Outcome {
        let _span =
            tracing::debug_span!("pointer", kind = ?event.kind, x = event.x, y = event.y).entered();

        let point = event.point().clamp_to(store.dimensions());

        let outcome = match (state.phase(), event.kind) {
            (Phase::Idle, PointerKind::Down) => {
                state.set_phase(Phase::RectDragging { anchor: point });
                Outcome::DragStarted(point)
            }
            (Phase::RectDragging { anchor }, PointerKind::Move) => {
                let rect = SelectionRect::from_corners(anchor, point);
                self.preview_rectangle(store, rect);
                Outcome::RectanglePreviewed(rect)
            }
            (Phase::RectDragging { anchor }, PointerKind::Up) => {
                self.finalize_rectangle(state, store, SelectionRect::from_corners(anchor, point))
            }
            (Phase::RectDone, PointerKind::Down) => {
                state.set_phase(Phase::StrokeDragging);
                state.record_stroke();
                Self::stamp(state, store, point, false)
            }
            (Phase::StrokeDragging, PointerKind::Move) => Self::stamp(state, store, point, false),
            (Phase::StrokeDragging, PointerKind::Up) => {
                let outcome = Self::stamp(state, store, point, true);
                state.set_phase(Phase::RectDone);
                outcome
            }
            (Phase::RectDragging { .. } | Phase::StrokeDragging, PointerKind::Down) => {
                Outcome::Ignored(IgnoreReason::AlreadyDragging)
            }
            (Phase::Idle | Phase::RectDone, PointerKind::Move | PointerKind::Up) => {
                Outcome::Ignored(IgnoreReason::NotDragging)
            }
        };

        if let Outcome::Ignored(reason) = outcome {
            tracing::debug!("Ignored {:?} in {:?}: {:?}", event.kind, state.phase(), reason);
        }
        outcome
    }

    fn preview_rectangle(&self, store: &mut MaskStore, rect: SelectionRect) {
        store.reset_preview();
        store.draw_outline(rect, self.outline_color, self.outline_thickness);
    }

    fn finalize_rectangle(
        &self,
        state: &mut SessionState,
        store: &mut MaskStore,
        rect: SelectionRect,
    ) -> Outcome {
        self.preview_rectangle(store, rect);
        store.initialize_for_rectangle(rect);
        state.finalize_rectangle(rect);

        tracing::info!(
            "Rectangle finalized at ({}, {}) size {}x{}",
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        if rect.is_empty() {
            tracing::warn!("Selection rectangle is empty; no foreground selected");
        }

        Outcome::RectangleFinalized(rect)
    }

    fn stamp(
        state: &SessionState,
        store: &mut MaskStore,
        center: Point,
        stroke_ended: bool,
    ) -> Outcome {
        store.stamp(center, state.brush());
        Outcome::Stamped {
            center,
            stroke_ended,
        }
    }
}
