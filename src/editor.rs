//! Host-facing entry point bundling session state, buffers and the input
//! machine.

use image::{Rgb, RgbImage};

use crate::error::{ConfigError, Result};
use crate::input::{InputStateMachine, Outcome, PointerEvent};
use crate::mask::{InitMode, MaskStore, TrimapSnapshot};
use crate::palette::Palette;
use crate::session::{BrushMode, BrushState, SessionState};

/// One interactive trimap edit.
///
/// The host feeds pointer events, redraws [`Editor::preview`] when an
/// [`Outcome`] asks for it, and takes the maps with [`Editor::finish`].
pub struct Editor {
    palette: Palette,
    machine: InputStateMachine,
    state: SessionState,
    store: MaskStore,
}

impl Editor {
    /// Start a session on `base` with a validated palette. The brush
    /// starts as the palette's foreground brush at its default radius.
    pub fn start(base: RgbImage, palette: Palette) -> Result<Self> {
        palette.validate()?;
        let brush = BrushState::for_mode(BrushMode::Foreground, palette.default_radius, &palette)?;
        let store = MaskStore::new(base)?;

        let (width, height) = store.dimensions();
        tracing::info!("Session started on {}x{} image", width, height);

        Ok(Self {
            machine: InputStateMachine::new(&palette),
            state: SessionState::new(brush),
            store,
            palette,
        })
    }

    /// Session on a plain canvas of the given size.
    pub fn blank(width: u32, height: u32, palette: Palette) -> Result<Self> {
        Self::start(RgbImage::from_pixel(width, height, Rgb([0, 0, 0])), palette)
    }

    /// Begin a new session on the same image: phase, rectangle, preview and
    /// both maps go back to their initial state. The brush is kept.
    pub fn reset(&mut self) -> Result<()> {
        let brush = *self.state.brush();
        self.store = MaskStore::new(self.store.base().clone())?;
        self.state = SessionState::new(brush);
        tracing::info!("Session reset");
        Ok(())
    }

    pub fn handle(&mut self, event: PointerEvent) -> Outcome {
        self.machine.handle(&mut self.state, &mut self.store, event)
    }

    /// Assign a brush built elsewhere. Its radius must fit this session's
    /// palette, whatever palette it was built against.
    pub fn set_brush(&mut self, brush: BrushState) -> std::result::Result<(), ConfigError> {
        self.palette.check_radius(brush.radius())?;
        self.state.set_brush(brush);
        Ok(())
    }

    /// Switch mode keeping the current radius.
    pub fn select_mode(&mut self, mode: BrushMode) -> std::result::Result<(), ConfigError> {
        let brush = BrushState::for_mode(mode, self.state.brush().radius(), &self.palette)?;
        self.state.set_brush(brush);
        Ok(())
    }

    pub fn set_radius(&mut self, radius: u32) -> std::result::Result<(), ConfigError> {
        let brush = self.state.brush().with_radius(radius, &self.palette)?;
        self.state.set_brush(brush);
        Ok(())
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &MaskStore {
        &self.store
    }

    pub fn preview(&self) -> &RgbImage {
        self.store.preview()
    }

    /// Current maps, or `None` before a rectangle has been finalized.
    pub fn snapshot(&self) -> Option<TrimapSnapshot> {
        let rectangle = self.state.rectangle()?;
        let init_mode = if self.state.strokes() > 0 {
            InitMode::Mask
        } else {
            InitMode::Rect
        };
        Some(self.store.snapshot(rectangle, init_mode))
    }

    /// End the session and hand the maps to the segmentation engine.
    pub fn finish(self) -> Option<TrimapSnapshot> {
        let snapshot = self.snapshot();
        if snapshot.is_none() {
            tracing::warn!("Session finished without a selection rectangle");
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::input::IgnoreReason;
    use crate::mask::{Alpha, Classification};
    use crate::session::{Phase, SelectionRect};

    fn editor() -> Editor {
        Editor::blank(64, 64, Palette::default()).unwrap()
    }

    #[test]
    fn test_start_rejects_invalid_palette() {
        let palette = Palette {
            outline_thickness: 0,
            ..Palette::default()
        };
        assert!(matches!(
            Editor::blank(8, 8, palette),
            Err(Error::Config(ConfigError::InvalidPalette(_)))
        ));
    }

    #[test]
    fn test_snapshot_requires_rectangle() {
        let mut editor = editor();
        assert!(editor.snapshot().is_none());
        editor.handle(PointerEvent::down(4, 4));
        editor.handle(PointerEvent::moved(20, 20));
        assert!(editor.snapshot().is_none());
        assert!(editor.finish().is_none());
    }

    #[test]
    fn test_init_mode_switches_after_stroke() {
        let mut editor = editor();
        editor.handle(PointerEvent::down(4, 4));
        editor.handle(PointerEvent::up(40, 40));
        assert_eq!(editor.snapshot().unwrap().init_mode, InitMode::Rect);

        editor.handle(PointerEvent::down(10, 10));
        editor.handle(PointerEvent::up(10, 10));
        let snapshot = editor.finish().unwrap();
        assert_eq!(snapshot.init_mode, InitMode::Mask);
        assert_eq!(snapshot.rectangle, SelectionRect::new(4, 4, 36, 36));
    }

    #[test]
    fn test_reset_allows_new_rectangle() {
        let mut editor = editor();
        editor.select_mode(BrushMode::ProbableForeground).unwrap();
        editor.handle(PointerEvent::down(4, 4));
        editor.handle(PointerEvent::up(40, 40));
        editor.handle(PointerEvent::down(10, 10));
        editor.handle(PointerEvent::up(10, 10));

        editor.reset().unwrap();
        assert_eq!(editor.state().phase(), Phase::Idle);
        assert!(editor.state().rectangle().is_none());
        assert_eq!(editor.preview(), editor.store().base());
        assert_eq!(editor.store().classification_at(10, 10), Classification::Unknown);
        assert_eq!(editor.state().brush().mode(), BrushMode::ProbableForeground);

        editor.handle(PointerEvent::down(1, 2));
        assert_eq!(
            editor.handle(PointerEvent::up(3, 5)),
            Outcome::RectangleFinalized(SelectionRect::new(1, 2, 2, 3))
        );
    }

    #[test]
    fn test_brush_changes_apply_between_events() {
        let mut editor = editor();
        editor.handle(PointerEvent::down(0, 0));
        editor.handle(PointerEvent::up(63, 63));

        editor.select_mode(BrushMode::Background).unwrap();
        editor.set_radius(1).unwrap();
        editor.handle(PointerEvent::down(30, 30));
        editor.select_mode(BrushMode::ProbableBackground).unwrap();
        editor.handle(PointerEvent::moved(40, 30));
        editor.handle(PointerEvent::up(40, 30));

        assert_eq!(editor.store().alpha_at(30, 30), Some(Alpha::Background));
        assert_eq!(editor.store().alpha_at(40, 30), Some(Alpha::ProbableBackground));
        assert_eq!(editor.store().alpha_at(32, 30), Some(Alpha::Foreground));
    }

    #[test]
    fn test_set_brush_enforces_session_limits() {
        let mut editor = editor();
        let loose = Palette {
            max_radius: 200,
            ..Palette::default()
        };
        let wide = BrushState::for_mode(BrushMode::Background, 150, &loose).unwrap();
        let before = *editor.state().brush();

        assert!(matches!(
            editor.set_brush(wide),
            Err(ConfigError::RadiusOutOfRange { radius: 150, max: 64, .. })
        ));
        assert_eq!(editor.state().brush(), &before);

        let narrow = BrushState::for_mode(BrushMode::Background, 10, &loose).unwrap();
        editor.set_brush(narrow).unwrap();
        assert_eq!(editor.state().brush(), &narrow);
    }

    #[test]
    fn test_bad_radius_leaves_brush_unchanged() {
        let mut editor = editor();
        let before = *editor.state().brush();
        assert!(matches!(
            editor.set_radius(10_000),
            Err(ConfigError::RadiusOutOfRange { radius: 10_000, .. })
        ));
        assert_eq!(editor.state().brush(), &before);
        assert_eq!(
            editor.handle(PointerEvent::up(1, 1)),
            Outcome::Ignored(IgnoreReason::NotDragging)
        );
    }
}
