mod types;

pub use types::{Alpha, Classification, InitMode, TrimapSnapshot};

use image::{GrayImage, Rgb, RgbImage};

use crate::error::SessionError;
use crate::raster::{Point, RasterSurface};
use crate::session::{BrushState, SelectionRect};

/// Owner of every raster buffer in a session.
///
/// The base image is a snapshot taken at session start and is never
/// written. The preview starts as a copy of it. The classification and
/// alpha maps always have the base image's dimensions.
pub struct MaskStore {
    base: RgbImage,
    preview: RgbImage,
    classification: GrayImage,
    alpha: GrayImage,
}

impl MaskStore {
    /// Zero-filled maps (Unknown / Background) sized to `base`.
    pub fn new(base: RgbImage) -> Result<Self, SessionError> {
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            return Err(SessionError::EmptyImage);
        }

        tracing::debug!("Allocating mask buffers at {}x{}", width, height);

        Ok(Self {
            preview: base.clone(),
            classification: GrayImage::new(width, height),
            alpha: GrayImage::new(width, height),
            base,
        })
    }

    /// Plain canvas for hosts without a source image.
    pub fn blank(width: u32, height: u32, fill: Rgb<u8>) -> Result<Self, SessionError> {
        Self::new(RgbImage::from_pixel(width, height, fill))
    }

    /// Resume from maps produced elsewhere, e.g. a previous segmentation pass.
    pub fn with_maps(
        base: RgbImage,
        classification: GrayImage,
        alpha: GrayImage,
    ) -> Result<Self, SessionError> {
        let expected = base.dimensions();
        for actual in [classification.dimensions(), alpha.dimensions()] {
            if actual != expected {
                return Err(SessionError::DimensionMismatch { expected, actual });
            }
        }

        let mut store = Self::new(base)?;
        store.classification = classification;
        store.alpha = alpha;
        Ok(store)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    pub fn base(&self) -> &RgbImage {
        &self.base
    }

    pub fn preview(&self) -> &RgbImage {
        &self.preview
    }

    pub fn classification(&self) -> &GrayImage {
        &self.classification
    }

    pub fn alpha(&self) -> &GrayImage {
        &self.alpha
    }

    pub fn classification_at(&self, x: u32, y: u32) -> Classification {
        Classification::from(self.classification.get_pixel(x, y).0[0])
    }

    /// `None` for codes outside the trimap range, which only maps passed
    /// to `with_maps` can contain.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<Alpha> {
        Alpha::try_from(self.alpha.get_pixel(x, y).0[0]).ok()
    }

    /// Throw away preview annotations.
    pub fn reset_preview(&mut self) {
        self.preview.copy_from_slice(self.base.as_raw());
    }

    /// Preview-only outline; the maps are not touched.
    pub fn draw_outline(&mut self, rect: SelectionRect, color: Rgb<u8>, thickness: u32) {
        let (top_left, bottom_right) = outline_corners(rect);
        self.preview
            .draw_rect_outline(top_left, bottom_right, color, thickness);
    }

    /// Outside the rectangle: Fixed / Background.
    /// Inside: Unknown / Foreground, waiting for strokes.
    pub fn initialize_for_rectangle(&mut self, rect: SelectionRect) {
        let rect = rect.clip_to(self.dimensions());
        let (fixed, unknown) = (Classification::Fixed.luma(), Classification::Unknown.luma());
        let (bg, fg) = (Alpha::Background.luma(), Alpha::Foreground.luma());

        for (x, y, class) in self.classification.enumerate_pixels_mut() {
            *class = if rect.contains(x, y) { unknown } else { fixed };
        }
        for (x, y, alpha) in self.alpha.enumerate_pixels_mut() {
            *alpha = if rect.contains(x, y) { fg } else { bg };
        }

        tracing::debug!(
            "Maps initialized for rectangle ({}, {}, {}, {})",
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }

    /// One brush application: the same disc on preview, alpha and
    /// classification.
    pub fn stamp(&mut self, center: Point, brush: &BrushState) {
        let radius = brush.radius();
        self.preview.draw_disc(center, radius, brush.color());
        self.alpha.draw_disc(center, radius, brush.alpha().luma());
        self.classification
            .draw_disc(center, radius, Classification::Fixed.luma());
    }

    /// Owned copy of the maps for the segmentation engine.
    pub fn snapshot(&self, rectangle: SelectionRect, init_mode: InitMode) -> TrimapSnapshot {
        TrimapSnapshot {
            classification: self.classification.clone(),
            alpha: self.alpha.clone(),
            rectangle,
            init_mode,
        }
    }
}

/// Inclusive outline corners. A degenerate rectangle collapses to a line.
fn outline_corners(rect: SelectionRect) -> (Point, Point) {
    let x0 = rect.x as i32;
    let y0 = rect.y as i32;
    (
        Point::new(x0, y0),
        Point::new(x0 + rect.width as i32, y0 + rect.height as i32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use crate::session::BrushMode;

    fn store() -> MaskStore {
        MaskStore::blank(64, 48, Rgb([10, 20, 30])).unwrap()
    }

    fn brush(mode: BrushMode, radius: u32) -> BrushState {
        BrushState::for_mode(mode, radius, &Palette::default()).unwrap()
    }

    #[test]
    fn test_rejects_empty_image() {
        assert!(matches!(
            MaskStore::blank(0, 10, Rgb([0, 0, 0])),
            Err(SessionError::EmptyImage)
        ));
    }

    #[test]
    fn test_maps_start_zeroed() {
        let store = store();
        assert_eq!(store.classification().dimensions(), (64, 48));
        assert_eq!(store.alpha().dimensions(), (64, 48));
        assert_eq!(store.classification_at(5, 5), Classification::Unknown);
        assert_eq!(store.alpha_at(5, 5), Some(Alpha::Background));
    }

    #[test]
    fn test_initialize_for_rectangle_partitions_image() {
        let mut store = store();
        let rect = SelectionRect::new(10, 5, 20, 15);
        store.initialize_for_rectangle(rect);

        for y in 0..48 {
            for x in 0..64 {
                if rect.contains(x, y) {
                    assert_eq!(store.classification_at(x, y), Classification::Unknown);
                    assert_eq!(store.alpha_at(x, y), Some(Alpha::Foreground));
                } else {
                    assert_eq!(store.classification_at(x, y), Classification::Fixed);
                    assert_eq!(store.alpha_at(x, y), Some(Alpha::Background));
                }
            }
        }
    }

    #[test]
    fn test_degenerate_rectangle_fixes_everything() {
        let mut store = store();
        store.initialize_for_rectangle(SelectionRect::new(10, 10, 0, 30));
        assert!(store
            .classification()
            .pixels()
            .all(|p| p.0[0] == Classification::Fixed as u8));
        assert!(store.alpha().pixels().all(|p| p.0[0] == Alpha::Background as u8));
    }

    #[test]
    fn test_outline_only_touches_preview() {
        let mut store = store();
        let before_alpha = store.alpha().clone();
        store.draw_outline(SelectionRect::new(4, 4, 10, 10), Rgb([0, 0, 255]), 2);

        assert_eq!(store.preview().get_pixel(4, 4), &Rgb([0, 0, 255]));
        assert_eq!(store.preview().get_pixel(14, 14), &Rgb([0, 0, 255]));
        assert_eq!(store.preview().get_pixel(9, 9), &Rgb([10, 20, 30]));
        assert_eq!(store.alpha(), &before_alpha);

        store.reset_preview();
        assert_eq!(store.preview(), store.base());
    }

    #[test]
    fn test_stamp_aligns_three_buffers() {
        let mut store = store();
        store.initialize_for_rectangle(SelectionRect::new(10, 10, 30, 30));
        let brush = brush(BrushMode::ProbableBackground, 3);
        store.stamp(Point::new(20, 20), &brush);

        for y in 0..48u32 {
            for x in 0..64u32 {
                let dx = x as i64 - 20;
                let dy = y as i64 - 20;
                let covered = dx * dx + dy * dy <= 9;
                let painted = store.preview().get_pixel(x, y) == &brush.color();
                assert_eq!(painted, covered, "preview at ({x}, {y})");
                if covered {
                    assert_eq!(store.alpha_at(x, y), Some(Alpha::ProbableBackground));
                    assert_eq!(store.classification_at(x, y), Classification::Fixed);
                }
            }
        }
        assert_eq!(store.alpha_at(20, 24), Some(Alpha::Foreground));
        assert_eq!(store.classification_at(20, 24), Classification::Unknown);
    }

    #[test]
    fn test_stamp_twice_is_idempotent() {
        let mut once = store();
        let mut twice = store();
        let brush = brush(BrushMode::Foreground, 5);
        once.stamp(Point::new(30, 30), &brush);
        twice.stamp(Point::new(30, 30), &brush);
        twice.stamp(Point::new(30, 30), &brush);

        assert_eq!(once.preview(), twice.preview());
        assert_eq!(once.alpha(), twice.alpha());
        assert_eq!(once.classification(), twice.classification());
    }

    #[test]
    fn test_with_maps_checks_dimensions() {
        let base = RgbImage::new(8, 8);
        let err = MaskStore::with_maps(base, GrayImage::new(8, 8), GrayImage::new(4, 8));
        assert!(matches!(
            err,
            Err(SessionError::DimensionMismatch {
                expected: (8, 8),
                actual: (4, 8)
            })
        ));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = store();
        let rect = SelectionRect::new(1, 1, 5, 5);
        store.initialize_for_rectangle(rect);
        let snapshot = store.snapshot(rect, InitMode::Rect);
        store.stamp(Point::new(3, 3), &brush(BrushMode::Background, 2));

        assert_eq!(snapshot.alpha.get_pixel(3, 3).0[0], Alpha::Foreground as u8);
        assert_eq!(snapshot.rectangle, rect);
    }
}
