use image::{GrayImage, Luma};
use serde::Serialize;

use crate::error::ConfigError;
use crate::session::SelectionRect;

/// Whether a pixel's alpha was set by the user or is left to the
/// segmentation algorithm.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Unknown = 0,
    Fixed = 1,
}

impl Classification {
    pub fn luma(self) -> Luma<u8> {
        Luma([self as u8])
    }
}

impl From<u8> for Classification {
    fn from(code: u8) -> Self {
        if code == 0 {
            Classification::Unknown
        } else {
            Classification::Fixed
        }
    }
}

/// Trimap prior. Codes follow the GrabCut convention.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alpha {
    Background = 0,
    Foreground = 1,
    ProbableBackground = 2,
    ProbableForeground = 3,
}

impl Alpha {
    pub fn luma(self) -> Luma<u8> {
        Luma([self as u8])
    }

    pub fn is_foreground(self) -> bool {
        matches!(self, Alpha::Foreground | Alpha::ProbableForeground)
    }
}

impl TryFrom<u8> for Alpha {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Alpha::Background),
            1 => Ok(Alpha::Foreground),
            2 => Ok(Alpha::ProbableBackground),
            3 => Ok(Alpha::ProbableForeground),
            other => Err(ConfigError::InvalidAlphaCode(other)),
        }
    }
}

/// How the downstream algorithm should initialize from the maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InitMode {
    /// Only the rectangle has been applied
    Rect,
    /// At least one stroke refined the maps
    Mask,
}

/// Immutable handoff to the segmentation engine at session end.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimapSnapshot {
    pub classification: GrayImage,
    pub alpha: GrayImage,
    pub rectangle: SelectionRect,
    pub init_mode: InitMode,
}

impl TrimapSnapshot {
    pub fn dimensions(&self) -> (u32, u32) {
        self.alpha.dimensions()
    }

    /// Alpha codes spread over 0..=255 so they are visible when saved.
    pub fn alpha_visualization(&self) -> GrayImage {
        GrayImage::from_fn(self.alpha.width(), self.alpha.height(), |x, y| {
            let shade = match Alpha::try_from(self.alpha.get_pixel(x, y).0[0]) {
                Ok(Alpha::Background) => 0,
                Ok(Alpha::ProbableBackground) => 85,
                Ok(Alpha::ProbableForeground) => 170,
                Ok(Alpha::Foreground) => 255,
                Err(_) => 0,
            };
            Luma([shade])
        })
    }

    /// 255 where the prior says (probable) foreground, 0 elsewhere.
    pub fn foreground_mask(&self) -> GrayImage {
        GrayImage::from_fn(self.alpha.width(), self.alpha.height(), |x, y| {
            let fg = Alpha::try_from(self.alpha.get_pixel(x, y).0[0])
                .map(Alpha::is_foreground)
                .unwrap_or(false);
            Luma([if fg { 255 } else { 0 }])
        })
    }

    /// 255 for fixed pixels, 0 for unknown.
    pub fn classification_visualization(&self) -> GrayImage {
        GrayImage::from_fn(
            self.classification.width(),
            self.classification.height(),
            |x, y| match Classification::from(self.classification.get_pixel(x, y).0[0]) {
                Classification::Fixed => Luma([255]),
                Classification::Unknown => Luma([0]),
            },
        )
    }
}
