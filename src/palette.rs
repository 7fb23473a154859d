//! Colors, alpha codes and brush limits for a session.
//!
//! A [`Palette`] is handed to the editor when a session starts. Nothing in
//! the core reads colors or codes from anywhere else.

use std::path::Path;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mask::Alpha;
use crate::session::BrushMode;

/// Display color plus the alpha code a brush mode writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub color: [u8; 3],
    pub alpha: u8,
}

impl Swatch {
    pub const fn new(color: [u8; 3], alpha: Alpha) -> Self {
        Self {
            color,
            alpha: alpha as u8,
        }
    }

    pub fn rgb(&self) -> Rgb<u8> {
        Rgb(self.color)
    }
}

/// Largest brush radius any palette may allow.
pub const MAX_BRUSH_RADIUS: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Outline color of the selection rectangle in the preview
    pub rectangle_color: [u8; 3],
    pub outline_thickness: u32,
    pub default_radius: u32,
    pub min_radius: u32,
    pub max_radius: u32,
    pub background: Swatch,
    pub foreground: Swatch,
    pub probable_background: Swatch,
    pub probable_foreground: Swatch,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            rectangle_color: [0, 0, 255],
            outline_thickness: 2,
            default_radius: 3,
            min_radius: 1,
            max_radius: 64,
            background: Swatch::new([0, 0, 0], Alpha::Background),
            foreground: Swatch::new([255, 255, 255], Alpha::Foreground),
            probable_background: Swatch::new([255, 0, 0], Alpha::ProbableBackground),
            probable_foreground: Swatch::new([0, 255, 0], Alpha::ProbableForeground),
        }
    }
}

impl Palette {
    /// Load a palette from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let palette: Palette =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        palette.validate()?;

        tracing::debug!("Loaded palette from {}", path.display());
        Ok(palette)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outline_thickness == 0 {
            return Err(ConfigError::InvalidPalette(
                "outline_thickness must be at least 1".into(),
            ));
        }
        if self.max_radius > MAX_BRUSH_RADIUS {
            return Err(ConfigError::InvalidPalette(format!(
                "max_radius {} exceeds {}",
                self.max_radius, MAX_BRUSH_RADIUS
            )));
        }
        if self.min_radius > self.max_radius {
            return Err(ConfigError::InvalidPalette(format!(
                "min_radius {} exceeds max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        self.check_radius(self.default_radius)?;

        for mode in BrushMode::ALL {
            Alpha::try_from(self.swatch(mode).alpha)?;
        }
        Ok(())
    }

    /// Radius within this palette's limits and never above [`MAX_BRUSH_RADIUS`].
    pub fn check_radius(&self, radius: u32) -> Result<(), ConfigError> {
        let max = self.max_radius.min(MAX_BRUSH_RADIUS);
        if (self.min_radius..=max).contains(&radius) {
            Ok(())
        } else {
            Err(ConfigError::RadiusOutOfRange {
                radius,
                min: self.min_radius,
                max,
            })
        }
    }

    pub fn swatch(&self, mode: BrushMode) -> Swatch {
        match mode {
            BrushMode::Background => self.background,
            BrushMode::Foreground => self.foreground,
            BrushMode::ProbableBackground => self.probable_background,
            BrushMode::ProbableForeground => self.probable_foreground,
        }
    }

    pub fn rectangle_rgb(&self) -> Rgb<u8> {
        Rgb(self.rectangle_color)
    }
}
