use std::fmt;
use std::str::FromStr;

use image::Rgb;

use crate::error::ConfigError;
use crate::mask::Alpha;
use crate::palette::Palette;

/// Which trimap label a stroke paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrushMode {
    Background,
    Foreground,
    ProbableBackground,
    ProbableForeground,
}

impl BrushMode {
    pub const ALL: [BrushMode; 4] = [
        BrushMode::Background,
        BrushMode::Foreground,
        BrushMode::ProbableBackground,
        BrushMode::ProbableForeground,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BrushMode::Background => "bg",
            BrushMode::Foreground => "fg",
            BrushMode::ProbableBackground => "pr_bg",
            BrushMode::ProbableForeground => "pr_fg",
        }
    }
}

impl fmt::Display for BrushMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the short names and the palette's number keys
/// (0 = bg, 1 = fg, 2 = pr_bg, 3 = pr_fg).
impl FromStr for BrushMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "bg" | "background" => Ok(BrushMode::Background),
            "1" | "fg" | "foreground" => Ok(BrushMode::Foreground),
            "2" | "pr_bg" | "probable_background" => Ok(BrushMode::ProbableBackground),
            "3" | "pr_fg" | "probable_foreground" => Ok(BrushMode::ProbableForeground),
            _ => Err(ConfigError::UnknownBrushMode(s.to_string())),
        }
    }
}

/// Brush as last assigned by the tool palette.
///
/// Fields are private: a `BrushState` only exists once its radius and
/// alpha code have been checked against a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushState {
    mode: BrushMode,
    radius: u32,
    color: Rgb<u8>,
    alpha: Alpha,
}

impl BrushState {
    pub fn new(
        mode: BrushMode,
        radius: u32,
        color: Rgb<u8>,
        alpha_code: u8,
        palette: &Palette,
    ) -> Result<Self, ConfigError> {
        palette.check_radius(radius)?;
        let alpha = Alpha::try_from(alpha_code)?;
        Ok(Self {
            mode,
            radius,
            color,
            alpha,
        })
    }

    /// Brush with the palette's color and alpha code for `mode`.
    pub fn for_mode(mode: BrushMode, radius: u32, palette: &Palette) -> Result<Self, ConfigError> {
        let swatch = palette.swatch(mode);
        Self::new(mode, radius, swatch.rgb(), swatch.alpha, palette)
    }

    pub fn with_radius(self, radius: u32, palette: &Palette) -> Result<Self, ConfigError> {
        palette.check_radius(radius)?;
        Ok(Self { radius, ..self })
    }

    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn color(&self) -> Rgb<u8> {
        self.color
    }

    pub fn alpha(&self) -> Alpha {
        self.alpha
    }
}
