use std::path::PathBuf;

/// Rejected palette or brush configuration.
///
/// Raised where the configuration is assigned, never while stamping.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("brush radius {radius} outside allowed range {min}..={max}")]
    RadiusOutOfRange { radius: u32, min: u32, max: u32 },

    #[error("invalid alpha code {0} (expected 0..=3)")]
    InvalidAlphaCode(u8),

    #[error("unknown brush mode {0:?}")]
    UnknownBrushMode(String),

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("failed to read palette {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse palette {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Session lifecycle violations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("image has no pixels")]
    EmptyImage,

    #[error("buffer is {actual:?}, session expects {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Anything that can stop an editor session from starting or continuing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type Result<T> = std::result::Result<T, Error>;
