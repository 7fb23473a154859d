//! Interactive trimap editing: turns pointer gestures on an image into the
//! classification and alpha maps a GrabCut-style segmenter starts from.
//!
//! A session has two phases. The first drag selects a rectangle; every
//! pixel outside it becomes fixed background and every pixel inside
//! becomes unknown with a foreground prior. Later drags paint discs that
//! fix pixels to the current brush's label.

pub mod editor;
pub mod error;
pub mod input;
pub mod mask;
pub mod palette;
pub mod raster;
pub mod script;
pub mod session;

pub use editor::Editor;
pub use error::{ConfigError, Error, Result, SessionError};
pub use input::{IgnoreReason, InputStateMachine, Outcome, PointerEvent, PointerKind};
pub use mask::{Alpha, Classification, InitMode, MaskStore, TrimapSnapshot};
pub use palette::{Palette, Swatch};
pub use raster::{Point, RasterSurface};
pub use session::{BrushMode, BrushState, Phase, SelectionRect, SessionState};
