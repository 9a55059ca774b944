//! Freehand 3D strokes for XR pens: recording, per-color render batches, whole-stroke and
//! partial erasing.

pub mod config;
pub mod engine;
pub mod geom;
pub mod palette;
pub mod tools;

pub(crate) mod util;

pub use config::{ConfigError, EngineConfig, SplitPolicy};
pub use engine::{PixelEraseReport, StrokeEngine};
pub use palette::{ColorIndex, Palette, PaletteError};
