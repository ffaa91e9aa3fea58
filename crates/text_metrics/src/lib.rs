//! Text Metrics - Emulated font metrics and text measurement
//!
//! This crate lets layout code request an arbitrary character width and line
//! height for a font, independent of what the wrapped native font API
//! actually provides. The emulation works by scaling the coordinate space
//! around each measure/draw call rather than by substituting fonts.
//!
//! # Modules
//!
//! - `geometry`: rectangles and sizes shared by measurement and layout
//! - `font`: font requests, style flags, colors, and cache keys
//! - `backend`: the capability contract a native graphics API must satisfy
//! - `fallback`: the style fallback ladder that guarantees a drawable font
//! - `transform`: pure scale-space conversion functions
//! - `emulator`: the width/line-height emulating renderer itself
//! - `cache`: per-document emulator instances keyed by font identity
//! - `monospace`: a deterministic reference backend

mod backend;
mod cache;
mod emulator;
mod error;
mod fallback;
mod font;
mod geometry;
mod monospace;
mod transform;

pub use backend::*;
pub use cache::*;
pub use emulator::*;
pub use error::*;
pub use fallback::*;
pub use font::*;
pub use geometry::*;
pub use monospace::*;
pub use transform::*;
