//! The capability contract a native graphics API must satisfy.
//!
//! Each concrete backend (screen, PDF, raster) wraps its own font and draw
//! primitives behind this trait; the emulation layer and everything above it
//! stay backend-agnostic.

use crate::{Rect, ResolvedFont, Result, Scale, Size, StyleFlags, TextAlign};

/// Native text primitives required by the metrics emulator.
///
/// Measurement happens in the backend's native (unscaled) space; the
/// emulator converts results. For drawing, the rectangle arrives already
/// converted into the scaled space, and the backend is expected to apply
/// `scale` around its native draw call (save, scale, draw, restore).
pub trait NativeTextBackend {
    /// Whether the native font supports this exact style combination
    fn supports_style(&self, family: &str, flags: StyleFlags) -> bool;

    /// Measure a single line of text in native space
    fn measure_text(&mut self, text: &str, font: &ResolvedFont) -> Result<Size>;

    /// Draw a single line of text into `rect` (scaled space)
    fn draw_text(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        rect: Rect,
        align: TextAlign,
        scale: Scale,
    ) -> Result<()>;
}
