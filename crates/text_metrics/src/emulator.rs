//! Width/line-height emulating text renderer.
//!
//! Native font APIs only provide discrete installed metrics. The emulator
//! lets callers request an arbitrary character width and line height for a
//! font: it derives the font's native average character width from a fixed
//! reference sample, computes a horizontal scale factor, and routes every
//! measure and draw call through that same scale so pagination-time
//! measurements match draw-time output exactly.

use crate::{
    from_emulated_space, resolve_font, to_emulated_space, FontRequest, NativeTextBackend, Rect,
    ResolvedFont, Result, Scale, Size, TextAlign,
};
use unicode_segmentation::UnicodeSegmentation;

/// Fixed 40-character reference sample of mixed letters and digits,
/// approximating average glyph width for proportional fonts.
const REFERENCE_SAMPLE: &str = "o0Tz8WqHj3aN5xRv1mKd7uFs2yLb9cGe4iPw6hQA";

/// Emulated-metrics renderer for one font configuration.
///
/// The resolved native font and the derived default metrics are computed
/// lazily and cached; any setter that affects the font invalidates them.
/// Changing only the color invalidates nothing (it affects the brush, not
/// the glyph geometry).
#[derive(Debug)]
pub struct FontMetricsEmulator {
    request: FontRequest,
    resolved: Option<ResolvedFont>,
    default_width: Option<f32>,
    default_line_height: Option<f32>,
}

impl FontMetricsEmulator {
    pub fn new(request: FontRequest) -> Self {
        Self {
            request,
            resolved: None,
            default_width: None,
            default_line_height: None,
        }
    }

    pub fn request(&self) -> &FontRequest {
        &self.request
    }

    pub fn set_family(&mut self, family: impl Into<String>) {
        let family = family.into();
        if self.request.family != family {
            self.request.family = family;
            self.invalidate();
        }
    }

    pub fn set_height(&mut self, height: f32) {
        if self.request.height != height {
            self.request.height = height;
            self.invalidate();
        }
    }

    pub fn set_width(&mut self, width: f32) {
        if self.request.width != width {
            self.request.width = width;
            self.invalidate();
        }
    }

    pub fn set_width_percent(&mut self, percent: f32) {
        if self.request.width_percent != percent {
            self.request.width_percent = percent;
            self.invalidate();
        }
    }

    pub fn set_line_height(&mut self, line_height: f32) {
        if self.request.line_height != line_height {
            self.request.line_height = line_height;
            self.invalidate();
        }
    }

    pub fn set_flags(&mut self, flags: crate::StyleFlags) {
        if self.request.flags != flags {
            self.request.flags = flags;
            self.invalidate();
        }
    }

    /// Color affects only the brush; cached font and metrics survive.
    pub fn set_color(&mut self, color: crate::Color) {
        self.request.color = color;
    }

    fn invalidate(&mut self) {
        self.resolved = None;
        self.default_width = None;
        self.default_line_height = None;
    }

    /// The drawable native font for this request, running the style
    /// fallback ladder on first use
    pub fn font<B: NativeTextBackend>(&mut self, backend: &B) -> ResolvedFont {
        if self.resolved.is_none() {
            self.resolved = Some(resolve_font(
                backend,
                &self.request.family,
                self.request.height,
                self.request.flags,
            ));
        }
        // Just populated above; clone keeps borrows of self short.
        self.resolved.clone().unwrap_or_else(|| ResolvedFont {
            family: self.request.family.clone(),
            height: self.request.height,
            flags: self.request.flags,
        })
    }

    fn ensure_defaults<B: NativeTextBackend>(&mut self, backend: &mut B) {
        if self.default_width.is_some() && self.default_line_height.is_some() {
            return;
        }

        let font = self.font(backend);
        let measured = match backend.measure_text(REFERENCE_SAMPLE, &font) {
            Ok(size) => size,
            Err(e) => {
                tracing::warn!(family = %font.family, error = %e, "reference measurement failed");
                Size::default()
            }
        };

        let glyph_count = REFERENCE_SAMPLE.graphemes(true).count() as f32;
        let avg_width = measured.width / glyph_count;
        let width = if avg_width > 0.0 {
            avg_width
        } else {
            tracing::warn!(family = %font.family, "non-positive glyph width, using height/2 estimate");
            self.request.height / 2.0
        };

        let line_height = if measured.height > 0.0 {
            measured.height
        } else {
            tracing::warn!(family = %font.family, "non-positive line height, using height*1.5 estimate");
            self.request.height * 1.5
        };

        self.default_width = Some(width);
        self.default_line_height = Some(line_height);
    }

    /// Native average character width at the requested height
    pub fn default_font_width<B: NativeTextBackend>(&mut self, backend: &mut B) -> f32 {
        self.ensure_defaults(backend);
        self.default_width.unwrap_or(self.request.height / 2.0)
    }

    /// Native line height at the requested height
    pub fn default_line_height<B: NativeTextBackend>(&mut self, backend: &mut B) -> f32 {
        self.ensure_defaults(backend);
        self.default_line_height.unwrap_or(self.request.height * 1.5)
    }

    /// The character width actually in effect: the explicit width override,
    /// else the native default adjusted by `width_percent`
    pub fn emulated_width<B: NativeTextBackend>(&mut self, backend: &mut B) -> f32 {
        if self.request.width > 0.0 {
            return self.request.width;
        }
        let default = self.default_font_width(backend);
        if (self.request.width_percent - 100.0).abs() > f32::EPSILON {
            default * self.request.width_percent / 100.0
        } else {
            default
        }
    }

    /// Per-line advance. A requested line height affects only line spacing;
    /// glyphs are never vertically scaled, so a font whose native line
    /// height equals its point size needs no special casing.
    pub fn line_height<B: NativeTextBackend>(&mut self, backend: &mut B) -> f32 {
        if self.request.line_height > 0.0 {
            self.request.line_height
        } else {
            self.default_line_height(backend)
        }
    }

    /// The coordinate-space scale implementing width emulation
    pub fn scale<B: NativeTextBackend>(&mut self, backend: &mut B) -> Scale {
        let native = self.default_font_width(backend);
        let emulated = self.emulated_width(backend);
        if native > 0.0 && (emulated - native).abs() > f32::EPSILON {
            Scale::horizontal(emulated / native)
        } else {
            Scale::identity()
        }
    }

    /// Measure one line of text in caller space. Degenerate backend results
    /// fall back to a character-count estimate rather than erroring, since
    /// layout must always produce a usable page.
    pub fn measure_string<B: NativeTextBackend>(&mut self, backend: &mut B, text: &str) -> Size {
        let scale = self.scale(backend);
        let line_height = self.line_height(backend);
        let font = self.font(backend);

        let native = match backend.measure_text(text, &font) {
            Ok(size) if size.width >= 0.0 => size,
            Ok(_) | Err(_) => {
                let estimate = text.graphemes(true).count() as f32 * self.default_font_width(backend);
                Size::new(estimate, line_height)
            }
        };

        let scaled = from_emulated_space(Size::new(native.width, 0.0), scale);
        Size::new(scaled.width, line_height)
    }

    /// Draw one line of text into `rect` (caller space), routed through the
    /// same scale used for measurement
    pub fn draw_string<B: NativeTextBackend>(
        &mut self,
        backend: &mut B,
        text: &str,
        rect: Rect,
        align: TextAlign,
    ) -> Result<()> {
        let scale = self.scale(backend);
        let font = self.font(backend);
        let scaled_rect = to_emulated_space(rect, scale);
        backend.draw_text(text, &font, scaled_rect, align, scale)
    }
}
