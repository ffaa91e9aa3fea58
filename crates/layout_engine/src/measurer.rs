//! Cell measurement
//!
//! Computes `(height, lines)` for a cell given its value, style, and the
//! width of the column it lives in. The same routine runs twice per cell,
//! once while deciding row heights and page breaks and once while drawing,
//! so it must be deterministic: identical inputs always produce identical
//! line splits, or paginated heights and rendered content drift apart.

use crate::{strip_soft_hyphens, WordWrapper};
use grid_model::{Cell, CellStyle, FitPolicy, WrapMode};
use text_metrics::{
    FontRequest, MetricsCache, NativeTextBackend, Rect, Size, TextAlign,
};

/// One indent level is two emulated character widths
const INDENT_CHARS: f32 = 2.0;

/// Fit-policy scale step and bounds
const FIT_STEP: f32 = 0.1;
const SHRINK_FLOOR: f32 = 0.4;
const ENLARGE_CAP: f32 = 3.0;

/// Result of measuring one cell at one column width
#[derive(Debug, Clone, PartialEq)]
pub struct CellMeasurement {
    /// Wanted height including vertical margins
    pub height: f32,
    /// Final line split, in drawing order
    pub lines: Vec<String>,
    /// Font scale applied by the fit policy (1.0 = unscaled)
    pub font_scale: f32,
}

/// Measurement contract the paginator depends on
pub trait TextMetricsProvider {
    /// Height the cell wants at this column width, with the line split
    /// that produced it
    fn wanted_height(&mut self, cell: &Cell, column_width: f32) -> CellMeasurement;

    /// Measure a single already-split line under a style
    fn measure_string(&mut self, style: &CellStyle, text: &str) -> Size;

    /// Apply the cell's fit policy against a fixed available height.
    /// Providers without scalable fonts fall back to the plain measurement.
    fn fit_to_height(&mut self, cell: &Cell, column_width: f32, max_height: f32) -> CellMeasurement {
        let _ = max_height;
        self.wanted_height(cell, column_width)
    }
}

/// [`TextMetricsProvider`] backed by emulated font metrics
///
/// Owns the native backend and a per-pass metrics cache; one instance
/// serves a whole pagination-plus-render pass so pagination and drawing
/// see the same cached font defaults.
pub struct EmulatedMeasurer<B: NativeTextBackend> {
    backend: B,
    cache: MetricsCache,
}

impl<B: NativeTextBackend> EmulatedMeasurer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: MetricsCache::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn scaled_request(style: &CellStyle, font_scale: f32) -> FontRequest {
        let mut request = style.font_request();
        if (font_scale - 1.0).abs() > f32::EPSILON {
            request.height *= font_scale;
            if request.width > 0.0 {
                request.width *= font_scale;
            }
            if request.line_height > 0.0 {
                request.line_height *= font_scale;
            }
        }
        request
    }

    fn measure_cell(&mut self, cell: &Cell, column_width: f32, font_scale: f32) -> CellMeasurement {
        let style = &cell.style;
        let wrap = style.wrap == WrapMode::WordWrap;
        let request = Self::scaled_request(style, font_scale);

        let emulator = self.cache.emulator(&request, wrap);
        let backend = &mut self.backend;

        let char_width = emulator.emulated_width(backend);
        let indent = style.indent as f32 * INDENT_CHARS * char_width;
        let available = column_width - style.margins.horizontal() - indent;

        let text = cell.value.display();
        let mut lines = Vec::new();
        for segment in split_hard_breaks(&text) {
            // Pathological margins: keep the hard-broken lines unwrapped
            // rather than loop or error.
            if !wrap || available <= 0.0 {
                lines.push(strip_soft_hyphens(segment));
            } else if segment.is_empty() {
                lines.push(String::new());
            } else {
                let fits =
                    |line: &str| emulator.measure_string(&mut *backend, line).width <= available;
                lines.extend(WordWrapper::new(segment, fits));
            }
        }

        let mut height = style.margins.vertical();
        for line in &lines {
            height += emulator.measure_string(backend, line).height;
        }

        CellMeasurement {
            height,
            lines,
            font_scale,
        }
    }

    /// Line advance for stacking a cell's lines at draw time
    pub fn line_advance(&mut self, style: &CellStyle, font_scale: f32) -> f32 {
        let request = Self::scaled_request(style, font_scale);
        let wrap = style.wrap == WrapMode::WordWrap;
        self.cache
            .emulator(&request, wrap)
            .line_height(&mut self.backend)
    }

    /// Horizontal offset produced by the style's indent level
    pub fn indent_offset(&mut self, style: &CellStyle, font_scale: f32) -> f32 {
        let request = Self::scaled_request(style, font_scale);
        let wrap = style.wrap == WrapMode::WordWrap;
        let char_width = self
            .cache
            .emulator(&request, wrap)
            .emulated_width(&mut self.backend);
        style.indent as f32 * INDENT_CHARS * char_width
    }

    /// Draw one already-wrapped line through the emulated metrics, so the
    /// backend sees the same scale measurement used
    pub fn draw_line(
        &mut self,
        style: &CellStyle,
        font_scale: f32,
        text: &str,
        rect: Rect,
        align: TextAlign,
    ) -> text_metrics::Result<()> {
        let request = Self::scaled_request(style, font_scale);
        let wrap = style.wrap == WrapMode::WordWrap;
        let emulator = self.cache.emulator(&request, wrap);
        emulator.draw_string(&mut self.backend, text, rect, align)
    }
}

impl<B: NativeTextBackend> TextMetricsProvider for EmulatedMeasurer<B> {
    fn wanted_height(&mut self, cell: &Cell, column_width: f32) -> CellMeasurement {
        self.measure_cell(cell, column_width, 1.0)
    }

    fn measure_string(&mut self, style: &CellStyle, text: &str) -> Size {
        let request = style.font_request();
        let wrap = style.wrap == WrapMode::WordWrap;
        self.cache
            .emulator(&request, wrap)
            .measure_string(&mut self.backend, text)
    }

    /// Shrink steps the font down 10 % at a time to a 40 % floor until the
    /// content fits; Enlarge steps up to a 300 % cap while it still fits.
    fn fit_to_height(&mut self, cell: &Cell, column_width: f32, max_height: f32) -> CellMeasurement {
        let mut current = self.measure_cell(cell, column_width, 1.0);
        match cell.style.fit {
            FitPolicy::None => current,
            FitPolicy::Shrink => {
                let mut scale = 1.0;
                while current.height > max_height && scale > SHRINK_FLOOR + f32::EPSILON {
                    scale -= FIT_STEP;
                    current = self.measure_cell(cell, column_width, scale);
                }
                current
            }
            FitPolicy::Enlarge => loop {
                let next_scale = current.font_scale + FIT_STEP;
                if next_scale > ENLARGE_CAP + f32::EPSILON {
                    return current;
                }
                let next = self.measure_cell(cell, column_width, next_scale);
                if next.height > max_height {
                    return current;
                }
                current = next;
            },
        }
    }
}

/// Hard line breaks are split before any word wrapping and are never
/// merged back together
fn split_hard_breaks(text: &str) -> Vec<&str> {
    text.split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_model::{CellValue, Margins};
    use text_metrics::MonospaceTextBackend;

    // Monospace backend: char width = height * 0.5, line height = height * 1.2.
    fn measurer() -> EmulatedMeasurer<MonospaceTextBackend> {
        EmulatedMeasurer::new(MonospaceTextBackend::new())
    }

    fn wrapping_cell(text: &str) -> Cell {
        let mut cell = Cell::text(text);
        cell.style.wrap = WrapMode::WordWrap;
        cell
    }

    #[test]
    fn test_single_line_height() {
        let mut m = measurer();
        let cell = Cell::text("hello");
        let result = m.wanted_height(&cell, 200.0);
        assert_eq!(result.lines, vec!["hello"]);
        // One line at font height 10 -> 12.
        assert!((result.height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_splits_to_column_width() {
        let mut m = measurer();
        // 9 chars fit: 9 * 5 = 45.
        let result = m.wanted_height(&wrapping_cell("aaaa bbbb cccc"), 45.0);
        assert_eq!(result.lines, vec!["aaaa bbbb", "cccc"]);
        assert!((result.height - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_margins_reduce_available_width() {
        let mut m = measurer();
        let mut cell = wrapping_cell("aaaa bbbb cccc");
        cell.style.margins = Margins {
            left: 10.0,
            right: 15.0,
            top: 2.0,
            bottom: 3.0,
        };
        // 70 - 25 = 45 available, so same split as above, plus margins.
        let result = m.wanted_height(&cell, 70.0);
        assert_eq!(result.lines.len(), 2);
        assert!((result.height - 29.0).abs() < 1e-4);
    }

    #[test]
    fn test_indent_reduces_available_width() {
        let mut m = measurer();
        let mut cell = wrapping_cell("aaaa bbbb cccc");
        cell.style.indent = 1;
        // Indent eats 2 chars: 55 - 10 = 45 available.
        let result = m.wanted_height(&cell, 55.0);
        assert_eq!(result.lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_hard_breaks_are_never_merged() {
        let mut m = measurer();
        let result = m.wanted_height(&wrapping_cell("a\nb\r\nc"), 500.0);
        assert_eq!(result.lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_degenerate_width_skips_wrapping() {
        let mut m = measurer();
        let mut cell = wrapping_cell("one two\nthree");
        cell.style.margins = Margins::uniform(300.0);
        let result = m.wanted_height(&cell, 100.0);
        assert_eq!(result.lines, vec!["one two", "three"]);
    }

    #[test]
    fn test_no_wrap_strips_soft_hyphens() {
        let mut m = measurer();
        let cell = Cell::text("super\u{AD}califragilistic");
        let result = m.wanted_height(&cell, 500.0);
        assert_eq!(result.lines, vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_measurement_is_idempotent() {
        let mut m = measurer();
        let cell = wrapping_cell("pack my box with five dozen liquor jugs");
        let a = m.wanted_height(&cell, 80.0);
        let b = m.wanted_height(&cell, 80.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_value_still_occupies_one_line() {
        let mut m = measurer();
        let cell = Cell::text("");
        let result = m.wanted_height(&cell, 100.0);
        assert_eq!(result.lines, vec![""]);
        assert!((result.height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_shrink_converges_to_fit() {
        let mut m = measurer();
        let mut cell = wrapping_cell("some words that need three lines here");
        cell.style.fit = FitPolicy::Shrink;
        let unscaled = m.wanted_height(&cell, 60.0);
        assert!(unscaled.height > 24.0);

        let fitted = m.fit_to_height(&cell, 60.0, 24.0);
        assert!(fitted.font_scale < 1.0);
        assert!(fitted.font_scale >= SHRINK_FLOOR - 1e-4);
        assert!(fitted.height <= 24.0 || (fitted.font_scale - SHRINK_FLOOR).abs() < 1e-4);
    }

    #[test]
    fn test_enlarge_stops_before_overflow() {
        let mut m = measurer();
        let mut cell = Cell::text("big");
        cell.style.fit = FitPolicy::Enlarge;
        let fitted = m.fit_to_height(&cell, 400.0, 30.0);
        assert!(fitted.font_scale > 1.0);
        assert!(fitted.height <= 30.0);
        // One more step would overflow 30 units.
        let next = (fitted.font_scale + FIT_STEP) * 12.0;
        assert!(next > 30.0 || fitted.font_scale >= ENLARGE_CAP - 1e-4);
    }

    #[test]
    fn test_value_formatting_feeds_measurement() {
        let mut m = measurer();
        let cell = Cell::new(CellValue::Number(42.0), CellStyle::default());
        let result = m.wanted_height(&cell, 100.0);
        assert_eq!(result.lines, vec!["42"]);
    }
}
