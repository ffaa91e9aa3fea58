//! Deterministic reference backend.
//!
//! Every glyph advances `height * aspect` and lines are `height *
//! line_factor` tall, so measurements are exactly reproducible. Used as the
//! reference backend in tests and for plain-text previews; also doubles as
//! a test instrument via its draw journal and configurable style support.

use crate::{
    NativeTextBackend, Rect, ResolvedFont, Result, Scale, Size, StyleFlags, TextAlign,
    TextMetricsError,
};
use std::collections::{HashMap, HashSet};

/// One recorded draw call
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub text: String,
    pub font: ResolvedFont,
    pub rect: Rect,
    pub align: TextAlign,
    pub scale: Scale,
}

/// Fixed-advance text backend with deterministic metrics
#[derive(Debug)]
pub struct MonospaceTextBackend {
    aspect: f32,
    line_factor: f32,
    /// Families restricted to an explicit set of style combinations;
    /// unlisted families support everything.
    restricted: HashMap<String, HashSet<u8>>,
    /// Substring that makes draw_text fail, for error-path tests
    fail_needle: Option<String>,
    /// Journal of every draw call, in order
    pub drawn: Vec<DrawRecord>,
}

impl MonospaceTextBackend {
    pub fn new() -> Self {
        Self::with_aspect(0.5)
    }

    pub fn with_aspect(aspect: f32) -> Self {
        Self {
            aspect,
            line_factor: 1.2,
            restricted: HashMap::new(),
            fail_needle: None,
            drawn: Vec::new(),
        }
    }

    pub fn set_line_factor(&mut self, factor: f32) {
        self.line_factor = factor;
    }

    /// Limit a family to the given style combinations (empty = none at all)
    pub fn restrict_styles(&mut self, family: &str, styles: &[StyleFlags]) {
        self.restricted.insert(
            family.to_string(),
            styles.iter().map(StyleFlags::bits).collect(),
        );
    }

    /// Make draw_text fail whenever the text contains `needle`
    pub fn fail_drawing_containing(&mut self, needle: impl Into<String>) {
        self.fail_needle = Some(needle.into());
    }
}

impl Default for MonospaceTextBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeTextBackend for MonospaceTextBackend {
    fn supports_style(&self, family: &str, flags: StyleFlags) -> bool {
        match self.restricted.get(family) {
            Some(allowed) => allowed.contains(&flags.bits()),
            None => true,
        }
    }

    fn measure_text(&mut self, text: &str, font: &ResolvedFont) -> Result<Size> {
        Ok(Size::new(
            text.chars().count() as f32 * font.height * self.aspect,
            font.height * self.line_factor,
        ))
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        rect: Rect,
        align: TextAlign,
        scale: Scale,
    ) -> Result<()> {
        if let Some(needle) = &self.fail_needle {
            if text.contains(needle.as_str()) {
                return Err(TextMetricsError::DrawFailed(format!(
                    "injected failure for {text:?}"
                )));
            }
        }
        self.drawn.push(DrawRecord {
            text: text.to_string(),
            font: font.clone(),
            rect,
            align,
            scale,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_is_character_count_based() {
        let mut backend = MonospaceTextBackend::new();
        let font = ResolvedFont {
            family: "Courier".into(),
            height: 10.0,
            flags: StyleFlags::default(),
        };
        let size = backend.measure_text("abcd", &font).unwrap();
        assert_eq!(size.width, 20.0);
        assert_eq!(size.height, 12.0);
    }

    #[test]
    fn test_injected_draw_failure() {
        let mut backend = MonospaceTextBackend::new();
        backend.fail_drawing_containing("boom");
        let font = ResolvedFont {
            family: "Courier".into(),
            height: 10.0,
            flags: StyleFlags::default(),
        };
        let rect = Rect::new(0.0, 0.0, 100.0, 12.0);
        assert!(backend
            .draw_text("ok", &font, rect, TextAlign::Left, Scale::identity())
            .is_ok());
        assert!(backend
            .draw_text("boom!", &font, rect, TextAlign::Left, Scale::identity())
            .is_err());
        assert_eq!(backend.drawn.len(), 1);
    }
}
