//! Font requests, style flags, colors, and cache identity

use serde::{Deserialize, Serialize};

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    /// Fill used when a cell fails to render and is replaced by a marker
    pub const ERROR_RED: Color = Color { r: 220, g: 40, b: 40 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Font attribute flags (bold/italic/underline/strikeout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl StyleFlags {
    pub const BOLD_BIT: u8 = 0b0001;
    pub const ITALIC_BIT: u8 = 0b0010;
    pub const UNDERLINE_BIT: u8 = 0b0100;
    pub const STRIKEOUT_BIT: u8 = 0b1000;

    pub fn new(bold: bool, italic: bool, underline: bool, strikeout: bool) -> Self {
        Self { bold, italic, underline, strikeout }
    }

    pub fn bold() -> Self {
        Self { bold: true, ..Self::default() }
    }

    pub fn italic() -> Self {
        Self { italic: true, ..Self::default() }
    }

    /// Pack the flags into a 4-bit mask
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.bold {
            bits |= Self::BOLD_BIT;
        }
        if self.italic {
            bits |= Self::ITALIC_BIT;
        }
        if self.underline {
            bits |= Self::UNDERLINE_BIT;
        }
        if self.strikeout {
            bits |= Self::STRIKEOUT_BIT;
        }
        bits
    }

    pub fn from_bits(bits: u8) -> Self {
        Self {
            bold: bits & Self::BOLD_BIT != 0,
            italic: bits & Self::ITALIC_BIT != 0,
            underline: bits & Self::UNDERLINE_BIT != 0,
            strikeout: bits & Self::STRIKEOUT_BIT != 0,
        }
    }

    /// Number of set attributes
    pub fn count(&self) -> u32 {
        self.bits().count_ones()
    }

    /// Copy of these flags with the masked attributes flipped
    pub fn toggled(&self, mask: u8) -> Self {
        Self::from_bits(self.bits() ^ mask)
    }
}

/// Horizontal text alignment within a draw rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A font as requested by a style, including emulated metrics.
///
/// `width` and `line_height` of zero mean "use the native default";
/// `width_percent` of 100 leaves the native width untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRequest {
    pub family: String,
    pub height: f32,
    pub width: f32,
    pub width_percent: f32,
    pub line_height: f32,
    pub flags: StyleFlags,
    pub color: Color,
}

impl FontRequest {
    pub fn new(family: impl Into<String>, height: f32) -> Self {
        Self {
            family: family.into(),
            height,
            width: 0.0,
            width_percent: 100.0,
            line_height: 0.0,
            flags: StyleFlags::default(),
            color: Color::BLACK,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// Cache identity for a metrics/renderer instance.
///
/// Float fields are keyed by their bit patterns so the key is hashable;
/// two requests hash alike exactly when every metric matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub family: String,
    pub height_bits: u32,
    pub line_height_bits: u32,
    pub width_bits: u32,
    pub width_percent_bits: u32,
    pub flags: u8,
    pub wrap: bool,
    pub color: Color,
}

impl FontKey {
    pub fn new(request: &FontRequest, wrap: bool) -> Self {
        Self {
            family: request.family.clone(),
            height_bits: request.height.to_bits(),
            line_height_bits: request.line_height.to_bits(),
            width_bits: request.width.to_bits(),
            width_percent_bits: request.width_percent.to_bits(),
            flags: request.flags.bits(),
            wrap,
            color: request.color,
        }
    }
}

/// The concrete font a native backend actually draws with, after the
/// style fallback ladder has run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFont {
    pub family: String,
    pub height: f32,
    pub flags: StyleFlags,
}
