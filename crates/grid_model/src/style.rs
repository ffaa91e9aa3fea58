//! Cell appearance: fonts, alignment, wrapping, fit policy, and borders

use serde::{Deserialize, Serialize};
use text_metrics::{Color, FontRequest, StyleFlags, TextAlign};

/// How cell text reacts to running out of horizontal space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Single line, clipped by the cell rectangle
    #[default]
    NoWrap,
    /// Greedy word wrap within the available width
    WordWrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// How cell text reacts to running out of vertical space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitPolicy {
    /// Draw at the requested size and let tall content clip
    #[default]
    None,
    /// Step the font down until the text fits the row height
    Shrink,
    /// Step the font up while the text still fits the row height
    Enlarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// One edge of a cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderLine {
    pub width: f32,
    pub color: Color,
    pub style: BorderStyle,
}

impl BorderLine {
    pub fn hairline() -> Self {
        Self {
            width: 0.5,
            color: Color::BLACK,
            style: BorderStyle::Solid,
        }
    }
}

/// Inner padding between the cell border and its text, in page units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Full visual description of one cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub font_family: String,
    /// Requested font height in page units
    pub font_height: f32,
    /// Emulated character width; 0 keeps the face's natural width
    pub font_width: f32,
    /// Natural-width percentage applied when `font_width` is 0
    pub font_width_percent: f32,
    /// Requested line advance; 0 keeps the face's natural line height
    pub line_height: f32,
    pub flags: StyleFlags,
    pub text_color: Color,
    pub fill_color: Option<Color>,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub wrap: WrapMode,
    pub fit: FitPolicy,
    /// Indent in character widths, applied on the alignment edge
    pub indent: u16,
    pub margins: Margins,
    pub borders: [Option<BorderLine>; 4],
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_height: 10.0,
            font_width: 0.0,
            font_width_percent: 100.0,
            line_height: 0.0,
            flags: StyleFlags::default(),
            text_color: Color::BLACK,
            fill_color: None,
            align: TextAlign::Left,
            vertical_align: VerticalAlign::Top,
            wrap: WrapMode::NoWrap,
            fit: FitPolicy::None,
            indent: 0,
            margins: Margins::default(),
            borders: [None; 4],
        }
    }
}

impl CellStyle {
    /// The font the measurement layer should resolve for this style
    pub fn font_request(&self) -> FontRequest {
        FontRequest {
            family: self.font_family.clone(),
            height: self.font_height,
            width: self.font_width,
            width_percent: self.font_width_percent,
            line_height: self.line_height,
            flags: self.flags,
            color: self.text_color,
        }
    }

    pub fn border(&self, edge: Edge) -> Option<&BorderLine> {
        self.borders[edge_index(edge)].as_ref()
    }

    pub fn set_border(&mut self, edge: Edge, line: Option<BorderLine>) {
        self.borders[edge_index(edge)] = line;
    }

    pub fn boxed(mut self, line: BorderLine) -> Self {
        self.borders = [Some(line); 4];
        self
    }
}

fn edge_index(edge: Edge) -> usize {
    match edge {
        Edge::Top => 0,
        Edge::Bottom => 1,
        Edge::Left => 2,
        Edge::Right => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_request_carries_style() {
        let style = CellStyle {
            font_family: "Georgia".into(),
            font_height: 12.0,
            flags: StyleFlags::bold(),
            ..CellStyle::default()
        };
        let request = style.font_request();
        assert_eq!(request.family, "Georgia");
        assert_eq!(request.height, 12.0);
        assert!(request.flags.bold);
    }

    #[test]
    fn test_border_edges_are_independent() {
        let mut style = CellStyle::default();
        style.set_border(Edge::Bottom, Some(BorderLine::hairline()));
        assert!(style.border(Edge::Bottom).is_some());
        assert!(style.border(Edge::Top).is_none());
        assert!(style.border(Edge::Left).is_none());
    }

    #[test]
    fn test_style_round_trips_through_json() {
        let style = CellStyle::default().boxed(BorderLine::hairline());
        let json = serde_json::to_string(&style).unwrap();
        let back: CellStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(style, back);
    }
}
