//! Sections, page geometry, and the top-level report
//!
//! Page dimensions are expressed in points (1/72 inch). A section owns its
//! bands and its page geometry; the report is just an ordered list of
//! sections, each of which restarts at the top of a fresh page.

use crate::Band;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
    /// Explicit portrait width and height in points
    Custom(f32, f32),
}

impl PaperSize {
    /// Portrait (width, height) in points
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.0, 842.0),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::Custom(w, h) => (*w, *h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Paper size, orientation, and page margins for a section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_left: 36.0,
            margin_top: 36.0,
            margin_right: 36.0,
            margin_bottom: 36.0,
        }
    }
}

impl PageGeometry {
    /// Oriented page width in points
    pub fn page_width(&self) -> f32 {
        let (w, h) = self.paper.dimensions();
        match self.orientation {
            Orientation::Portrait => w,
            Orientation::Landscape => h,
        }
    }

    /// Oriented page height in points
    pub fn page_height(&self) -> f32 {
        let (w, h) = self.paper.dimensions();
        match self.orientation {
            Orientation::Portrait => h,
            Orientation::Landscape => w,
        }
    }

    /// Width available to band content after margins
    pub fn content_width(&self) -> f32 {
        (self.page_width() - self.margin_left - self.margin_right).max(0.0)
    }

    /// Height available to band content after margins
    pub fn content_height(&self) -> f32 {
        (self.page_height() - self.margin_top - self.margin_bottom).max(0.0)
    }
}

/// A run of bands laid out under one page geometry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub geometry: PageGeometry,
    pub bands: Vec<Band>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometry: PageGeometry::default(),
            bands: Vec::new(),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn push_band(&mut self, band: Band) {
        self.bands.push(band);
    }
}

/// An ordered sequence of sections; each section starts a new page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.bands.is_empty())
    }
}
