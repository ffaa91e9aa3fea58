//! Grid Model - Abstract document model for band-based reports
//!
//! A report is a sequence of sections sharing one page geometry; each
//! section holds ordered bands, and a band is a rectangular grid of styled
//! cells with optional merged regions, repeatable header rows/columns, and
//! keep-with-next/previous row pinning. The model is read-only during a
//! pagination pass and is consumed through the [`GridSource`] trait.

mod band;
mod error;
mod merge;
mod section;
mod style;
mod value;

pub use band::*;
pub use error::*;
pub use merge::*;
pub use section::*;
pub use style::*;
pub use value::*;
