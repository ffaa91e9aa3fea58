//! Layout Engine - Word wrapping, cell measurement, pagination, and rendering
//!
//! This crate turns a band-based report from `grid_model` into a stream of
//! device-independent page blocks and paints them through a backend-agnostic
//! painter:
//!
//! - Greedy word wrapping with soft-hyphen support ([`WordWrapper`])
//! - Cell measurement through emulated font metrics ([`EmulatedMeasurer`])
//! - Streaming page splitting with merged regions, repeatable rows and
//!   columns, and keep-with-next/previous pinning ([`Paginator`])
//! - Per-cell drawing with error isolation ([`PageRenderer`])

mod error;
mod measurer;
mod page_block;
mod paginator;
mod painter;
mod word_wrap;

pub use error::*;
pub use measurer::*;
pub use page_block::*;
pub use paginator::*;
pub use painter::*;
pub use word_wrap::*;
