//! Paginator output
//!
//! A [`PageBlock`] is one rectangular chunk of one band placed on one
//! page: the rows and column slice it covers, the resolved geometry, and
//! the fully measured cells ready to draw. Blocks are device independent
//! and serializable, so a pagination pass can be cached or shipped to a
//! remote renderer.

use grid_model::CellStyle;
use serde::{Deserialize, Serialize};
use text_metrics::Rect;

/// How far a merged anchor extends inside its block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpan {
    pub row_span: usize,
    pub col_span: usize,
}

/// One drawable cell: an anchor with its measured line split.
/// Cells covered by a merge region do not appear at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCell {
    /// Source row index in the band
    pub row: usize,
    /// Source column index in the band
    pub col: usize,
    pub style: CellStyle,
    /// Wrapped lines exactly as they will be drawn
    pub lines: Vec<String>,
    /// Fit-policy font scale (1.0 = unscaled)
    pub font_scale: f32,
    pub merge: Option<MergeSpan>,
}

/// One band chunk placed on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBlock {
    pub section_index: usize,
    pub band_index: usize,
    /// Output page number, assigned in emission order
    pub page_index: usize,
    /// Absolute placement on the page, in page units
    pub bounds: Rect,
    /// Source row indexes in top-to-bottom draw order; repeated header
    /// rows come first on continuation pages
    pub rows: Vec<usize>,
    /// Source column indexes in left-to-right draw order
    pub cols: Vec<usize>,
    /// Resolved height of each entry in `rows`
    pub row_heights: Vec<f32>,
    /// Declared width of each entry in `cols`
    pub col_widths: Vec<f32>,
    pub cells: Vec<ResolvedCell>,
}

impl PageBlock {
    /// Vertical offset of a source row within the block
    pub fn row_offset(&self, row: usize) -> Option<f32> {
        let pos = self.rows.iter().position(|&r| r == row)?;
        Some(self.row_heights[..pos].iter().sum())
    }

    /// Horizontal offset of a source column within the block
    pub fn col_offset(&self, col: usize) -> Option<f32> {
        let pos = self.cols.iter().position(|&c| c == col)?;
        Some(self.col_widths[..pos].iter().sum())
    }

    /// Absolute rectangle a cell occupies, merge span included
    pub fn cell_rect(&self, cell: &ResolvedCell) -> Option<Rect> {
        let row_pos = self.rows.iter().position(|&r| r == cell.row)?;
        let col_pos = self.cols.iter().position(|&c| c == cell.col)?;
        let (row_span, col_span) = match cell.merge {
            Some(span) => (span.row_span, span.col_span),
            None => (1, 1),
        };
        let x = self.col_offset(cell.col)?;
        let y = self.row_offset(cell.row)?;
        let width = self.col_widths[col_pos..(col_pos + col_span).min(self.col_widths.len())]
            .iter()
            .sum();
        let height = self.row_heights[row_pos..(row_pos + row_span).min(self.row_heights.len())]
            .iter()
            .sum();
        Some(Rect::new(self.bounds.x + x, self.bounds.y + y, width, height))
    }

    /// Total height of the block
    pub fn height(&self) -> f32 {
        self.row_heights.iter().sum()
    }

    /// Total width of the block
    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> PageBlock {
        PageBlock {
            section_index: 0,
            band_index: 0,
            page_index: 0,
            bounds: Rect::new(36.0, 36.0, 150.0, 50.0),
            rows: vec![0, 1],
            cols: vec![0, 1, 2],
            row_heights: vec![20.0, 30.0],
            col_widths: vec![40.0, 50.0, 60.0],
            cells: vec![ResolvedCell {
                row: 1,
                col: 1,
                style: CellStyle::default(),
                lines: vec!["x".to_string()],
                font_scale: 1.0,
                merge: Some(MergeSpan {
                    row_span: 1,
                    col_span: 2,
                }),
            }],
        }
    }

    #[test]
    fn test_cell_rect_accounts_for_merge_span() {
        let block = sample_block();
        let rect = block.cell_rect(&block.cells[0]).unwrap();
        assert_eq!(rect.x, 36.0 + 40.0);
        assert_eq!(rect.y, 36.0 + 20.0);
        assert_eq!(rect.width, 50.0 + 60.0);
        assert_eq!(rect.height, 30.0);
    }

    #[test]
    fn test_cell_rect_origin_matches_offsets() {
        let block = sample_block();
        let cell = &block.cells[0];
        let rect = block.cell_rect(cell).unwrap();
        assert_eq!(rect.x, block.bounds.x + block.col_offset(cell.col).unwrap());
        assert_eq!(rect.y, block.bounds.y + block.row_offset(cell.row).unwrap());
    }

    #[test]
    fn test_offsets_for_unknown_indexes_are_none() {
        let block = sample_block();
        assert_eq!(block.row_offset(7), None);
        assert_eq!(block.col_offset(9), None);
    }

    #[test]
    fn test_block_round_trips_through_json() {
        let block = sample_block();
        let json = serde_json::to_string(&block).unwrap();
        let back: PageBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
