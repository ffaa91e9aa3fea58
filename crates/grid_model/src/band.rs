//! Bands: rectangular grids of cells
//!
//! A band is the unit a section is built from and the unit the paginator
//! consumes. [`Band`] is the concrete in-memory implementation; layout code
//! only sees the [`GridSource`] trait, so reports can also stream cells out
//! of a database cursor or any other backing store.

use crate::{CellStyle, CellValue, GridError, MergeRegion, Result};
use serde::{Deserialize, Serialize};

/// One cell: a value plus the style it is rendered with
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>, style: CellStyle) -> Self {
        Self {
            value: value.into(),
            style,
        }
    }

    pub fn text(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            style: CellStyle::default(),
        }
    }
}

/// Read-only view of a band that the layout engine consumes
pub trait GridSource {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// The cell at (row, col); covered cells of a merge region still return
    /// their own entry, but only the anchor's content is displayed
    fn cell_at(&self, row: usize, col: usize) -> &Cell;

    /// The merge region covering (row, col), if any
    fn merge_region_at(&self, row: usize, col: usize) -> Option<MergeRegion>;

    /// Width of a column in page units
    fn column_width(&self, col: usize) -> f32;

    /// Explicit row height, or `None` for content-driven sizing
    fn row_height(&self, row: usize) -> Option<f32>;

    /// Repeatable rows are re-emitted at the top of every page chunk
    fn is_repeatable_row(&self, row: usize) -> bool;

    /// Repeatable columns are re-emitted at the left of every column slice
    fn is_repeatable_column(&self, col: usize) -> bool;

    /// Row must land on the same page as the row after it
    fn keep_with_next(&self, row: usize) -> bool;

    /// Row must land on the same page as the row before it
    fn keep_with_previous(&self, row: usize) -> bool;
}

/// In-memory band with row-major cell storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Band {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    col_widths: Vec<f32>,
    row_heights: Vec<Option<f32>>,
    merges: Vec<MergeRegion>,
    repeatable_rows: Vec<bool>,
    repeatable_cols: Vec<bool>,
    keep_next: Vec<bool>,
    keep_prev: Vec<bool>,
}

pub const DEFAULT_COLUMN_WIDTH: f32 = 64.0;

impl Band {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            col_widths: vec![DEFAULT_COLUMN_WIDTH; cols],
            row_heights: vec![None; rows],
            merges: Vec::new(),
            repeatable_rows: vec![false; rows],
            repeatable_cols: vec![false; cols],
            keep_next: vec![false; rows],
            keep_prev: vec![false; rows],
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: impl Into<CellValue>) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx].value = value.into();
        Ok(())
    }

    pub fn set_style(&mut self, row: usize, col: usize, style: CellStyle) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx].style = style;
        Ok(())
    }

    pub fn set_column_width(&mut self, col: usize, width: f32) {
        if col < self.cols {
            self.col_widths[col] = width;
        }
    }

    /// Fix a row height; `None` returns the row to content-driven sizing
    pub fn set_row_height(&mut self, row: usize, height: Option<f32>) {
        if row < self.rows {
            self.row_heights[row] = height;
        }
    }

    pub fn set_repeatable_row(&mut self, row: usize, repeatable: bool) {
        if row < self.rows {
            self.repeatable_rows[row] = repeatable;
        }
    }

    pub fn set_repeatable_column(&mut self, col: usize, repeatable: bool) {
        if col < self.cols {
            self.repeatable_cols[col] = repeatable;
        }
    }

    pub fn set_keep_with_next(&mut self, row: usize, keep: bool) {
        if row < self.rows {
            self.keep_next[row] = keep;
        }
    }

    pub fn set_keep_with_previous(&mut self, row: usize, keep: bool) {
        if row < self.rows {
            self.keep_prev[row] = keep;
        }
    }

    /// Add a merge region after validating bounds and overlap
    pub fn merge(&mut self, region: MergeRegion) -> Result<()> {
        if region.row_count == 0 || region.col_count == 0 {
            return Err(GridError::InvalidRegion(format!(
                "{region} has a zero extent"
            )));
        }
        if region.last_row() >= self.rows || region.last_col() >= self.cols {
            return Err(GridError::InvalidRegion(format!(
                "{region} does not fit a {}x{} band",
                self.rows, self.cols
            )));
        }
        if region.is_single_cell() {
            return Ok(());
        }
        for existing in &self.merges {
            if existing.overlaps(&region) {
                return Err(GridError::OverlappingMerge(region.to_string()));
            }
        }
        self.merges.push(region);
        Ok(())
    }

    pub fn merge_regions(&self) -> &[MergeRegion] {
        &self.merges
    }

    /// Total width of all columns in page units
    pub fn total_width(&self) -> f32 {
        self.col_widths.iter().sum()
    }
}

impl GridSource for Band {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn cell_at(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    fn merge_region_at(&self, row: usize, col: usize) -> Option<MergeRegion> {
        self.merges.iter().copied().find(|r| r.contains(row, col))
    }

    fn column_width(&self, col: usize) -> f32 {
        self.col_widths[col]
    }

    fn row_height(&self, row: usize) -> Option<f32> {
        self.row_heights[row]
    }

    fn is_repeatable_row(&self, row: usize) -> bool {
        self.repeatable_rows[row]
    }

    fn is_repeatable_column(&self, col: usize) -> bool {
        self.repeatable_cols[col]
    }

    fn keep_with_next(&self, row: usize) -> bool {
        self.keep_next[row]
    }

    fn keep_with_previous(&self, row: usize) -> bool {
        self.keep_prev[row]
    }
}
