//! Merged cell regions
//!
//! A merge region spans a rectangle of cells; the top-left cell is the
//! anchor and supplies the value and style for the whole region. Regions
//! never overlap and are treated as atomic by pagination.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRegion {
    pub first_row: usize,
    pub first_col: usize,
    pub row_count: usize,
    pub col_count: usize,
}

impl MergeRegion {
    pub fn new(first_row: usize, first_col: usize, row_count: usize, col_count: usize) -> Self {
        Self {
            first_row,
            first_col,
            row_count,
            col_count,
        }
    }

    /// The cell whose value and style the region displays
    pub fn anchor(&self) -> (usize, usize) {
        (self.first_row, self.first_col)
    }

    pub fn last_row(&self) -> usize {
        self.first_row + self.row_count - 1
    }

    pub fn last_col(&self) -> usize {
        self.first_col + self.col_count - 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.first_row && row <= self.last_row() && col >= self.first_col && col <= self.last_col()
    }

    pub fn overlaps(&self, other: &MergeRegion) -> bool {
        self.first_row <= other.last_row()
            && other.first_row <= self.last_row()
            && self.first_col <= other.last_col()
            && other.first_col <= self.last_col()
    }

    /// True for the degenerate 1x1 region, which merges nothing
    pub fn is_single_cell(&self) -> bool {
        self.row_count == 1 && self.col_count == 1
    }
}

impl std::fmt::Display for MergeRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})..({}, {})",
            self.first_row,
            self.first_col,
            self.last_row(),
            self.last_col()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment() {
        let region = MergeRegion::new(1, 2, 2, 3);
        assert!(region.contains(1, 2));
        assert!(region.contains(2, 4));
        assert!(!region.contains(3, 2));
        assert!(!region.contains(1, 5));
    }

    #[test]
    fn test_overlap_detection() {
        let a = MergeRegion::new(0, 0, 2, 2);
        let b = MergeRegion::new(1, 1, 2, 2);
        let c = MergeRegion::new(2, 2, 1, 1);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(b.overlaps(&c));
    }
}
