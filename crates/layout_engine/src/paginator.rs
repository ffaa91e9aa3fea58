//! Streaming pagination
//!
//! Walks a report section by section, band by band, and slices each band
//! into [`PageBlock`]s. Vertical splitting honours atomic row groups
//! (keep-with-next/previous chains and merged regions), repeatable header
//! rows, and the fill rule below; horizontal splitting produces column
//! slices with repeatable columns re-emitted on every slice after the
//! first.
//!
//! Fill rule: a single row starts on the current page while any vertical
//! space remains, so the closing row of a page may overrun the boundary
//! rather than be dropped; an atomic multi-row group must fit whole in the
//! remaining space or it moves to the next page. A single row taller than
//! a page gets a page of its own, never truncated. A merged region taller
//! than one full page cannot be placed at all and is reported as an error.
//!
//! The paginator is an iterator and yields after every block, so a caller
//! can abandon a long run between blocks.

use crate::{
    CellMeasurement, LayoutError, MergeSpan, PageBlock, ResolvedCell, Result, TextMetricsProvider,
};
use grid_model::{Band, FitPolicy, GridSource, PageGeometry, Report};
use std::collections::{HashMap, VecDeque};

const EPS: f32 = 1e-3;

/// A maximal run of rows that page breaks may not split
#[derive(Debug, Clone, Copy)]
struct RowGroup {
    start: usize,
    end: usize,
}

impl RowGroup {
    fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Streaming page-block producer over a whole report
pub struct Paginator<'a, P: TextMetricsProvider> {
    report: &'a Report,
    metrics: &'a mut P,
    section_index: usize,
    band_index: usize,
    pending: VecDeque<PageBlock>,
    page_index: usize,
    /// Vertical space already consumed on the current page
    page_used: f32,
    /// Whether the next band may continue on the current page
    page_open: bool,
    failed: bool,
}

impl<'a, P: TextMetricsProvider> Paginator<'a, P> {
    pub fn new(report: &'a Report, metrics: &'a mut P) -> Self {
        Self {
            report,
            metrics,
            section_index: 0,
            band_index: 0,
            pending: VecDeque::new(),
            page_index: 0,
            page_used: 0.0,
            page_open: false,
            failed: false,
        }
    }

    /// Run the whole report and collect every block
    pub fn paginate(report: &'a Report, metrics: &'a mut P) -> Result<Vec<PageBlock>> {
        Paginator::new(report, metrics).collect()
    }

    fn layout_band(
        &mut self,
        section_index: usize,
        band_index: usize,
        band: &Band,
        geometry: &PageGeometry,
    ) -> Result<()> {
        let content_w = geometry.content_width();
        let content_h = geometry.content_height();
        if content_w <= 0.0 || content_h <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "content area is {content_w}x{content_h}"
            )));
        }

        let rows = band.rows();
        let cols = band.cols();
        let col_widths: Vec<f32> = (0..cols).map(|c| band.column_width(c)).collect();

        let slices = self.column_slices(band, &col_widths, content_w);
        let single_slice = slices.len() == 1;

        let mut measurements: HashMap<(usize, usize), CellMeasurement> = HashMap::new();
        let row_heights = self.resolve_row_heights(band, &col_widths, &mut measurements);

        // Atomic groups: keep-with chains and vertically merged spans.
        let mut joined = vec![false; rows.saturating_sub(1)];
        for i in 0..rows.saturating_sub(1) {
            if band.keep_with_next(i) || band.keep_with_previous(i + 1) {
                joined[i] = true;
            }
        }
        for region in band.merge_regions() {
            for r in region.first_row..region.last_row() {
                joined[r] = true;
            }
        }
        let mut groups = Vec::new();
        let mut start = 0;
        for (i, &j) in joined.iter().enumerate() {
            if !j {
                groups.push(RowGroup { start, end: i });
                start = i + 1;
            }
        }
        groups.push(RowGroup {
            start,
            end: rows - 1,
        });

        let mut header_rows: Vec<usize> =
            (0..rows).filter(|&r| band.is_repeatable_row(r)).collect();
        let header_height: f32 = header_rows.iter().map(|&r| row_heights[r]).sum();
        if !header_rows.is_empty() && header_height >= content_h {
            tracing::warn!(
                header_height,
                page_height = content_h,
                "repeatable rows fill the whole page, skipping repetition"
            );
            header_rows.clear();
        }
        let header_height: f32 = header_rows.iter().map(|&r| row_heights[r]).sum();

        // Vertical fill.
        let mut continuing = self.page_open
            && single_slice
            && self.page_used > 0.0
            && self.page_used < content_h - EPS;
        let mut available = content_h - if continuing { self.page_used } else { 0.0 };
        let mut chunks: Vec<Vec<usize>> = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut used = 0.0f32;
        let mut gi = 0;
        while gi < groups.len() {
            let group = groups[gi];
            let height: f32 = row_heights[group.start..=group.end].iter().sum();
            let fits = if group.end > group.start {
                used + height <= available + EPS
            } else {
                used < available - EPS
            };
            if fits {
                current.extend(group.rows());
                used += height;
                gi += 1;
                continue;
            }
            if !current.is_empty() {
                tracing::debug!(
                    band = band_index,
                    first_row = group.start,
                    "page break before row group"
                );
                chunks.push(std::mem::take(&mut current));
                used = 0.0;
                available = content_h - header_height;
                continue;
            }
            if continuing && chunks.is_empty() {
                // Nothing fits in the leftover space; restart the band on
                // a fresh page.
                continuing = false;
                available = content_h;
                continue;
            }
            // A multi-row group alone on a full fresh page and still too
            // tall. Merged regions cannot be split, so an oversized one is
            // a configuration error; an oversized pinned chain is placed
            // anyway and overruns.
            for region in band.merge_regions() {
                if region.row_count <= 1
                    || region.last_row() < group.start
                    || region.first_row > group.end
                {
                    continue;
                }
                let span: f32 = row_heights[region.first_row..=region.last_row()].iter().sum();
                if span > content_h + EPS {
                    return Err(LayoutError::RegionTallerThanPage {
                        region: region.to_string(),
                        height: span,
                        page: content_h,
                    });
                }
            }
            tracing::warn!(
                first_row = group.start,
                last_row = group.end,
                height,
                page_height = available,
                "pinned row group taller than a page, placing it anyway"
            );
            current.extend(group.rows());
            used += height;
            gi += 1;
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        // Emit one block per (vertical chunk, column slice).
        for (ci, body) in chunks.iter().enumerate() {
            let headers: Vec<usize> = if ci == 0 {
                Vec::new()
            } else {
                header_rows
                    .iter()
                    .copied()
                    .filter(|&h| h < body[0] && !body.contains(&h))
                    .collect()
            };
            let chunk_rows: Vec<usize> = headers.iter().chain(body.iter()).copied().collect();
            let chunk_height: f32 = chunk_rows.iter().map(|&r| row_heights[r]).sum();

            let cont = ci == 0 && continuing;
            if !cont && self.page_used > 0.0 {
                self.page_index += 1;
                self.page_used = 0.0;
            }
            let y = geometry.margin_top + if cont { self.page_used } else { 0.0 };

            for (si, slice) in slices.iter().enumerate() {
                let slice_width: f32 = slice.iter().map(|&c| col_widths[c]).sum();
                let mut cells = Vec::new();
                for &r in &chunk_rows {
                    for &c in slice {
                        if let Some(cell) = self.resolve_cell(
                            band,
                            r,
                            c,
                            &col_widths,
                            &row_heights,
                            &mut measurements,
                        ) {
                            cells.push(cell);
                        }
                    }
                }
                self.pending.push_back(PageBlock {
                    section_index,
                    band_index,
                    page_index: self.page_index,
                    bounds: text_metrics::Rect::new(
                        geometry.margin_left,
                        y,
                        slice_width,
                        chunk_height,
                    ),
                    rows: chunk_rows.clone(),
                    cols: slice.clone(),
                    row_heights: chunk_rows.iter().map(|&r| row_heights[r]).collect(),
                    col_widths: slice.iter().map(|&c| col_widths[c]).collect(),
                    cells,
                });
                if si + 1 < slices.len() {
                    self.page_index += 1;
                }
            }

            if single_slice {
                self.page_used = if cont { self.page_used + chunk_height } else { chunk_height };
                self.page_open = true;
            } else {
                self.page_index += 1;
                self.page_used = 0.0;
                self.page_open = false;
            }
        }
        Ok(())
    }

    /// Greedy column slicing with merged col-spans atomic and repeatable
    /// columns prefixed to every slice after the first
    fn column_slices(&self, band: &Band, col_widths: &[f32], content_w: f32) -> Vec<Vec<usize>> {
        let cols = col_widths.len();
        // Common case: the whole band fits across one page.
        if band.total_width() <= content_w + EPS {
            return vec![(0..cols).collect()];
        }

        let mut break_before = vec![true; cols];
        for region in band.merge_regions() {
            for c in region.first_col + 1..=region.last_col() {
                break_before[c] = false;
            }
        }

        let mut repeat_cols: Vec<usize> =
            (0..cols).filter(|&c| band.is_repeatable_column(c)).collect();
        let mut repeat_width: f32 = repeat_cols.iter().map(|&c| col_widths[c]).sum();
        if repeat_width >= content_w {
            tracing::warn!(
                repeat_width,
                page_width = content_w,
                "repeatable columns fill the whole page, skipping repetition"
            );
            repeat_cols.clear();
            repeat_width = 0.0;
        }

        let mut col_groups: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for (c, &brk) in break_before.iter().enumerate().skip(1) {
            if brk {
                col_groups.push((start, c - 1));
                start = c;
            }
        }
        col_groups.push((start, cols - 1));

        let mut slices: Vec<Vec<usize>> = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut current_w = 0.0;
        for (s, e) in col_groups {
            let group_w: f32 = (s..=e).map(|c| col_widths[c]).sum();
            let budget = if slices.is_empty() {
                content_w
            } else {
                content_w - repeat_width
            };
            if !current.is_empty() && current_w + group_w > budget + EPS {
                tracing::debug!(first_col = s, "column break before merge-atomic group");
                slices.push(std::mem::take(&mut current));
                current_w = 0.0;
            }
            current.extend(s..=e);
            current_w += group_w;
        }
        if !current.is_empty() {
            slices.push(current);
        }

        for slice in slices.iter_mut().skip(1) {
            let prefix: Vec<usize> = repeat_cols
                .iter()
                .copied()
                .filter(|c| !slice.contains(c))
                .collect();
            slice.splice(0..0, prefix);
        }
        slices
    }

    /// Two-pass row sizing: explicit heights as declared, auto heights from
    /// content, then vertically merged anchors add any deficit to the last
    /// auto row they span
    fn resolve_row_heights(
        &mut self,
        band: &Band,
        col_widths: &[f32],
        measurements: &mut HashMap<(usize, usize), CellMeasurement>,
    ) -> Vec<f32> {
        let rows = band.rows();
        let cols = band.cols();
        let mut row_heights = Vec::with_capacity(rows);
        for r in 0..rows {
            if let Some(h) = band.row_height(r) {
                row_heights.push(h);
                continue;
            }
            let mut height = 0.0f32;
            for c in 0..cols {
                match band.merge_region_at(r, c) {
                    Some(region) => {
                        // Multi-row regions contribute in the deficit pass.
                        if region.anchor() == (r, c) && region.row_count == 1 {
                            let width: f32 = (region.first_col..=region.last_col())
                                .map(|c| col_widths[c])
                                .sum();
                            let m = self.metrics.wanted_height(band.cell_at(r, c), width);
                            height = height.max(m.height);
                            measurements.insert((r, c), m);
                        }
                    }
                    None => {
                        let m = self.metrics.wanted_height(band.cell_at(r, c), col_widths[c]);
                        height = height.max(m.height);
                        measurements.insert((r, c), m);
                    }
                }
            }
            row_heights.push(height);
        }
        let explicit: Vec<bool> = (0..rows).map(|r| band.row_height(r).is_some()).collect();

        for region in band.merge_regions() {
            if region.row_count <= 1 {
                continue;
            }
            let (ar, ac) = region.anchor();
            let width: f32 = (region.first_col..=region.last_col())
                .map(|c| col_widths[c])
                .sum();
            let m = self.metrics.wanted_height(band.cell_at(ar, ac), width);
            let span: f32 = row_heights[region.first_row..=region.last_row()].iter().sum();
            if m.height > span {
                let deficit = m.height - span;
                let target = (region.first_row..=region.last_row())
                    .rev()
                    .find(|&r| !explicit[r])
                    .unwrap_or(region.last_row());
                row_heights[target] += deficit;
            }
            measurements.insert((ar, ac), m);
        }
        row_heights
    }

    /// Resolve one drawable cell, or `None` for merge-covered positions
    fn resolve_cell(
        &mut self,
        band: &Band,
        row: usize,
        col: usize,
        col_widths: &[f32],
        row_heights: &[f32],
        measurements: &mut HashMap<(usize, usize), CellMeasurement>,
    ) -> Option<ResolvedCell> {
        let (width, height, merge) = match band.merge_region_at(row, col) {
            Some(region) => {
                if region.anchor() != (row, col) {
                    return None;
                }
                let width: f32 = (region.first_col..=region.last_col())
                    .map(|c| col_widths[c])
                    .sum();
                let height: f32 = row_heights[region.first_row..=region.last_row()].iter().sum();
                (
                    width,
                    height,
                    Some(MergeSpan {
                        row_span: region.row_count,
                        col_span: region.col_count,
                    }),
                )
            }
            None => (col_widths[col], row_heights[row], None),
        };

        let cell = band.cell_at(row, col);
        let measurement = if cell.style.fit != FitPolicy::None {
            self.metrics.fit_to_height(cell, width, height)
        } else if let Some(m) = measurements.get(&(row, col)) {
            m.clone()
        } else {
            let m = self.metrics.wanted_height(cell, width);
            measurements.insert((row, col), m.clone());
            m
        };

        Some(ResolvedCell {
            row,
            col,
            style: cell.style.clone(),
            lines: measurement.lines,
            font_scale: measurement.font_scale,
            merge,
        })
    }
}

impl<'a, P: TextMetricsProvider> Iterator for Paginator<'a, P> {
    type Item = Result<PageBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(block) = self.pending.pop_front() {
                return Some(Ok(block));
            }
            let report = self.report;
            let section = report.sections.get(self.section_index)?;
            if self.band_index >= section.bands.len() {
                // Sections never share a page.
                if self.page_used > 0.0 {
                    self.page_index += 1;
                    self.page_used = 0.0;
                }
                self.page_open = false;
                self.section_index += 1;
                self.band_index = 0;
                continue;
            }
            let band = &section.bands[self.band_index];
            let band_index = self.band_index;
            self.band_index += 1;
            if band.rows() == 0 || band.cols() == 0 {
                continue;
            }
            if let Err(e) =
                self.layout_band(self.section_index, band_index, band, &section.geometry)
            {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }
}

impl<'a, P: TextMetricsProvider> std::iter::FusedIterator for Paginator<'a, P> {}
