//! End-to-end pagination and rendering scenarios against the deterministic
//! monospace backend (char width = height/2, line height = height * 1.2).

use grid_model::{Band, MergeRegion, Orientation, PageGeometry, PaperSize, Report, Section, WrapMode};
use layout_engine::{EmulatedMeasurer, LayoutError, PageRenderer, Paginator, RecordingPainter};
use proptest::prelude::*;
use text_metrics::MonospaceTextBackend;

fn page(width: f32, height: f32) -> PageGeometry {
    PageGeometry {
        paper: PaperSize::Custom(width, height),
        orientation: Orientation::Portrait,
        margin_left: 0.0,
        margin_top: 0.0,
        margin_right: 0.0,
        margin_bottom: 0.0,
    }
}

fn one_band_report(band: Band, geometry: PageGeometry) -> Report {
    let mut section = Section::new("body").with_geometry(geometry);
    section.push_band(band);
    let mut report = Report::new("test");
    report.push_section(section);
    report
}

fn fixed_rows(rows: usize, height: f32) -> Band {
    let mut band = Band::new(rows, 1);
    for r in 0..rows {
        band.set_value(r, 0, format!("row {r}")).unwrap();
        band.set_row_height(r, Some(height));
    }
    band
}

fn measurer() -> EmulatedMeasurer<MonospaceTextBackend> {
    EmulatedMeasurer::new(MonospaceTextBackend::new())
}

#[test]
fn test_keep_with_next_end_to_end_split() {
    // Five 20-unit rows on a 45-unit page. Without pinning the fill rule
    // gives [0,1,2]/[3,4]; pinning rows 2-3 together forces [0,1]/[2,3,4].
    let mut band = fixed_rows(5, 20.0);
    band.set_keep_with_next(2, true);
    let report = one_band_report(band, page(100.0, 45.0));
    let mut metrics = measurer();
    let blocks = Paginator::paginate(&report, &mut metrics).unwrap();
    let rows: Vec<Vec<usize>> = blocks.iter().map(|b| b.rows.clone()).collect();
    assert_eq!(rows, vec![vec![0, 1], vec![2, 3, 4]]);
}

#[test]
fn test_wrapped_content_drives_row_height() {
    let mut band = Band::new(1, 1);
    band.set_column_width(0, 45.0);
    band.set_value(0, 0, "aaaa bbbb cccc").unwrap();
    let mut style = grid_model::CellStyle::default();
    style.wrap = WrapMode::WordWrap;
    band.set_style(0, 0, style).unwrap();

    let report = one_band_report(band, page(100.0, 500.0));
    let mut metrics = measurer();
    let blocks = Paginator::paginate(&report, &mut metrics).unwrap();
    assert_eq!(blocks.len(), 1);
    // 45 units / 5-unit chars = 9 chars per line -> two 12-unit lines.
    assert!((blocks[0].row_heights[0] - 24.0).abs() < 1e-3);
    assert_eq!(blocks[0].cells[0].lines, vec!["aaaa bbbb", "cccc"]);
}

#[test]
fn test_repeatable_header_leads_every_page() {
    let mut band = fixed_rows(6, 20.0);
    band.set_row_height(0, Some(10.0));
    band.set_value(0, 0, "HEADER").unwrap();
    band.set_repeatable_row(0, true);
    let report = one_band_report(band, page(100.0, 50.0));
    let mut metrics = measurer();
    let blocks = Paginator::paginate(&report, &mut metrics).unwrap();
    assert_eq!(blocks.len(), 3);
    for block in &blocks {
        assert_eq!(block.rows[0], 0, "page {} lacks the header", block.page_index);
        assert_eq!(block.cells[0].lines, vec!["HEADER"]);
    }
    // Body rows still appear exactly once overall.
    let mut body: Vec<usize> = blocks
        .iter()
        .flat_map(|b| b.rows.iter().copied())
        .filter(|&r| r != 0)
        .collect();
    body.sort_unstable();
    assert_eq!(body, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_merge_region_is_atomic_at_every_page_height() {
    // The merged rows 3-5 total 45 units; every page tall enough to hold
    // them must keep them together.
    for page_height in [46.0, 50.0, 61.0, 75.0, 90.0] {
        let mut band = fixed_rows(8, 15.0);
        band.merge(MergeRegion::new(3, 0, 3, 1)).unwrap();
        let report = one_band_report(band, page(100.0, page_height));
        let mut metrics = measurer();
        let blocks = Paginator::paginate(&report, &mut metrics).unwrap();
        for block in &blocks {
            let present: Vec<bool> = (3..6).map(|r| block.rows.contains(&r)).collect();
            assert!(
                present.iter().all(|&p| p) || present.iter().all(|&p| !p),
                "merge rows split at page height {page_height}: {present:?}"
            );
        }
    }
}

#[test]
fn test_merge_region_taller_than_short_pages_is_rejected() {
    // The same 45-unit merge region cannot be placed on pages shorter
    // than itself, no matter how the rows around it break.
    for page_height in [31.0, 40.0] {
        let mut band = fixed_rows(8, 15.0);
        band.merge(MergeRegion::new(3, 0, 3, 1)).unwrap();
        let report = one_band_report(band, page(100.0, page_height));
        let mut metrics = measurer();
        let err = Paginator::paginate(&report, &mut metrics).unwrap_err();
        assert!(
            matches!(err, LayoutError::RegionTallerThanPage { .. }),
            "page height {page_height}: unexpected error {err:?}"
        );
    }
}

#[test]
fn test_paginate_then_render_draws_every_line() {
    let mut band = Band::new(2, 2);
    band.set_column_width(0, 45.0);
    band.set_column_width(1, 60.0);
    band.set_value(0, 0, "aaaa bbbb cccc").unwrap();
    let mut style = grid_model::CellStyle::default();
    style.wrap = WrapMode::WordWrap;
    band.set_style(0, 0, style).unwrap();
    band.set_value(0, 1, "plain").unwrap();
    band.set_value(1, 0, "second").unwrap();

    let report = one_band_report(band, page(200.0, 500.0));
    let mut metrics = measurer();
    let blocks = Paginator::paginate(&report, &mut metrics).unwrap();

    let mut painter = RecordingPainter::new();
    let mut renderer = PageRenderer::new(&mut metrics, &mut painter);
    for block in &blocks {
        renderer.render_block(block);
    }

    let drawn: Vec<&str> = metrics
        .backend()
        .drawn
        .iter()
        .map(|d| d.text.as_str())
        .collect();
    for expected in ["aaaa bbbb", "cccc", "plain", "second"] {
        assert!(drawn.contains(&expected), "missing {expected:?} in {drawn:?}");
    }
}

#[test]
fn test_blocks_survive_serialization() {
    let mut band = fixed_rows(3, 20.0);
    band.merge(MergeRegion::new(0, 0, 2, 1)).unwrap();
    let report = one_band_report(band, page(100.0, 200.0));
    let mut metrics = measurer();
    let blocks = Paginator::paginate(&report, &mut metrics).unwrap();
    let json = serde_json::to_string(&blocks).unwrap();
    let back: Vec<layout_engine::PageBlock> = serde_json::from_str(&json).unwrap();
    assert_eq!(blocks, back);
}

proptest! {
    /// Pinned pairs are never separated by a page break, whatever the
    /// page height.
    #[test]
    fn prop_pinned_pair_shares_a_block(
        rows in 2usize..10,
        pin in 0usize..9,
        page_height in 25.0f32..200.0,
    ) {
        let pin = pin.min(rows - 2);
        let mut band = fixed_rows(rows, 20.0);
        band.set_keep_with_next(pin, true);
        let report = one_band_report(band, page(100.0, page_height));
        let mut metrics = measurer();
        let blocks = Paginator::paginate(&report, &mut metrics).unwrap();
        for block in &blocks {
            prop_assert_eq!(
                block.rows.contains(&pin),
                block.rows.contains(&(pin + 1)),
                "pinned pair split in {:?}", block.rows
            );
        }
    }

    /// Every row of a band is emitted exactly once (no headers involved).
    #[test]
    fn prop_no_row_is_dropped_or_duplicated(
        rows in 1usize..12,
        row_height in 5.0f32..60.0,
        page_height in 25.0f32..300.0,
    ) {
        let report = one_band_report(fixed_rows(rows, row_height), page(100.0, page_height));
        let mut metrics = measurer();
        let blocks = Paginator::paginate(&report, &mut metrics).unwrap();
        let mut seen: Vec<usize> = blocks.iter().flat_map(|b| b.rows.iter().copied()).collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..rows).collect();
        prop_assert_eq!(seen, expected);
    }
}
