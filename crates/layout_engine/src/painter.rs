//! Block rendering
//!
//! [`PagePainter`] is the non-text half of the output contract: rectangle
//! fills and border lines. Text goes through the `NativeTextBackend` inside
//! the measurer, so drawn text is routed through the same emulated metrics
//! that pagination measured with.
//!
//! [`PageRenderer`] walks a [`PageBlock`] in reading order. A failure while
//! drawing one cell never aborts the page: the cell is painted as a red
//! error marker with a diagnostic line and rendering moves on.

use crate::{PageBlock, ResolvedCell};
use grid_model::{BorderLine, CellStyle, Edge, VerticalAlign};
use text_metrics::{Color, NativeTextBackend, Rect, TextAlign};

use crate::EmulatedMeasurer;

/// Geometry-only paint surface for fills and borders
pub trait PagePainter {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> text_metrics::Result<()>;

    fn draw_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        line: &BorderLine,
    ) -> text_metrics::Result<()>;
}

/// Draws paginated blocks onto a painter + text backend pair
pub struct PageRenderer<'a, B: NativeTextBackend, P: PagePainter> {
    measurer: &'a mut EmulatedMeasurer<B>,
    painter: &'a mut P,
}

impl<'a, B: NativeTextBackend, P: PagePainter> PageRenderer<'a, B, P> {
    pub fn new(measurer: &'a mut EmulatedMeasurer<B>, painter: &'a mut P) -> Self {
        Self { measurer, painter }
    }

    /// Render every cell of a block. Never fails; per-cell errors degrade
    /// to an inline marker so the rest of the page still comes out.
    pub fn render_block(&mut self, block: &PageBlock) {
        for cell in &block.cells {
            let Some(rect) = block.cell_rect(cell) else {
                continue;
            };
            if let Err(e) = self.render_cell(cell, rect) {
                tracing::warn!(
                    row = cell.row,
                    col = cell.col,
                    error = %e,
                    "cell failed to render, painting error marker"
                );
                self.paint_error_marker(rect, &e);
            }
        }
    }

    fn render_cell(&mut self, cell: &ResolvedCell, rect: Rect) -> text_metrics::Result<()> {
        let style = &cell.style;
        if let Some(fill) = style.fill_color {
            self.painter.fill_rect(rect, fill)?;
        }
        self.render_text(cell, rect)?;
        self.render_borders(style, rect)?;
        Ok(())
    }

    fn render_text(&mut self, cell: &ResolvedCell, rect: Rect) -> text_metrics::Result<()> {
        if cell.lines.iter().all(|l| l.is_empty()) {
            return Ok(());
        }
        let style = &cell.style;
        let margins = &style.margins;
        let mut inner = Rect::new(
            rect.x + margins.left,
            rect.y + margins.top,
            (rect.width - margins.horizontal()).max(0.0),
            (rect.height - margins.vertical()).max(0.0),
        );

        // Indent moves the text in from its alignment edge; centered text
        // has no edge to move from.
        let indent = self.measurer.indent_offset(style, cell.font_scale);
        match style.align {
            TextAlign::Left => {
                inner.x += indent;
                inner.width = (inner.width - indent).max(0.0);
            }
            TextAlign::Right => {
                inner.width = (inner.width - indent).max(0.0);
            }
            TextAlign::Center => {}
        }

        let advance = self.measurer.line_advance(style, cell.font_scale);
        let text_height = advance * cell.lines.len() as f32;
        let mut y = match style.vertical_align {
            VerticalAlign::Top => inner.y,
            VerticalAlign::Middle => inner.y + ((inner.height - text_height) / 2.0).max(0.0),
            VerticalAlign::Bottom => inner.y + (inner.height - text_height).max(0.0),
        };

        for line in &cell.lines {
            if !line.is_empty() {
                let line_rect = Rect::new(inner.x, y, inner.width, advance);
                self.measurer
                    .draw_line(style, cell.font_scale, line, line_rect, style.align)?;
            }
            y += advance;
        }
        Ok(())
    }

    fn render_borders(&mut self, style: &CellStyle, rect: Rect) -> text_metrics::Result<()> {
        for edge in Edge::ALL {
            let Some(line) = style.border(edge) else {
                continue;
            };
            let (from, to) = match edge {
                Edge::Top => ((rect.x, rect.y), (rect.right(), rect.y)),
                Edge::Bottom => ((rect.x, rect.bottom()), (rect.right(), rect.bottom())),
                Edge::Left => ((rect.x, rect.y), (rect.x, rect.bottom())),
                Edge::Right => ((rect.right(), rect.y), (rect.right(), rect.bottom())),
            };
            self.painter.draw_line(from, to, line)?;
        }
        Ok(())
    }

    fn paint_error_marker(&mut self, rect: Rect, error: &text_metrics::TextMetricsError) {
        if let Err(e) = self.painter.fill_rect(rect, Color::ERROR_RED) {
            tracing::debug!(error = %e, "error marker fill failed");
            return;
        }
        let diagnostic = format!("render error: {error}");
        let style = CellStyle::default();
        if let Err(e) = self
            .measurer
            .draw_line(&style, 1.0, &diagnostic, rect, TextAlign::Left)
        {
            tracing::debug!(error = %e, "error marker text failed");
        }
    }
}

/// Journal-backed painter for tests and dry runs
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub fills: Vec<(Rect, Color)>,
    pub lines: Vec<((f32, f32), (f32, f32), BorderLine)>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PagePainter for RecordingPainter {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> text_metrics::Result<()> {
        self.fills.push((rect, color));
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        line: &BorderLine,
    ) -> text_metrics::Result<()> {
        self.lines.push((from, to, *line));
        Ok(())
    }
}
