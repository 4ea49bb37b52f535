//! Grid table with a banded header that flows across pages.

use crate::layout::{Align, Document, MARGIN_MM, PAGE_HEIGHT_MM, Rgb, clip_to_width};

pub const HEADER_HEIGHT_MM: f32 = 8.0;
pub const ROW_HEIGHT_MM: f32 = 8.0;
const CELL_PADDING_MM: f32 = 1.8;
const FONT_SIZE: f32 = 10.0;
/// Offset from the top of a cell to the text baseline.
const BASELINE_OFFSET_MM: f32 = 5.3;

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: f32,
    pub align: Align,
}

#[derive(Debug, Clone)]
pub struct Table<'a> {
    pub x: f32,
    pub columns: &'a [Column],
    pub rows: Vec<Vec<String>>,
}

/// Where a table finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableEnd {
    pub page: usize,
    /// Bottom edge of the last drawn row.
    pub y: f32,
}

fn bottom_limit() -> f32 {
    PAGE_HEIGHT_MM - MARGIN_MM
}

impl Table<'_> {
    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Draw the table starting at `start_y` on page `start_page`.
    ///
    /// When the next row would cross the bottom margin a new page is added,
    /// the table resumes at the top margin and the header is repeated.
    pub fn draw(&self, doc: &mut Document, start_page: usize, start_y: f32) -> TableEnd {
        let mut page = start_page;
        let mut y = start_y;

        if y + HEADER_HEIGHT_MM + ROW_HEIGHT_MM > bottom_limit() {
            page = doc.add_page();
            y = MARGIN_MM;
        }
        y = self.draw_header(doc, page, y);

        for row in &self.rows {
            if y + ROW_HEIGHT_MM > bottom_limit() {
                page = doc.add_page();
                y = self.draw_header(doc, page, MARGIN_MM);
            }
            y = self.draw_row(doc, page, y, row);
        }

        TableEnd { page, y }
    }

    fn draw_header(&self, doc: &mut Document, page: usize, y: f32) -> f32 {
        let p = doc.page_mut(page);
        p.fill_rect(self.x, y, self.width(), HEADER_HEIGHT_MM, Rgb::HEADER_GREY);
        let mut x = self.x;
        for col in self.columns {
            p.stroke_rect(x, y, col.width, HEADER_HEIGHT_MM);
            let (tx, align) = text_anchor(x, col.width, col.align);
            p.text(tx, y + BASELINE_OFFSET_MM, FONT_SIZE, col.header)
                .bold()
                .align(align);
            x += col.width;
        }
        y + HEADER_HEIGHT_MM
    }

    fn draw_row(&self, doc: &mut Document, page: usize, y: f32, row: &[String]) -> f32 {
        let p = doc.page_mut(page);
        let mut x = self.x;
        for (col, cell) in self.columns.iter().zip(row) {
            p.stroke_rect(x, y, col.width, ROW_HEIGHT_MM);
            let text = clip_to_width(cell, FONT_SIZE, col.width - 2.0 * CELL_PADDING_MM);
            let (tx, align) = text_anchor(x, col.width, col.align);
            p.text(tx, y + BASELINE_OFFSET_MM, FONT_SIZE, text).align(align);
            x += col.width;
        }
        y + ROW_HEIGHT_MM
    }
}

fn text_anchor(cell_x: f32, width: f32, align: Align) -> (f32, Align) {
    match align {
        Align::Left => (cell_x + CELL_PADDING_MM, Align::Left),
        Align::Center => (cell_x + width / 2.0, Align::Center),
        Align::Right => (cell_x + width - CELL_PADDING_MM, Align::Right),
    }
}
