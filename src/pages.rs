//! Page sequencing in row-major order.

use crate::layout::PosterLayout;
use crate::source::SourceImage;
use crate::tile::{compute_tile, Rect, TileMapping};
use serde::Serialize;
use std::iter::FusedIterator;

/// Everything a renderer needs to produce one printed sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDescriptor {
    /// 1-based, `row * cols + col + 1`.
    pub page_number: usize,
    pub row: u32,
    pub col: u32,
    pub source_crop: Rect,
    pub dest_draw: Rect,
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    pub caption: String,
}

impl PageDescriptor {
    pub fn tile(&self) -> TileMapping {
        TileMapping {
            row: self.row,
            col: self.col,
            source_crop: self.source_crop,
            dest_draw: self.dest_draw,
        }
    }
}

/// Caption printed at the bottom of each sheet. Row and column are 1-based.
pub fn caption(page_number: usize, page_count: usize, row: u32, col: u32) -> String {
    format!("Page {page_number}/{page_count} - Row {}, Col {}", row + 1, col + 1)
}

/// Lazy row-major page sequence. Clone it to restart from the same point.
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    layout: &'a PosterLayout,
    source: SourceImage,
    next: usize,
    end: usize,
}

pub fn generate_pages<'a>(layout: &'a PosterLayout, source: &SourceImage) -> Pages<'a> {
    Pages { layout, source: *source, next: 0, end: layout.page_count() }
}

impl<'a> Pages<'a> {
    pub fn layout(&self) -> &'a PosterLayout {
        self.layout
    }

    /// Descriptor for a single cell, independent of iteration state.
    pub fn page(&self, row: u32, col: u32) -> PageDescriptor {
        let tile = compute_tile(self.layout, &self.source, row, col);
        let cols = self.layout.grid.cols as usize;
        let page_number = row as usize * cols + col as usize + 1;
        PageDescriptor {
            page_number,
            row,
            col,
            source_crop: tile.source_crop,
            dest_draw: tile.dest_draw,
            sheet_width_mm: self.layout.sheet_width_mm,
            sheet_height_mm: self.layout.sheet_height_mm,
            caption: caption(page_number, self.layout.page_count(), row, col),
        }
    }

    fn page_at(&self, index: usize) -> PageDescriptor {
        let cols = self.layout.grid.cols as usize;
        self.page((index / cols) as u32, (index % cols) as u32)
    }
}

impl Iterator for Pages<'_> {
    type Item = PageDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let page = self.page_at(self.next);
        self.next += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }
}

impl ExactSizeIterator for Pages<'_> {}

impl FusedIterator for Pages<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, GridShape};
    use crate::paper::{Orientation, PaperSize};

    fn layout(rows: u32, cols: u32, source: &SourceImage) -> PosterLayout {
        compute_layout(
            PaperSize::A4,
            Orientation::Portrait,
            GridShape::new(rows, cols).unwrap(),
            source.aspect_ratio(),
        )
    }

    #[test]
    fn single_column_yields_three_pages_in_order() {
        let source = SourceImage::new(400, 1200).unwrap();
        let layout = layout(3, 1, &source);
        let pages: Vec<_> = generate_pages(&layout, &source).collect();

        assert_eq!(pages.len(), 3);
        let cells: Vec<_> = pages.iter().map(|p| (p.page_number, p.row, p.col)).collect();
        assert_eq!(cells, vec![(1, 0, 0), (2, 1, 0), (3, 2, 0)]);
    }

    #[test]
    fn order_is_row_major() {
        let source = SourceImage::new(900, 600).unwrap();
        let layout = layout(2, 3, &source);
        let cells: Vec<_> = generate_pages(&layout, &source).map(|p| (p.row, p.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn caption_uses_one_based_positions() {
        let source = SourceImage::new(900, 600).unwrap();
        let layout = layout(2, 3, &source);
        let page = generate_pages(&layout, &source).page(1, 2);
        assert_eq!(page.page_number, 6);
        assert_eq!(page.caption, "Page 6/6 - Row 2, Col 3");
    }

    #[test]
    fn sequence_is_restartable_and_exact_sized() {
        let source = SourceImage::new(900, 600).unwrap();
        let layout = layout(2, 2, &source);
        let mut pages = generate_pages(&layout, &source);
        assert_eq!(pages.len(), 4);

        pages.next();
        let checkpoint = pages.clone();
        assert_eq!(pages.len(), 3);
        let rest: Vec<_> = pages.collect();
        let again: Vec<_> = checkpoint.collect();
        assert_eq!(rest, again);
        assert_eq!(rest[0].page_number, 2);
    }

    #[test]
    fn nth_skips_without_overflowing() {
        let source = SourceImage::new(900, 600).unwrap();
        let layout = layout(2, 2, &source);
        let mut pages = generate_pages(&layout, &source);
        assert_eq!(pages.nth(2).map(|p| p.page_number), Some(3));
        assert_eq!(pages.nth(usize::MAX), None);
        assert_eq!(pages.next(), None);
    }

    #[test]
    fn descriptor_matches_tile_mapping() {
        let source = SourceImage::new(900, 600).unwrap();
        let layout = layout(2, 2, &source);
        let page = generate_pages(&layout, &source).page(0, 1);
        assert_eq!(page.tile(), compute_tile(&layout, &source, 0, 1));
    }
}
