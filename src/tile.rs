//! Tile mapping - splits the source image into a rows × cols grid and places
//! each slice on its own sheet.

use crate::layout::PosterLayout;
use crate::source::SourceImage;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.w / self.h
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Where one grid cell's slice comes from and where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileMapping {
    pub row: u32,
    pub col: u32,
    /// Source pixels, possibly fractional.
    pub source_crop: Rect,
    /// Sheet-local millimeters, centered on the sheet.
    pub dest_draw: Rect,
}

/// Map cell (`row`, `col`) of `layout.grid`, with `row < rows` and `col < cols`.
///
/// The crop is a uniform partition of raw pixels and is never rounded; the
/// sampler decides how to treat fractional edges.
pub fn compute_tile(
    layout: &PosterLayout,
    source: &SourceImage,
    row: u32,
    col: u32,
) -> TileMapping {
    let (rows, cols) = (layout.grid.rows as f64, layout.grid.cols as f64);

    let chunk_w = source.pixel_width as f64 / cols;
    let chunk_h = source.pixel_height as f64 / rows;
    let source_crop = Rect::new(col as f64 * chunk_w, row as f64 * chunk_h, chunk_w, chunk_h);

    let draw_w = layout.draw_width_mm / cols;
    let draw_h = layout.draw_height_mm / rows;
    // Every sheet is centered on its own, so fit margin is spread over all sheets.
    let offset_x = (layout.sheet_width_mm - draw_w) / 2.0;
    let offset_y = (layout.sheet_height_mm - draw_h) / 2.0;
    let dest_draw = Rect::new(offset_x, offset_y, draw_w, draw_h);

    TileMapping { row, col, source_crop, dest_draw }
}
