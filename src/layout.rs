//! Poster layout: assembled poster size and the contain-fit of the image inside it.

use crate::paper::{Orientation, PaperSize};
use crate::{PosterError, Result};
use serde::Serialize;

/// Number of sheet rows and columns. Rows scale height, columns scale width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridShape {
    pub rows: u32,
    pub cols: u32,
}

impl GridShape {
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PosterError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn page_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Derived geometry for one set of inputs. Never mutated; recompute instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PosterLayout {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub grid: GridShape,
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    pub poster_width_mm: f64,
    pub poster_height_mm: f64,
    pub draw_width_mm: f64,
    pub draw_height_mm: f64,
    /// Share of the poster area covered by the image, in (0, 1].
    pub fill_efficiency: f64,
}

impl PosterLayout {
    pub fn poster_aspect(&self) -> f64 {
        self.poster_width_mm / self.poster_height_mm
    }

    pub fn page_count(&self) -> usize {
        self.grid.page_count()
    }
}

/// Fit an image of `image_aspect` (width / height) into a poster of `grid` sheets.
///
/// Expects `grid.rows >= 1`, `grid.cols >= 1` and a positive finite aspect;
/// callers validate through [`GridShape::new`] and [`crate::SourceImage::new`].
pub fn compute_layout(
    paper: PaperSize,
    orientation: Orientation,
    grid: GridShape,
    image_aspect: f64,
) -> PosterLayout {
    let (sheet_width_mm, sheet_height_mm) = paper.dimensions_with_orientation(orientation);
    let poster_width_mm = sheet_width_mm * grid.cols as f64;
    let poster_height_mm = sheet_height_mm * grid.rows as f64;
    let poster_aspect = poster_width_mm / poster_height_mm;

    // Width saturates for relatively wider images, height otherwise.
    let (draw_width_mm, draw_height_mm) = if image_aspect > poster_aspect {
        (poster_width_mm, poster_width_mm / image_aspect)
    } else {
        (poster_height_mm * image_aspect, poster_height_mm)
    };

    let fill_efficiency =
        (draw_width_mm * draw_height_mm) / (poster_width_mm * poster_height_mm);

    log::debug!(
        "layout {} {:?} {}x{}: poster {:.1}x{:.1}mm, image {:.1}x{:.1}mm, fill {:.1}%",
        paper.name(),
        orientation,
        grid.rows,
        grid.cols,
        poster_width_mm,
        poster_height_mm,
        draw_width_mm,
        draw_height_mm,
        fill_efficiency * 100.0,
    );

    PosterLayout {
        paper,
        orientation,
        grid,
        sheet_width_mm,
        sheet_height_mm,
        poster_width_mm,
        poster_height_mm,
        draw_width_mm,
        draw_height_mm,
        fill_efficiency,
    }
}
