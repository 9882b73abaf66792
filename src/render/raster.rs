//! Raster sheets: one PNG per page at a fixed DPI.

use super::caption::CaptionFont;
use super::PageRenderer;
use crate::layout::PosterLayout;
use crate::pages::PageDescriptor;
use crate::tile::Rect;
use crate::{PosterError, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use rayon::prelude::*;
use std::path::PathBuf;

const MM_PER_INCH: f64 = 25.4;
const BORDER_MM: f64 = 0.3;
const CAPTION_SIZE_MM: f64 = 4.0;
const CAPTION_BASELINE_MM: f64 = 6.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BORDER: Rgb<u8> = Rgb([64, 64, 64]);
const CAPTION: Rgb<u8> = Rgb([32, 32, 32]);

pub struct RasterRenderer {
    image: DynamicImage,
    out_dir: PathBuf,
    dpi: f64,
    font: Option<CaptionFont>,
    digits: usize,
    written: Vec<PathBuf>,
}

impl RasterRenderer {
    pub fn new(image: DynamicImage, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            image,
            out_dir: out_dir.into(),
            dpi: 150.0,
            font: None,
            digits: 3,
            written: Vec::new(),
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Result<Self> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(PosterError::InvalidSettings(format!("dpi must be positive, got {dpi}")));
        }
        self.dpi = dpi;
        Ok(self)
    }

    pub fn with_font(mut self, font: CaptionFont) -> Self {
        self.font = Some(font);
        self
    }

    /// Files saved so far, in page order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn px(&self, mm: f64) -> f64 {
        mm * self.dpi / MM_PER_INCH
    }

    pub fn page_path(&self, page_number: usize) -> PathBuf {
        self.out_dir.join(format!("page_{:0width$}.png", page_number, width = self.digits))
    }

    /// Paint one sheet in memory.
    pub fn render_sheet(&self, page: &PageDescriptor) -> RgbImage {
        let sheet_w = (self.px(page.sheet_width_mm).round() as u32).max(1);
        let sheet_h = (self.px(page.sheet_height_mm).round() as u32).max(1);
        let mut sheet = RgbImage::from_pixel(sheet_w, sheet_h, WHITE);

        let dest_x = self.px(page.dest_draw.x).round() as i64;
        let dest_y = self.px(page.dest_draw.y).round() as i64;
        let dest_w = (self.px(page.dest_draw.w).round() as u32).max(1);
        let dest_h = (self.px(page.dest_draw.h).round() as u32).max(1);

        let (x0, y0, crop_w, crop_h) = pixel_bounds(&page.source_crop, self.image.dimensions());
        let slice = self
            .image
            .crop_imm(x0, y0, crop_w, crop_h)
            .resize_exact(dest_w, dest_h, FilterType::CatmullRom)
            .to_rgb8();
        imageops::overlay(&mut sheet, &slice, dest_x, dest_y);

        let thickness = (self.px(BORDER_MM).round() as u32).max(1);
        draw_border(&mut sheet, dest_x, dest_y, dest_w, dest_h, thickness, BORDER);

        if let Some(font) = &self.font {
            let size = self.px(CAPTION_SIZE_MM) as f32;
            let baseline = (sheet_h as f64 - self.px(CAPTION_BASELINE_MM)) as f32;
            let center = sheet_w as f32 / 2.0;
            font.draw_centered(&mut sheet, &page.caption, size, center, baseline, CAPTION);
        }

        sheet
    }

    fn save_sheet(&self, page: &PageDescriptor) -> Result<PathBuf> {
        let path = self.page_path(page.page_number);
        self.render_sheet(page).save(&path)?;
        log::debug!("page {} -> {}", page.page_number, path.display());
        Ok(path)
    }

    fn prepare(&mut self, page_count: usize) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)?;
        self.digits = page_count.to_string().len().max(3);
        self.written.clear();
        if self.font.is_none() {
            log::warn!("no caption font given, sheets will not be captioned");
        }
        Ok(())
    }

    /// Render and save every sheet in parallel. Paths come back in page order.
    pub fn render_all(
        &mut self,
        layout: &PosterLayout,
        pages: &[PageDescriptor],
    ) -> Result<Vec<PathBuf>> {
        self.prepare(layout.page_count())?;
        let this = &*self;
        let paths = pages
            .par_iter()
            .map(|page| this.save_sheet(page))
            .collect::<Result<Vec<_>>>()?;
        log::info!("saved {} sheets to {}", paths.len(), self.out_dir.display());
        self.written = paths.clone();
        Ok(paths)
    }
}

impl PageRenderer for RasterRenderer {
    fn begin(&mut self, layout: &PosterLayout) -> Result<()> {
        self.prepare(layout.page_count())
    }

    fn render_page(&mut self, page: &PageDescriptor) -> Result<()> {
        let path = self.save_sheet(page)?;
        self.written.push(path);
        Ok(())
    }
}

/// Integer pixel bounds covering a fractional crop: floor the origin, ceil the
/// far edge, clamp to the image, never empty.
fn pixel_bounds(crop: &Rect, (width, height): (u32, u32)) -> (u32, u32, u32, u32) {
    let x0 = (crop.x.floor().max(0.0) as u32).min(width.saturating_sub(1));
    let y0 = (crop.y.floor().max(0.0) as u32).min(height.saturating_sub(1));
    let x1 = (crop.right().ceil() as u32).min(width);
    let y1 = (crop.bottom().ceil() as u32).min(height);
    (x0, y0, x1.saturating_sub(x0).max(1), y1.saturating_sub(y0).max(1))
}

fn draw_border(
    sheet: &mut RgbImage,
    x: i64,
    y: i64,
    w: u32,
    h: u32,
    thickness: u32,
    color: Rgb<u8>,
) {
    let (sheet_w, sheet_h) = (sheet.width() as i64, sheet.height() as i64);
    let (w, h, t) = (w as i64, h as i64, thickness as i64);
    for py in y.max(0)..(y + h).min(sheet_h) {
        for px in x.max(0)..(x + w).min(sheet_w) {
            let edge = px < x + t || px >= x + w - t || py < y + t || py >= y + h - t;
            if edge {
                sheet.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}
