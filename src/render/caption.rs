//! Caption text rasterized with fontdue onto a sheet.

use crate::{PosterError, Result};
use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};
use std::path::Path;

pub struct CaptionFont {
    font: Font,
}

impl CaptionFont {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| PosterError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Pixel width of `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.font.metrics(ch, size).advance_width).sum()
    }

    /// Draw `text` horizontally centered on `center_x` with its baseline at `baseline_y`.
    pub fn draw_centered(
        &self,
        sheet: &mut RgbImage,
        text: &str,
        size: f32,
        center_x: f32,
        baseline_y: f32,
        color: Rgb<u8>,
    ) {
        let mut pen_x = center_x - self.measure(text, size) / 2.0;
        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, size);
            let x_offset = (pen_x + metrics.xmin as f32).round() as i64;
            let y_offset = baseline_y.round() as i64 - metrics.height as i64 - metrics.ymin as i64;

            for sy in 0..metrics.height {
                for sx in 0..metrics.width {
                    let coverage = bitmap[sy * metrics.width + sx];
                    blend(sheet, x_offset + sx as i64, y_offset + sy as i64, color, coverage);
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}

fn blend(sheet: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, coverage: u8) {
    if coverage == 0 || x < 0 || y < 0 || x >= sheet.width() as i64 || y >= sheet.height() as i64 {
        return;
    }
    let alpha = coverage as f32 / 255.0;
    let pixel = sheet.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in pixel.0.iter_mut().zip(color.0) {
        *dst = (*dst as f32 * (1.0 - alpha) + src as f32 * alpha).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn bundled() -> CaptionFont {
        let data =
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSansMono.ttf"));
        CaptionFont::from_bytes(data.to_vec()).unwrap()
    }

    /// Columns and rows of every pixel that is no longer white.
    fn inked(sheet: &RgbImage) -> Vec<(u32, u32)> {
        sheet.enumerate_pixels().filter(|(_, _, p)| **p != WHITE).map(|(x, y, _)| (x, y)).collect()
    }

    #[test]
    fn garbage_bytes_are_a_font_error() {
        let err = CaptionFont::from_bytes(vec![0u8; 16]).err();
        assert!(matches!(err, Some(PosterError::Font(_))));
    }

    #[test]
    fn blend_respects_bounds_and_coverage() {
        let mut sheet = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        blend(&mut sheet, -1, 0, Rgb([0, 0, 0]), 255);
        blend(&mut sheet, 2, 0, Rgb([0, 0, 0]), 255);
        blend(&mut sheet, 0, 0, Rgb([0, 0, 0]), 0);
        assert!(sheet.pixels().all(|p| p.0 == [255, 255, 255]));

        blend(&mut sheet, 1, 1, Rgb([0, 0, 0]), 255);
        assert_eq!(sheet.get_pixel(1, 1).0, [0, 0, 0]);
        blend(&mut sheet, 0, 1, Rgb([0, 0, 0]), 128);
        assert_eq!(sheet.get_pixel(0, 1).0, [127, 127, 127]);
    }

    #[test]
    fn width_grows_with_text_and_size() {
        let font = bundled();
        let short = font.measure("Page", 20.0);
        assert!(short > 0.0);
        assert!(font.measure("Page 1/4", 20.0) > short);
        assert!(font.measure("Page", 40.0) > short);
        assert_eq!(font.measure("", 20.0), 0.0);
    }

    #[test]
    fn text_is_drawn_around_the_center_above_the_baseline() {
        let font = bundled();
        let mut sheet = RgbImage::from_pixel(240, 60, WHITE);
        let width = font.measure("Row 1, Col 2", 20.0);
        font.draw_centered(&mut sheet, "Row 1, Col 2", 20.0, 120.0, 40.0, Rgb([0, 0, 0]));

        let ink = inked(&sheet);
        assert!(!ink.is_empty());
        let left = ink.iter().map(|&(x, _)| x).min().unwrap() as f32;
        let right = ink.iter().map(|&(x, _)| x).max().unwrap() as f32;
        assert!(left >= 120.0 - width / 2.0 - 3.0, "ink starts at {left}");
        assert!(right <= 120.0 + width / 2.0 + 3.0, "ink ends at {right}");
        assert!(((left + right) / 2.0 - 120.0).abs() <= 4.0);
        // The comma is the only glyph that dips below the baseline.
        assert!(ink.iter().all(|&(_, y)| y < 46));
        assert!(ink.iter().any(|&(_, y)| y < 30));
    }

    #[test]
    fn text_past_the_edge_is_clipped() {
        let font = bundled();
        let mut sheet = RgbImage::from_pixel(20, 20, WHITE);
        font.draw_centered(&mut sheet, "Page 12/12", 16.0, 0.0, 18.0, Rgb([0, 0, 0]));
        assert!(!inked(&sheet).is_empty());
    }
}
