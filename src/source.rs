//! Source image dimensions as delivered by the image loader.

use crate::{PosterError, Result};
use image::{DynamicImage, GenericImageView};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceImage {
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl SourceImage {
    pub fn new(pixel_width: u32, pixel_height: u32) -> Result<Self> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(PosterError::InvalidImage { width: pixel_width, height: pixel_height });
        }
        Ok(Self { pixel_width, pixel_height })
    }

    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::new(width, height)
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.pixel_width as f64 / self.pixel_height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert!(matches!(
            SourceImage::new(0, 10),
            Err(PosterError::InvalidImage { width: 0, height: 10 })
        ));
        assert!(SourceImage::new(10, 0).is_err());
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        let source = SourceImage::new(1600, 1200).unwrap();
        assert!((source.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn reads_dimensions_from_decoded_image() {
        let image = DynamicImage::new_rgb8(12, 7);
        let source = SourceImage::from_image(&image).unwrap();
        assert_eq!((source.pixel_width, source.pixel_height), (12, 7));
    }
}
