//! Split an image into a grid of printable sheets that assemble into a poster.

pub mod advisor;
pub mod layout;
pub mod pages;
pub mod paper;
pub mod render;
pub mod settings;
pub mod source;
pub mod tile;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use advisor::suggest_initial_grid;
pub use layout::{compute_layout, GridShape, PosterLayout};
pub use pages::{generate_pages, PageDescriptor, Pages};
pub use paper::{Orientation, PaperSize};
pub use render::{render_pages, ManifestRenderer, PageRenderer};
#[cfg(not(target_arch = "wasm32"))]
pub use render::RasterRenderer;
pub use settings::{PosterSettings, SettingsOverlay};
pub use source::SourceImage;
pub use tile::{compute_tile, Rect, TileMapping};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("Invalid grid: {rows} rows x {cols} columns")]
    InvalidGrid { rows: u32, cols: u32 },
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Font error: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, PosterError>;

/// One loaded image and the settings currently applied to it
#[derive(Debug, Clone)]
pub struct Poster {
    source: SourceImage,
    settings: PosterSettings,
    layout: PosterLayout,
}

impl Poster {
    /// Start a session with the advisor's grid and orientation for `source`.
    pub fn new(source: SourceImage) -> Self {
        let settings = PosterSettings::suggested(source.aspect_ratio());
        let layout = Self::recompute(&source, &settings);
        Self { source, settings, layout }
    }

    pub fn with_settings(self, settings: PosterSettings) -> Result<Self> {
        settings.validate()?;
        let layout = Self::recompute(&self.source, &settings);
        Ok(Self { source: self.source, settings, layout })
    }

    pub fn with_paper(self, paper: PaperSize) -> Self {
        let settings = PosterSettings { paper, ..self.settings };
        let layout = Self::recompute(&self.source, &settings);
        Self { settings, layout, ..self }
    }

    pub fn with_orientation(self, orientation: Orientation) -> Self {
        let settings = PosterSettings { orientation, ..self.settings };
        let layout = Self::recompute(&self.source, &settings);
        Self { settings, layout, ..self }
    }

    pub fn with_grid(self, rows: u32, cols: u32) -> Result<Self> {
        GridShape::new(rows, cols)?;
        let settings = PosterSettings { rows, cols, ..self.settings };
        let layout = Self::recompute(&self.source, &settings);
        Ok(Self { settings, layout, ..self })
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn settings(&self) -> &PosterSettings {
        &self.settings
    }

    pub fn layout(&self) -> &PosterLayout {
        &self.layout
    }

    pub fn pages(&self) -> Pages<'_> {
        generate_pages(&self.layout, &self.source)
    }

    /// Feed every page to `renderer`, returning how many were rendered.
    pub fn render<R: PageRenderer>(&self, renderer: &mut R) -> Result<usize> {
        render_pages(self.pages(), renderer)
    }

    // Settings are validated before they get here.
    fn recompute(source: &SourceImage, settings: &PosterSettings) -> PosterLayout {
        let grid = GridShape { rows: settings.rows, cols: settings.cols };
        compute_layout(settings.paper, settings.orientation, grid, source.aspect_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_applies_the_advisor() {
        let poster = Poster::new(SourceImage::new(1920, 1080).unwrap());
        assert_eq!(poster.layout().grid, GridShape { rows: 2, cols: 3 });
        assert_eq!(poster.layout().orientation, Orientation::Landscape);
        assert_eq!(poster.pages().len(), 6);
    }

    #[test]
    fn later_changes_do_not_re_advise() {
        let poster = Poster::new(SourceImage::new(1920, 1080).unwrap())
            .with_orientation(Orientation::Portrait)
            .with_paper(PaperSize::A3);
        assert_eq!(poster.settings().orientation, Orientation::Portrait);
        assert_eq!(poster.settings().rows, 2);
        assert_eq!(poster.layout().sheet_width_mm, 297.0);
    }

    #[test]
    fn grid_changes_replace_the_layout() {
        let poster = Poster::new(SourceImage::new(1600, 1200).unwrap())
            .with_orientation(Orientation::Portrait)
            .with_grid(2, 2)
            .unwrap();
        assert_eq!(poster.layout().poster_width_mm, 420.0);
        assert_eq!(poster.layout().poster_height_mm, 594.0);
        assert!(poster.with_grid(0, 2).is_err());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let poster = Poster::new(SourceImage::new(100, 100).unwrap());
        let settings = PosterSettings { cols: 0, ..PosterSettings::default() };
        assert!(matches!(poster.with_settings(settings), Err(PosterError::InvalidGrid { .. })));
    }

    #[test]
    fn partial_settings_file_keeps_the_suggested_grid() {
        let poster = Poster::new(SourceImage::new(1920, 1080).unwrap());
        let overlay = SettingsOverlay::from_json_str(r#"{ "paper": "a3" }"#).unwrap();
        let settings = overlay.apply(*poster.settings());
        let poster = poster.with_settings(settings).unwrap();

        let layout = poster.layout();
        assert_eq!((layout.grid.rows, layout.grid.cols), (2, 3));
        assert_eq!(layout.orientation, Orientation::Landscape);
        assert_eq!(poster.layout().paper, PaperSize::A3);
    }

    #[test]
    fn render_drives_every_page() {
        let poster = Poster::new(SourceImage::new(100, 300).unwrap());
        let mut manifest = ManifestRenderer::new();
        assert_eq!(poster.render(&mut manifest).unwrap(), 6);
        assert_eq!(manifest.pages().len(), 6);
    }
}
