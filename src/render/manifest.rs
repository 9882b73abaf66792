//! JSON manifest of every page descriptor.

use super::PageRenderer;
use crate::layout::PosterLayout;
use crate::pages::PageDescriptor;
use crate::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct Manifest<'a> {
    layout: Option<&'a PosterLayout>,
    pages: &'a [PageDescriptor],
}

/// Collects descriptors so they can be written out as one JSON document.
#[derive(Debug, Default)]
pub struct ManifestRenderer {
    layout: Option<PosterLayout>,
    pages: Vec<PageDescriptor>,
}

impl ManifestRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    /// Serialize and flush, so write failures surface here.
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        let manifest = Manifest { layout: self.layout.as_ref(), pages: &self.pages };
        serde_json::to_writer_pretty(&mut writer, &manifest)?;
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_to(std::io::BufWriter::new(file))?;
        log::info!("wrote manifest to {}", path.as_ref().display());
        Ok(())
    }
}

impl PageRenderer for ManifestRenderer {
    fn begin(&mut self, layout: &PosterLayout) -> Result<()> {
        self.layout = Some(*layout);
        self.pages.clear();
        self.pages.reserve(layout.page_count());
        Ok(())
    }

    fn render_page(&mut self, page: &PageDescriptor) -> Result<()> {
        self.pages.push(page.clone());
        Ok(())
    }
}
