//! Page renderer sinks that turn page descriptors into output.

mod manifest;
#[cfg(not(target_arch = "wasm32"))]
mod caption;
#[cfg(not(target_arch = "wasm32"))]
mod raster;

pub use manifest::ManifestRenderer;
#[cfg(not(target_arch = "wasm32"))]
pub use caption::CaptionFont;
#[cfg(not(target_arch = "wasm32"))]
pub use raster::RasterRenderer;

use crate::layout::PosterLayout;
use crate::pages::{PageDescriptor, Pages};
use crate::Result;

/// Consumer of a row-major page sequence. The first page goes on the
/// initial sheet and every later page starts a new one.
pub trait PageRenderer {
    /// Called once with the layout, before the first page.
    fn begin(&mut self, _layout: &PosterLayout) -> Result<()> {
        Ok(())
    }

    fn render_page(&mut self, page: &PageDescriptor) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Drive `renderer` over `pages`, stopping at the first failure.
pub fn render_pages<R: PageRenderer + ?Sized>(
    pages: Pages<'_>,
    renderer: &mut R,
) -> Result<usize> {
    renderer.begin(pages.layout())?;
    let mut rendered = 0;
    for page in pages {
        renderer.render_page(&page)?;
        rendered += 1;
    }
    renderer.finish()?;
    log::info!("rendered {rendered} pages");
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, GridShape};
    use crate::pages::generate_pages;
    use crate::paper::{Orientation, PaperSize};
    use crate::source::SourceImage;
    use crate::PosterError;

    #[derive(Default)]
    struct Recorder {
        began: Option<usize>,
        seen: Vec<usize>,
        finished: bool,
        fail_on: Option<usize>,
    }

    impl PageRenderer for Recorder {
        fn begin(&mut self, layout: &PosterLayout) -> Result<()> {
            self.began = Some(layout.page_count());
            Ok(())
        }

        fn render_page(&mut self, page: &PageDescriptor) -> Result<()> {
            if self.fail_on == Some(page.page_number) {
                return Err(PosterError::InvalidSettings("boom".into()));
            }
            self.seen.push(page.page_number);
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn layout(source: &SourceImage) -> PosterLayout {
        compute_layout(
            PaperSize::A4,
            Orientation::Portrait,
            GridShape::new(2, 2).unwrap(),
            source.aspect_ratio(),
        )
    }

    #[test]
    fn pages_arrive_in_order_between_begin_and_finish() {
        let source = SourceImage::new(800, 600).unwrap();
        let layout = layout(&source);
        let mut recorder = Recorder::default();
        let count = render_pages(generate_pages(&layout, &source), &mut recorder).unwrap();

        assert_eq!(count, 4);
        assert_eq!(recorder.began, Some(4));
        assert_eq!(recorder.seen, vec![1, 2, 3, 4]);
        assert!(recorder.finished);
    }

    #[test]
    fn failure_stops_the_run() {
        let source = SourceImage::new(800, 600).unwrap();
        let layout = layout(&source);
        let mut recorder = Recorder { fail_on: Some(3), ..Recorder::default() };
        assert!(render_pages(generate_pages(&layout, &source), &mut recorder).is_err());
        assert_eq!(recorder.seen, vec![1, 2]);
        assert!(!recorder.finished);
    }
}
