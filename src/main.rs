//! tileposter CLI - Print an image as a poster of tiled sheets

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tileposter::render::CaptionFont;
use tileposter::{
    ManifestRenderer, Orientation, PaperSize, Poster, PosterError, PosterSettings, RasterRenderer,
    SettingsOverlay, SourceImage,
};

#[derive(Parser)]
#[command(name = "tileposter", version, about = "Split an image into printable poster sheets")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Sheet size
    #[arg(short, long, value_enum)]
    paper: Option<PaperChoice>,
    /// Sheet orientation (defaults to a suggestion based on the image shape)
    #[arg(short, long, value_enum)]
    orientation: Option<OrientationChoice>,
    /// Number of sheet rows
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=15))]
    rows: Option<u32>,
    /// Number of sheet columns
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=15))]
    cols: Option<u32>,
    /// Overlap between sheets in millimeters (recorded, not applied)
    #[arg(long)]
    overlap: Option<f64>,
    /// JSON settings file; command line flags take precedence
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Directory for the rendered sheets
    #[arg(long, default_value = "poster")]
    out_dir: PathBuf,
    /// Sheet resolution in dots per inch
    #[arg(long, default_value = "150")]
    dpi: f64,
    /// TrueType font for page captions
    #[arg(short, long, default_value = "assets/DejaVuSansMono.ttf")]
    font: PathBuf,
    /// Render sheets without page captions
    #[arg(long)]
    no_captions: bool,
    /// Write page descriptors as JSON to this file
    #[arg(short, long)]
    manifest: Option<PathBuf>,
    /// Print the layout and page table without rendering sheets
    #[arg(long)]
    dry_run: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PaperChoice {
    A4,
    A3,
    Letter,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OrientationChoice {
    Portrait,
    Landscape,
}

fn main() -> Result<(), PosterError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let image = image::open(&args.input)?;
    let source = SourceImage::from_image(&image)?;
    log::info!("loaded {} ({}x{})", args.input.display(), source.pixel_width, source.pixel_height);

    let poster = Poster::new(source);
    let mut settings = *poster.settings();
    if let Some(path) = &args.settings {
        settings = SettingsOverlay::from_json_file(path)?.apply(settings);
    }
    let poster = poster.with_settings(args.apply(settings))?;

    let layout = poster.layout();
    println!(
        "{} {:?}, {} rows x {} cols = {} sheets",
        layout.paper.name(),
        layout.orientation,
        layout.grid.rows,
        layout.grid.cols,
        layout.page_count(),
    );
    println!("Poster: {:.1} x {:.1} mm", layout.poster_width_mm, layout.poster_height_mm);
    println!("Image:  {:.1} x {:.1} mm", layout.draw_width_mm, layout.draw_height_mm);
    println!("Fill:   {:.1}%", layout.fill_efficiency * 100.0);

    if let Some(path) = &args.manifest {
        let mut manifest = ManifestRenderer::new();
        poster.render(&mut manifest)?;
        manifest.save(path)?;
    }

    if args.dry_run {
        for page in poster.pages() {
            println!(
                "{:>4}  crop {:.1},{:.1} {:.1}x{:.1}px  ->  {:.1},{:.1} {:.1}x{:.1}mm",
                page.page_number,
                page.source_crop.x,
                page.source_crop.y,
                page.source_crop.w,
                page.source_crop.h,
                page.dest_draw.x,
                page.dest_draw.y,
                page.dest_draw.w,
                page.dest_draw.h,
            );
        }
        return Ok(());
    }

    let mut renderer = RasterRenderer::new(image, &args.out_dir).with_dpi(args.dpi)?;
    if !args.no_captions {
        renderer = renderer.with_font(CaptionFont::from_file(&args.font)?);
    }
    let pages: Vec<_> = poster.pages().collect();
    let paths = renderer.render_all(layout, &pages)?;
    println!("Wrote {} sheets to {}", paths.len(), args.out_dir.display());
    Ok(())
}

impl Args {
    fn apply(&self, mut settings: PosterSettings) -> PosterSettings {
        if let Some(paper) = self.paper {
            settings.paper = paper.to_paper();
        }
        if let Some(orientation) = self.orientation {
            settings.orientation = orientation.to_orientation();
        }
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if let Some(overlap) = self.overlap {
            settings.overlap_mm = overlap;
        }
        settings
    }
}

impl PaperChoice {
    fn to_paper(self) -> PaperSize {
        match self {
            PaperChoice::A4 => PaperSize::A4,
            PaperChoice::A3 => PaperSize::A3,
            PaperChoice::Letter => PaperSize::Letter,
        }
    }
}

impl OrientationChoice {
    fn to_orientation(self) -> Orientation {
        match self {
            OrientationChoice::Portrait => Orientation::Portrait,
            OrientationChoice::Landscape => Orientation::Landscape,
        }
    }
}
