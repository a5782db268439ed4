//! star-target CLI: detect the star marker in a photograph and write an
//! annotated copy for inspection.

use std::path::PathBuf;

use clap::Parser;
use image::ImageReader;
use log::LevelFilter;

use star_target::core::init_with_level;
use star_target::{annotate, detect, StarDetectorParams};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "star-target")]
#[command(about = "Detect the 15-region star calibration marker (12 corners) in an image")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    image: PathBuf,

    /// Path for the annotated output image.
    #[arg(short, long, default_value = "annotated.png")]
    output: PathBuf,

    /// Optional path for the binarized thumbnail diagnostic.
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    init_with_level(level)?;

    let mut img = ImageReader::open(&cli.image)?.decode()?.to_rgb8();

    let params = StarDetectorParams::default();
    let (corners, diagnostics) = detect::detect_corners_with_diagnostics(&img, &params);

    if let Some(path) = &cli.binary {
        let gray = detect::to_image_gray(&diagnostics.binary)
            .ok_or("binarized thumbnail has invalid dimensions")?;
        gray.save(path)?;
        log::info!("wrote binarized thumbnail to {}", path.display());
    }

    if corners.is_empty() {
        log::warn!("pattern not recognized in {}", cli.image.display());
    } else {
        log::info!(
            "found {} corners (gamma {:.4})",
            corners.len(),
            diagnostics.gamma
        );
        for (i, c) in corners.iter().enumerate() {
            println!("corner {i:2}: ({:.2}, {:.2})", c.x, c.y);
        }
    }

    annotate::draw_corner_markers(&mut img, &corners);
    img.save(&cli.output)?;
    log::info!("wrote annotated image to {}", cli.output.display());

    Ok(())
}
