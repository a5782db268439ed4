use image::ImageReader;
use star_target::{detect, StarDetectorParams};

#[cfg(feature = "tracing")]
use star_target::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: detect_star <image_path>");
        return Ok(());
    };

    let img = ImageReader::open(path)?.decode()?.to_rgb8();
    let corners = detect::detect_corners(&img, &StarDetectorParams::default());

    match corners.len() {
        0 => println!("no marker detected"),
        n => {
            println!("detected {n} corners");
            for c in &corners {
                println!("  ({:.2}, {:.2})", c.x, c.y);
            }
        }
    }

    Ok(())
}
