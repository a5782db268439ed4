//! Corner overlays for inspection output.

use image::{Rgb, RgbImage};
use nalgebra::Point2;

/// Marker disc radius in pixels.
pub const MARKER_RADIUS: i32 = 10;

/// Marker fill color.
pub const MARKER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Draw a filled disc, clipped to the image bounds.
pub fn draw_filled_disc(img: &mut RgbImage, center: Point2<f32>, radius: i32, color: Rgb<u8>) {
    let cx = center.x.round() as i64;
    let cy = center.y.round() as i64;
    let r = i64::from(radius);
    let r2 = r * r;

    for dy in -r..=r {
        let y = cy + dy;
        if y < 0 || y >= i64::from(img.height()) {
            continue;
        }
        for dx in -r..=r {
            let x = cx + dx;
            if x < 0 || x >= i64::from(img.width()) {
                continue;
            }
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Overlay every detected corner as a filled green disc.
pub fn draw_corner_markers(img: &mut RgbImage, corners: &[Point2<f32>]) {
    for &c in corners {
        draw_filled_disc(img, c, MARKER_RADIUS, MARKER_COLOR);
    }
}
