//! Preprocessing collaborators: thumbnail scale rule and Otsu binarization.
//!
//! These feed the detector but sit outside its contract; the core only
//! sees the resulting binary grid and the applied scale factor.

use star_target_core::{GrayImage, GrayImageView};

/// Uniform scale factor that fits (width, height) inside the thumbnail
/// bound. Returns 1.0 when the image is already strictly smaller in both
/// dimensions.
pub fn thumbnail_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f64 {
    if width < max_width && height < max_height {
        return 1.0;
    }
    let gx = f64::from(max_width) / f64::from(width);
    let gy = f64::from(max_height) / f64::from(height);
    gx.min(gy)
}

/// Whether to convert to grayscale before resizing.
///
/// At mild downscales (3γ² > 1) converting first is cheaper: the resize
/// then runs on one channel instead of three. At strong downscales the
/// resize shrinks the data so much that running it on color first wins.
pub fn grayscale_before_resize(gamma: f64) -> bool {
    1.0 < 3.0 * gamma * gamma
}

/// Otsu threshold over a grayscale image histogram.
///
/// Degenerate inputs fall back gracefully: an empty image yields 127, a
/// constant image its single value, a two-bin histogram the midpoint.
pub fn otsu_threshold(img: &GrayImageView<'_>) -> u8 {
    if img.is_empty() {
        return 127;
    }

    let mut min_v = 255u8;
    let mut max_v = 0u8;
    for &v in img.data {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v == max_v {
        return min_v;
    }

    let mut hist = [0u32; 256];
    for &v in img.data {
        hist[v as usize] += 1;
    }
    let nonzero_bins = hist.iter().filter(|&&h| h > 0).count();
    if nonzero_bins <= 2 {
        return ((min_v as u16 + max_v as u16) / 2) as u8;
    }

    let total = img.len() as f64;
    let mut sum_total = 0f64;
    for (i, &h) in hist.iter().enumerate() {
        sum_total += (i as f64) * (h as f64);
    }

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = -1f64;
    let mut best_t = 127u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += (t as f64) * (h as f64);
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

/// Threshold a grayscale image into a {0, 255} binary grid.
pub fn binarize(img: &GrayImageView<'_>) -> GrayImage {
    let t = otsu_threshold(img);
    log::debug!("otsu threshold {t}");
    GrayImage {
        width: img.width,
        height: img.height,
        data: img.data.iter().map(|&v| if v > t { 255 } else { 0 }).collect(),
    }
}
