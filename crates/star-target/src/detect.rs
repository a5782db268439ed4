//! End-to-end helpers over `image` buffers.
//!
//! These wire the preprocessing collaborators (grayscale, resize, Otsu)
//! to the topological detector. The detector core itself never touches
//! the `image` crate.

use image::buffer::ConvertBuffer;
use image::imageops::{self, FilterType};
use image::RgbImage;
use nalgebra::Point2;

use crate::core::GrayImage;
use crate::detector::{StarDetectorParams, StarMarkerDetector};
use crate::preprocess::{binarize, grayscale_before_resize, thumbnail_scale};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the raw-buffer entry points.
///
/// Detection failure itself is *not* an error: an unrecognized pattern
/// yields an empty corner list.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid rgb image buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbBuffer { expected: usize, got: usize },

    #[error("invalid rgb image dimensions (width={width}, height={height})")]
    InvalidRgbDimensions { width: u32, height: u32 },
}

/// Intermediate products of a detection run, for inspection output.
#[derive(Clone, Debug)]
pub struct DetectionDiagnostics {
    /// Binarized (and possibly downscaled) grid the classifier saw.
    pub binary: GrayImage,
    /// Scale factor applied before binarization.
    pub gamma: f64,
}

/// Detect the marker's twelve corners in a color photograph.
///
/// Returns coordinates in the original image's pixel space, or an empty
/// vector when the pattern is not recognized.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn detect_corners(img: &RgbImage, params: &StarDetectorParams) -> Vec<Point2<f32>> {
    detect_corners_with_diagnostics(img, params).0
}

/// Like [`detect_corners`], additionally returning the binary thumbnail
/// and the applied scale factor.
pub fn detect_corners_with_diagnostics(
    img: &RgbImage,
    params: &StarDetectorParams,
) -> (Vec<Point2<f32>>, DetectionDiagnostics) {
    let (gray, gamma) = gray_thumbnail(img, params);
    let binary = binarize(&gray.as_view());

    let detector = StarMarkerDetector::new(params.clone());
    let corners = detector.detect_in_binary(&binary.as_view(), gamma);

    (corners, DetectionDiagnostics { binary, gamma })
}

/// Entry point for callers holding a raw interleaved RGB buffer.
pub fn detect_corners_from_rgb_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: &StarDetectorParams,
) -> Result<Vec<Point2<f32>>, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidRgbDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h).and_then(|n| n.checked_mul(3)) else {
        return Err(DetectError::InvalidRgbDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidRgbBuffer {
            expected,
            got: pixels.len(),
        });
    }
    let img = RgbImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidRgbDimensions { width, height })?;
    Ok(detect_corners(&img, params))
}

/// Grayscale thumbnail plus the scale factor that produced it.
///
/// Conversion order follows the cost rule in
/// [`grayscale_before_resize`]: one-channel resize at mild downscales,
/// color-first resize at strong ones.
fn gray_thumbnail(img: &RgbImage, params: &StarDetectorParams) -> (GrayImage, f64) {
    let gamma = thumbnail_scale(
        img.width(),
        img.height(),
        params.max_thumbnail_width,
        params.max_thumbnail_height,
    );

    if gamma >= 1.0 {
        let gray: image::GrayImage = img.convert();
        return (to_core_gray(&gray), 1.0);
    }

    let w = scaled_dim(img.width(), gamma);
    let h = scaled_dim(img.height(), gamma);
    log::debug!("downscaling to {w}x{h} (gamma {gamma:.4})");

    let gray = if grayscale_before_resize(gamma) {
        let gray: image::GrayImage = img.convert();
        imageops::resize(&gray, w, h, FilterType::Triangle)
    } else {
        let small = imageops::resize(img, w, h, FilterType::Triangle);
        small.convert()
    };

    (to_core_gray(&gray), gamma)
}

#[inline]
fn scaled_dim(dim: u32, gamma: f64) -> u32 {
    ((f64::from(dim) * gamma).round() as u32).max(1)
}

fn to_core_gray(img: &image::GrayImage) -> GrayImage {
    GrayImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// Convert a diagnostic grid back into an encodable `image` buffer.
pub fn to_image_gray(img: &GrayImage) -> Option<image::GrayImage> {
    image::GrayImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_buffer_length_is_validated() {
        let params = StarDetectorParams::default();
        let err = detect_corners_from_rgb_u8(4, 4, &[0u8; 10], &params).unwrap_err();
        assert!(matches!(
            err,
            DetectError::InvalidRgbBuffer {
                expected: 48,
                got: 10
            }
        ));
    }

    #[test]
    fn plain_photo_yields_no_corners() {
        let img = RgbImage::from_pixel(32, 32, image::Rgb([128, 128, 128]));
        let corners = detect_corners(&img, &StarDetectorParams::default());
        assert!(corners.is_empty());
    }

    #[test]
    fn small_image_is_not_resized() {
        let img = RgbImage::from_pixel(100, 80, image::Rgb([255, 255, 255]));
        let (_, diag) =
            detect_corners_with_diagnostics(&img, &StarDetectorParams::default());
        assert_eq!(diag.gamma, 1.0);
        assert_eq!(diag.binary.width, 100);
        assert_eq!(diag.binary.height, 80);
    }

    #[test]
    fn large_image_is_downscaled() {
        let img = RgbImage::from_pixel(1280, 960, image::Rgb([255, 255, 255]));
        let (_, diag) =
            detect_corners_with_diagnostics(&img, &StarDetectorParams::default());
        assert!((diag.gamma - 0.5).abs() < 1e-12);
        assert_eq!(diag.binary.width, 640);
        assert_eq!(diag.binary.height, 480);
    }
}
