//! Detector for the "star" calibration marker.
//!
//! The marker is a printed pattern that binarizes to exactly fifteen
//! uniformly-valued connected regions: the background, a central hub cell,
//! and thirteen leaf cells of which twelve touch the background. Those
//! twelve are the outer corners this crate reports. Detection is purely
//! topological: label 4-connected regions with a union-find, build the
//! region adjacency graph, check it against the marker's fixed degree
//! signature, and return the centroid of every tip region.
//!
//! ## Quickstart
//!
//! ```no_run
//! use image::ImageReader;
//! use star_target::{detect, StarDetectorParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("photo.jpg")?.decode()?.to_rgb8();
//! let corners = detect::detect_corners(&img, &StarDetectorParams::default());
//! println!("found {} corners", corners.len()); // 12 or 0
//! # Ok(())
//! # }
//! ```
//!
//! Rejection ("pattern not recognized") is an expected outcome for
//! arbitrary photographs and is signaled by an empty corner list, never by
//! an error or panic.
//!
//! ## API map
//! - [`core`]: image buffers and the union-find region labeler.
//! - [`topology`]: region adjacency graph and the marker's degree signature.
//! - [`detector`]: classification and centroid extraction over a labeling.
//! - [`preprocess`]: thumbnail scale rule and Otsu binarization.
//! - [`detect`] (feature `image`): end-to-end helpers from `image::RgbImage`.
//! - [`annotate`] (feature `image`): corner overlays for inspection output.
//! - [`tracking`]: extension point for cross-frame corner tracking.

pub use star_target_core as core;

pub mod detector;
pub mod preprocess;
pub mod topology;
pub mod tracking;

#[cfg(feature = "image")]
pub mod annotate;
#[cfg(feature = "image")]
pub mod detect;

pub use detector::{StarDetectorParams, StarMarkerDetector};
pub use topology::{RegionAdjacency, CORNER_COUNT, PATTERN_REGIONS};
