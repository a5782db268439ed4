//! Marker classification and corner extraction over a region labeling.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use star_target_core::{label_regions, GrayImageView, Labeling};

use crate::topology::{
    check_degree_signature, select_corner_regions, RegionAdjacency, CORNER_COUNT, PATTERN_REGIONS,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Detector configuration.
///
/// The marker topology itself is fixed (see [`crate::topology`]); only the
/// preprocessing bound is configurable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StarDetectorParams {
    /// Images wider *and* taller than this bound are downscaled to fit it
    /// before binarization.
    pub max_thumbnail_width: u32,
    pub max_thumbnail_height: u32,
}

impl Default for StarDetectorParams {
    fn default() -> Self {
        Self {
            max_thumbnail_width: 640,
            max_thumbnail_height: 480,
        }
    }
}

/// Star-marker detector.
///
/// All methods signal "pattern not recognized" by returning an empty
/// vector; they never panic on malformed input.
pub struct StarMarkerDetector {
    params: StarDetectorParams,
}

impl StarMarkerDetector {
    pub fn new(params: StarDetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &StarDetectorParams {
        &self.params
    }

    /// Label a binary grid and classify it in one call.
    ///
    /// `gamma` is the uniform scale factor applied to the image before
    /// binarization; returned coordinates are divided by it so they land in
    /// the original image's pixel space.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, grid), fields(width = grid.width, height = grid.height))
    )]
    pub fn detect_in_binary(&self, grid: &GrayImageView<'_>, gamma: f64) -> Vec<Point2<f32>> {
        let labeling = label_regions(grid);
        self.classify(&labeling, gamma)
    }

    /// Classify a labeling against the marker topology and extract the
    /// twelve corner centroids.
    ///
    /// Corner order is the ascending-class-id scan order of the
    /// background-adjacent tip regions, an artifact of discovery rather
    /// than a geometric convention.
    pub fn classify(&self, labeling: &Labeling, gamma: f64) -> Vec<Point2<f32>> {
        classify_regions(labeling, gamma).unwrap_or_default()
    }
}

fn classify_regions(labeling: &Labeling, gamma: f64) -> Option<Vec<Point2<f32>>> {
    if labeling.num_classes != PATTERN_REGIONS {
        log::debug!(
            "region count {} != expected {PATTERN_REGIONS}, not a marker",
            labeling.num_classes
        );
        return None;
    }

    let adjacency = RegionAdjacency::from_labeling(labeling);
    let signature = check_degree_signature(&adjacency)?;
    let tips = select_corner_regions(&adjacency, signature.background)?;

    let corners = tip_centroids(labeling, &tips, gamma)?;
    log::info!("star marker recognized, {} corners", corners.len());
    Some(corners)
}

/// Mean pixel coordinate of each tip region, rescaled by `1/gamma`.
///
/// A tip with zero accumulated pixels cannot occur once the topology
/// checks passed, but rejects the whole result if it does.
fn tip_centroids(labeling: &Labeling, tips: &[usize], gamma: f64) -> Option<Vec<Point2<f32>>> {
    // class id -> output corner slot, dense lookup over all classes
    let mut slot_of_class = vec![None; labeling.num_classes];
    for (slot, &class) in tips.iter().enumerate() {
        slot_of_class[class] = Some(slot);
    }

    let mut sums = vec![(0f64, 0f64); CORNER_COUNT];
    let mut counts = vec![0usize; CORNER_COUNT];

    for y in 0..labeling.height {
        for x in 0..labeling.width {
            if let Some(slot) = slot_of_class[labeling.class_at(x, y) as usize] {
                sums[slot].0 += x as f64;
                sums[slot].1 += y as f64;
                counts[slot] += 1;
            }
        }
    }

    let mut corners = Vec::with_capacity(CORNER_COUNT);
    for ((sx, sy), count) in sums.into_iter().zip(counts) {
        if count == 0 {
            return None;
        }
        let n = count as f64;
        corners.push(Point2::new(
            (sx / n / gamma) as f32,
            (sy / n / gamma) as f32,
        ));
    }

    Some(corners)
}
