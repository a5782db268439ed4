//! Cross-frame corner tracking extension point.
//!
//! Video tracking is out of scope for this crate; the trait pins down the
//! contract an implementation must satisfy so per-frame detection and
//! temporal smoothing can evolve independently.

use nalgebra::Point2;

/// Maintains a corner estimate across successive frames.
///
/// Callers feed the raw per-frame detection through [`observe`], including
/// empty results, which are an expected outcome and must not discard the
/// tracker's state on their own. [`current`] exposes the tracker's best
/// estimate, if any; the twelve corners keep the index order of the
/// detection that introduced them.
///
/// [`observe`]: CornerTracker::observe
/// [`current`]: CornerTracker::current
pub trait CornerTracker {
    /// Ingest one frame's detection result (12 corners, or empty).
    fn observe(&mut self, corners: &[Point2<f32>]);

    /// Current best corner estimate, or `None` before any accepted frame
    /// or after the track is lost.
    fn current(&self) -> Option<&[Point2<f32>]>;

    /// Drop all accumulated state.
    fn reset(&mut self);
}
