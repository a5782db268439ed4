//! Region adjacency graph and the marker's topological signature.
//!
//! The physical marker is fixed, so the expected topology is a set of
//! named constants rather than configuration: changing them means printing
//! a different marker.

use star_target_core::Labeling;

/// Total region count after binarization: 14 pattern cells + background.
pub const PATTERN_REGIONS: usize = 15;

/// Number of reported corner tips.
pub const CORNER_COUNT: usize = 12;

/// Degree of the background region (12 tips + the hub).
pub const BACKGROUND_DEGREE: usize = 13;

/// Degree of the hub cell bridging the background and the inner cell.
pub const HUB_DEGREE: usize = 2;

/// Degree of every leaf cell (tips and the inner cell).
pub const TIP_DEGREE: usize = 1;

/// Symmetric adjacency relation over region class ids.
///
/// Two regions are adjacent when any pair of 4-adjacent pixels carries
/// their two class ids. Built once from a labeling, read-only afterwards.
#[derive(Clone, Debug)]
pub struct RegionAdjacency {
    num_regions: usize,
    table: Vec<bool>, // num_regions * num_regions, symmetric
    degrees: Vec<usize>,
}

/// Outcome of the degree-signature check: the two distinguished regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegreeSignature {
    /// Class id of the background (the unique degree-13 region).
    pub background: usize,
    /// Class id of the hub (the unique degree-2 region).
    pub hub: usize,
}

impl RegionAdjacency {
    /// Build the adjacency table from 4-adjacent pixel pairs of differing
    /// class.
    pub fn from_labeling(lab: &Labeling) -> Self {
        let n = lab.num_classes;
        let (w, h) = (lab.width, lab.height);
        let mut table = vec![false; n * n];

        let mut mark = |c0: u32, c1: u32| {
            if c0 != c1 {
                table[c0 as usize * n + c1 as usize] = true;
                table[c1 as usize * n + c0 as usize] = true;
            }
        };

        for y in 0..h {
            for x in 0..w.saturating_sub(1) {
                mark(lab.class_at(x, y), lab.class_at(x + 1, y));
            }
        }
        for y in 0..h.saturating_sub(1) {
            for x in 0..w {
                mark(lab.class_at(x, y), lab.class_at(x, y + 1));
            }
        }

        let degrees = (0..n)
            .map(|i| table[i * n..(i + 1) * n].iter().filter(|&&a| a).count())
            .collect();

        Self {
            num_regions: n,
            table,
            degrees,
        }
    }

    #[inline]
    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    #[inline]
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.table[a * self.num_regions + b]
    }

    /// Number of distinct regions adjacent to `region`.
    #[inline]
    pub fn degree(&self, region: usize) -> usize {
        self.degrees[region]
    }

    #[cfg(test)]
    fn from_edges(num_regions: usize, edges: &[(usize, usize)]) -> Self {
        let mut table = vec![false; num_regions * num_regions];
        for &(a, b) in edges {
            table[a * num_regions + b] = true;
            table[b * num_regions + a] = true;
        }
        let degrees = (0..num_regions)
            .map(|i| {
                table[i * num_regions..(i + 1) * num_regions]
                    .iter()
                    .filter(|&&x| x)
                    .count()
            })
            .collect();
        Self {
            num_regions,
            table,
            degrees,
        }
    }
}

/// Check the marker's degree signature: one degree-13 background, one
/// degree-2 hub, thirteen degree-1 leaves. Any other degree anywhere, or
/// any other multiplicity, rejects.
pub fn check_degree_signature(adj: &RegionAdjacency) -> Option<DegreeSignature> {
    let mut num_background = 0usize;
    let mut num_hub = 0usize;
    let mut num_leaf = 0usize;
    let mut background = None;
    let mut hub = None;

    for region in 0..adj.num_regions() {
        match adj.degree(region) {
            BACKGROUND_DEGREE => {
                num_background += 1;
                background = Some(region);
            }
            HUB_DEGREE => {
                num_hub += 1;
                hub = Some(region);
            }
            TIP_DEGREE => num_leaf += 1,
            other => {
                log::debug!("region {region} has unexpected degree {other}");
                return None;
            }
        }
    }

    if num_background != 1 || num_hub != 1 || num_leaf != PATTERN_REGIONS - 2 {
        log::debug!(
            "degree multiplicities off: background={num_background} hub={num_hub} leaf={num_leaf}"
        );
        return None;
    }

    Some(DegreeSignature {
        background: background?,
        hub: hub?,
    })
}

/// Pick the twelve corner regions among the background's neighbors.
///
/// Scans class ids in ascending order: a background-adjacent degree-1
/// region is a tip; the single background-adjacent degree-2 region is the
/// hub and must occur exactly once; anything else rejects. Returns the tip
/// class ids in scan order, which is also the output corner order.
pub fn select_corner_regions(adj: &RegionAdjacency, background: usize) -> Option<Vec<usize>> {
    let mut tips = Vec::with_capacity(CORNER_COUNT);
    let mut hub_seen = false;

    for region in 0..adj.num_regions() {
        if !adj.are_adjacent(region, background) {
            continue;
        }
        match adj.degree(region) {
            TIP_DEGREE => tips.push(region),
            HUB_DEGREE => {
                if hub_seen {
                    return None;
                }
                hub_seen = true;
            }
            _ => return None,
        }
    }

    (hub_seen && tips.len() == CORNER_COUNT).then_some(tips)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Edge list of the nominal marker graph.
    ///
    /// Region 0 is the background, 1 the hub, 2 the inner cell behind the
    /// hub, 3..=14 the twelve tips.
    fn star_edges() -> Vec<(usize, usize)> {
        let mut edges = vec![(0, 1), (1, 2)];
        for tip in 3..15 {
            edges.push((0, tip));
        }
        edges
    }

    #[test]
    fn nominal_graph_passes_signature() {
        let adj = RegionAdjacency::from_edges(15, &star_edges());
        let sig = check_degree_signature(&adj).expect("signature");
        assert_eq!(sig.background, 0);
        assert_eq!(sig.hub, 1);
    }

    #[test]
    fn nominal_graph_selects_twelve_tips_in_order() {
        let adj = RegionAdjacency::from_edges(15, &star_edges());
        let tips = select_corner_regions(&adj, 0).expect("tips");
        assert_eq!(tips, (3..15).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_degree_rejects() {
        // Connect two tips to each other: both reach degree 2, so the
        // degree-2 multiplicity rises to three.
        let mut edges = star_edges();
        edges.push((3, 4));
        let adj = RegionAdjacency::from_edges(15, &edges);
        assert!(check_degree_signature(&adj).is_none());
    }

    #[test]
    fn wrong_background_degree_rejects() {
        // Drop one tip-background edge; the background degree falls to 12
        // and the orphaned tip to 0.
        let edges: Vec<_> = star_edges()
            .into_iter()
            .filter(|&e| e != (0, 14))
            .collect();
        let adj = RegionAdjacency::from_edges(15, &edges);
        assert!(check_degree_signature(&adj).is_none());
    }

    #[test]
    fn second_background_adjacent_hub_rejects_selection() {
        // Two degree-2 regions on the background. The signature check
        // catches this on its own, but the selection guard must refuse it
        // independently.
        let mut edges = vec![(0, 1), (1, 2), (0, 3), (3, 4)];
        for tip in 5..15 {
            edges.push((0, tip));
        }
        let adj = RegionAdjacency::from_edges(15, &edges);
        assert!(select_corner_regions(&adj, 0).is_none());
    }

    #[test]
    fn high_degree_background_neighbor_rejects_selection() {
        // A background-adjacent region of degree 3 hits the catch-all arm.
        let mut edges = star_edges();
        edges.push((3, 2));
        edges.push((3, 1));
        let adj = RegionAdjacency::from_edges(15, &edges);
        assert!(select_corner_regions(&adj, 0).is_none());
    }

    #[test]
    fn missing_hub_rejects_selection() {
        // Thirteen tips straight on the background, no hub at all.
        let mut edges = vec![(13, 14)];
        for tip in 1..13 {
            edges.push((0, tip));
        }
        let adj = RegionAdjacency::from_edges(15, &edges);
        assert!(select_corner_regions(&adj, 0).is_none());
    }

    #[test]
    fn adjacency_from_labeling_is_symmetric() {
        use star_target_core::{label_regions, GrayImage};

        let mut img = GrayImage::filled(4, 3, 255);
        img.set(1, 1, 0);
        let lab = label_regions(&img.as_view());
        assert_eq!(lab.num_classes, 2);
        let adj = RegionAdjacency::from_labeling(&lab);
        assert!(adj.are_adjacent(0, 1));
        assert!(adj.are_adjacent(1, 0));
        assert!(!adj.are_adjacent(0, 0));
        assert_eq!(adj.degree(0), 1);
        assert_eq!(adj.degree(1), 1);
    }
}
