//! Connected-component labeling over a discretely-valued grid.

use crate::image::GrayImageView;
use crate::union_find::UnionFind;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Partition of a pixel grid into 4-connected equal-valued regions.
///
/// `classes` holds one dense class id per pixel in row-major order; ids run
/// `0..num_classes` with no gaps, issued in first-occurrence scan order.
#[derive(Clone, Debug)]
pub struct Labeling {
    pub width: usize,
    pub height: usize,
    pub classes: Vec<u32>,
    pub num_classes: usize,
}

impl Labeling {
    /// Class id of the pixel at (x, y).
    #[inline]
    pub fn class_at(&self, x: usize, y: usize) -> u32 {
        self.classes[y * self.width + x]
    }
}

/// Label 4-connected regions of equal pixel value.
///
/// Two pixels share a class id iff they are connected through a path of
/// 4-adjacent pixels of equal value. An empty grid yields zero classes;
/// this function has no failure mode.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn label_regions(img: &GrayImageView<'_>) -> Labeling {
    let (w, h) = (img.width, img.height);
    let mut uf = UnionFind::new(w * h);

    // Horizontal pairs, then vertical pairs: exactly 4-connectivity.
    for y in 0..h {
        for x in 0..w.saturating_sub(1) {
            if img.at(x, y) == img.at(x + 1, y) {
                uf.union(y * w + x, y * w + x + 1);
            }
        }
    }
    for y in 0..h.saturating_sub(1) {
        for x in 0..w {
            if img.at(x, y) == img.at(x, y + 1) {
                uf.union(y * w + x, (y + 1) * w + x);
            }
        }
    }

    let (classes, num_classes) = uf.build();
    log::debug!("labeled {w}x{h} grid into {num_classes} regions");

    Labeling {
        width: w,
        height: h,
        classes,
        num_classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImage;

    fn grid(width: usize, rows: &[&[u8]]) -> GrayImage {
        let mut img = GrayImage::filled(width, rows.len(), 0);
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                img.set(x, y, v);
            }
        }
        img
    }

    /// Brute-force reference: flood fill from every pixel.
    fn flood_fill_classes(img: &GrayImage) -> Vec<u32> {
        let (w, h) = (img.width, img.height);
        let mut out = vec![u32::MAX; w * h];
        let mut next = 0u32;
        for start in 0..w * h {
            if out[start] != u32::MAX {
                continue;
            }
            let mut stack = vec![start];
            out[start] = next;
            while let Some(p) = stack.pop() {
                let (x, y) = (p % w, p / w);
                let v = img.data[p];
                let mut push = |q: usize| {
                    if out[q] == u32::MAX && img.data[q] == v {
                        out[q] = next;
                        stack.push(q);
                    }
                };
                if x > 0 {
                    push(p - 1);
                }
                if x + 1 < w {
                    push(p + 1);
                }
                if y > 0 {
                    push(p - w);
                }
                if y + 1 < h {
                    push(p + w);
                }
            }
            next += 1;
        }
        out
    }

    fn assert_same_partition(a: &[u32], b: &[u32]) {
        assert_eq!(a.len(), b.len());
        for i in 0..a.len() {
            for j in i + 1..a.len() {
                assert_eq!(
                    a[i] == a[j],
                    b[i] == b[j],
                    "pixels {i} and {j} disagree between labeler and flood fill"
                );
            }
        }
    }

    #[test]
    fn uniform_grid_is_one_region() {
        let img = GrayImage::filled(5, 4, 255);
        let lab = label_regions(&img.as_view());
        assert_eq!(lab.num_classes, 1);
        assert!(lab.classes.iter().all(|&c| c == 0));
    }

    #[test]
    fn empty_grid_yields_zero_classes() {
        let img = GrayImage::filled(0, 0, 0);
        let lab = label_regions(&img.as_view());
        assert_eq!(lab.num_classes, 0);
        assert!(lab.classes.is_empty());
    }

    #[test]
    fn diagonal_touch_does_not_connect() {
        let img = grid(2, &[&[0, 255], &[255, 0]]);
        let lab = label_regions(&img.as_view());
        // Two 0-pixels touch only diagonally: four separate regions.
        assert_eq!(lab.num_classes, 4);
    }

    #[test]
    fn matches_flood_fill_on_synthetic_grids() {
        let cases = [
            grid(4, &[&[0, 0, 255, 255], &[0, 255, 255, 0], &[0, 0, 0, 0]]),
            grid(3, &[&[1, 2, 1], &[2, 1, 2], &[1, 2, 1]]),
            grid(5, &[&[0, 255, 0, 255, 0], &[0, 255, 0, 255, 0]]),
            grid(1, &[&[7], &[7], &[8], &[7]]),
        ];
        for img in &cases {
            let lab = label_regions(&img.as_view());
            let reference = flood_fill_classes(img);
            assert_same_partition(&lab.classes, &reference);
        }
    }

    #[test]
    fn class_ids_are_dense_and_total() {
        let img = grid(4, &[&[0, 0, 255, 0], &[255, 0, 255, 0]]);
        let lab = label_regions(&img.as_view());
        assert_eq!(lab.classes.len(), 8);
        let mut seen = lab.classes.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), lab.num_classes);
        assert_eq!(seen, (0..lab.num_classes as u32).collect::<Vec<_>>());
    }

    #[test]
    fn labeling_is_deterministic() {
        let img = grid(4, &[&[0, 0, 255, 255], &[0, 255, 255, 0], &[0, 0, 0, 0]]);
        let a = label_regions(&img.as_view());
        let b = label_regions(&img.as_view());
        assert_eq!(a.classes, b.classes);
        assert_eq!(a.num_classes, b.num_classes);
    }
}
