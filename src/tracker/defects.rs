//! Convexity defects of the dominant contour, for overlays only.
//!
//! Defects never feed into the fingertip count. They are skipped, not
//! reported as errors, when the hull is too small or the contour crosses
//! itself (defect search assumes monotonic hull indices).

use imageproc::point::Point;

use crate::integration::ImageOps;
use crate::tracker::contour::Contour;

/// Fixed-point scale of raw defect depths.
const DEPTH_SCALE: f32 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defect {
    pub start: Point<i32>,
    pub end: Point<i32>,
    /// Contour point deepest inside the hull edge
    pub far: Point<i32>,
    /// Depth in pixels
    pub depth: f32,
    /// Deeper than the configured threshold; the overlay draws these
    pub marked: bool,
}

/// Whether the closed polyline never crosses itself.
///
/// Only proper crossings count; touching or overlapping runs, which pixel
/// contours produce around one-pixel-wide spurs, are accepted.
pub fn is_simple(points: &[Point<i32>]) -> bool {
    let n = points.len();
    if n < 4 {
        return true;
    }
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        // Skip the edge itself and both neighbours.
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (c, d) = (points[j], points[(j + 1) % n]);
            if segments_cross(a, b, c, d) {
                return false;
            }
        }
    }
    true
}

fn orientation(a: Point<i32>, b: Point<i32>, c: Point<i32>) -> i64 {
    let cross = (b.x - a.x) as i64 * (c.y - a.y) as i64 - (b.y - a.y) as i64 * (c.x - a.x) as i64;
    cross.signum()
}

fn segments_cross(a: Point<i32>, b: Point<i32>, c: Point<i32>, d: Point<i32>) -> bool {
    let (o1, o2) = (orientation(a, b, c), orientation(a, b, d));
    let (o3, o4) = (orientation(c, d, a), orientation(c, d, b));
    o1 * o2 < 0 && o3 * o4 < 0
}

/// Convexity defects of `contour`, each marked when deeper than `depth_threshold`.
///
/// Empty when the hull has three or fewer vertices or the contour is not simple.
pub fn annotate<O: ImageOps>(ops: &O, contour: &Contour, depth_threshold: f32) -> Vec<Defect> {
    let points = &contour.points;
    let hull_indices = ops.convex_hull_indices(points);
    if hull_indices.len() <= 3 || !is_simple(points) {
        return Vec::new();
    }

    ops.convexity_defects(points, &hull_indices)
        .into_iter()
        .filter(|raw| raw.start < points.len() && raw.end < points.len() && raw.far < points.len())
        .map(|raw| {
            let depth = raw.fixpt_depth as f32 / DEPTH_SCALE;
            Defect {
                start: points[raw.start],
                end: points[raw.end],
                far: points[raw.far],
                depth,
                marked: depth > depth_threshold,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::ImageprocOps;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point<i32>> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Square with a V-shaped notch cut into the bottom edge.
    fn notched_square(notch_depth: i32) -> Vec<Point<i32>> {
        pts(&[
            (0, 0),
            (100, 0),
            (100, 100),
            (50, 100 - notch_depth),
            (0, 100),
        ])
    }

    #[test]
    fn test_simple_polygons() {
        assert!(is_simple(&notched_square(40)));
        assert!(is_simple(&pts(&[(0, 0), (10, 0), (10, 10), (0, 10)])));
    }

    #[test]
    fn test_bowtie_is_not_simple() {
        assert!(!is_simple(&pts(&[(0, 0), (10, 10), (10, 0), (0, 10)])));
    }

    #[test]
    fn test_retraced_spur_is_simple() {
        // One-pixel spur walked out and back along the same pixels.
        assert!(is_simple(&pts(&[(0, 0), (10, 0), (20, 0), (10, 0), (10, 10), (0, 10)])));
    }

    #[test]
    fn test_notch_depth_and_marking() {
        let ops = ImageprocOps::new();
        let contour = Contour::new(&ops, notched_square(40));

        let defects = annotate(&ops, &contour, 10.0);
        assert_eq!(defects.len(), 1);
        let defect = defects[0];
        assert_eq!(defect.far, Point::new(50, 60));
        assert!((defect.depth - 40.0).abs() < 1e-3);
        assert!(defect.marked);

        let shallow = annotate(&ops, &contour, 50.0);
        assert!(!shallow[0].marked);
    }

    #[test]
    fn test_self_intersecting_contour_has_no_defects() {
        let ops = ImageprocOps::new();
        let contour = Contour::new(
            &ops,
            pts(&[(0, 0), (100, 100), (100, 0), (0, 100), (50, 40)]),
        );
        assert!(annotate(&ops, &contour, 0.0).is_empty());
    }

    #[test]
    fn test_triangle_hull_is_skipped() {
        let ops = ImageprocOps::new();
        let contour = Contour::new(&ops, pts(&[(0, 0), (100, 0), (50, 20), (50, 100)]));
        assert!(annotate(&ops, &contour, 0.0).is_empty());
    }
}
