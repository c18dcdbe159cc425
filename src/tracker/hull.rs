//! Convex hull and centroid of the dominant contour.

use imageproc::point::Point;
use nalgebra::Point2;

use crate::integration::{ImageOps, Moments};
use crate::tracker::contour::Contour;

/// Hull and centroid of one contour.
#[derive(Debug, Clone, PartialEq)]
pub struct HullAnalysis {
    /// Convex hull vertices in traversal order
    pub hull: Vec<Point<i32>>,
    /// Area-weighted centre in whole pixels; `None` for a zero-area contour
    pub centroid: Option<Point2<f64>>,
}

/// Centre of mass from zeroth and first order moments, truncated to the
/// pixel it falls in.
pub fn centroid(moments: &Moments) -> Option<Point2<f64>> {
    if moments.m00.abs() <= f64::EPSILON {
        return None;
    }
    let x = (moments.m10 / moments.m00).trunc();
    let y = (moments.m01 / moments.m00).trunc();
    Some(Point2::new(x, y))
}

pub fn analyze<O: ImageOps>(ops: &O, contour: &Contour) -> HullAnalysis {
    HullAnalysis {
        hull: ops.convex_hull(&contour.points),
        centroid: centroid(&contour.moments),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::ImageprocOps;

    #[test]
    fn test_zero_area_has_no_centroid() {
        assert_eq!(centroid(&Moments::default()), None);
    }

    #[test]
    fn test_hull_of_l_shape() {
        let ops = ImageprocOps::new();
        let points = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(5, 10),
            Point::new(5, 5),
            Point::new(0, 5),
        ];
        let contour = Contour::new(&ops, points);
        let analysis = analyze(&ops, &contour);

        assert_eq!(analysis.hull.len(), 5);
        assert!(!analysis.hull.contains(&Point::new(5, 5)));

        // 75 square pixels: 10x5 top bar plus a 5x5 block below it on the right.
        // Exact centre is (35/6, 25/6).
        assert_eq!(analysis.centroid, Some(Point2::new(5.0, 4.0)));
    }

    #[test]
    fn test_centroid_truncates_to_pixel() {
        let moments = Moments {
            m00: 10.0,
            m10: 1509.0,
            m01: 1004.0,
        };
        assert_eq!(centroid(&moments), Some(Point2::new(150.0, 100.0)));
    }

    #[test]
    fn test_flat_contour_skips_centroid() {
        let ops = ImageprocOps::new();
        let contour = Contour::new(&ops, vec![Point::new(0, 3), Point::new(9, 3), Point::new(4, 3)]);
        let analysis = analyze(&ops, &contour);
        assert!(analysis.centroid.is_none());
    }
}
