//! Fingertip extraction from the convex hull of the hand.
//!
//! A hull vertex counts as a fingertip when it is
//! 1. not far below the centroid (`y < centroid.y + y_slack`),
//! 2. far enough from the centroid (`> min_finger_distance`), and
//! 3. far enough from the next hull vertex (`> min_hull_edge_length`), which
//!    collapses clusters of near-duplicate vertices to one.
//!
//! At most [`MAX_FINGERTIPS`] are reported. When six pass the filters the
//! topmost one is dropped, repeatedly if even more pass.

use imageproc::point::Point;
use nalgebra::{Point2, distance};
use serde::{Deserialize, Serialize};

pub const MAX_FINGERTIPS: usize = 5;

/// Geometric thresholds of the fingertip filter, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingertipConfig {
    pub y_slack: f64,
    pub min_finger_distance: f64,
    pub min_hull_edge_length: f64,
}

impl Default for FingertipConfig {
    fn default() -> Self {
        Self {
            y_slack: 20.0,
            min_finger_distance: 100.0,
            min_hull_edge_length: 30.0,
        }
    }
}

fn to_point2(p: Point<i32>) -> Point2<f64> {
    Point2::new(p.x as f64, p.y as f64)
}

/// Filter hull vertices into fingertip candidates, in hull order.
pub fn extract_fingertips(
    hull: &[Point<i32>],
    centroid: &Point2<f64>,
    config: &FingertipConfig,
) -> Vec<Point<i32>> {
    let n = hull.len();
    let mut tips: Vec<Point<i32>> = hull
        .iter()
        .enumerate()
        .filter(|&(k, &p)| {
            let here = to_point2(p);
            let next = to_point2(hull[(k + 1) % n]);
            here.y < centroid.y + config.y_slack
                && distance(&here, centroid) > config.min_finger_distance
                && distance(&here, &next) > config.min_hull_edge_length
        })
        .map(|(_, &p)| p)
        .collect();

    while tips.len() > MAX_FINGERTIPS {
        let mut topmost = 0;
        for (i, p) in tips.iter().enumerate().skip(1) {
            if p.y < tips[topmost].y {
                topmost = i;
            }
        }
        tips.remove(topmost);
    }

    tips
}
