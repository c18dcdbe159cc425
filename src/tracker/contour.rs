//! Dominant contour selection.

use image::GrayImage;
use imageproc::point::Point;

use crate::integration::{ImageOps, Moments};

/// Outer boundary of one foreground region, in ROI pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub moments: Moments,
    /// Enclosed area in square pixels
    pub area: f64,
}

impl Contour {
    pub fn new<O: ImageOps>(ops: &O, points: Vec<Point<i32>>) -> Self {
        let moments = ops.moments(&points);
        Self {
            points,
            moments,
            area: moments.m00.abs(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Index of the largest-area contour; the first one wins a tie.
pub fn dominant_index(contours: &[Contour]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, contour) in contours.iter().enumerate() {
        if best.is_none_or(|(_, area)| contour.area > area) {
            best = Some((i, contour.area));
        }
    }
    best.map(|(i, _)| i)
}

/// Extract the outer contours of `mask` and keep the dominant one.
///
/// `None` means the mask holds no foreground region at all.
pub fn select_dominant<O: ImageOps>(ops: &O, mask: &GrayImage) -> Option<Contour> {
    let mut contours: Vec<Contour> = ops
        .find_outer_contours(mask)
        .into_iter()
        .map(|points| Contour::new(ops, points))
        .collect();
    let idx = dominant_index(&contours)?;
    Some(contours.swap_remove(idx))
}
