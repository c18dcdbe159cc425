//! Trait for the low-level image primitives the tracker is built on.

use image::{GrayImage, RgbImage};
use imageproc::point::Point;

/// Raw convexity defect as produced by the primitive layer.
///
/// `start`, `end` and `far` index into the contour the defect was computed
/// on. `fixpt_depth` is the distance from `far` to the hull edge in 8.8 fixed
/// point, i.e. the pixel depth multiplied by 256.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDefect {
    pub start: usize,
    pub end: usize,
    pub far: usize,
    pub fixpt_depth: i32,
}

/// Spatial moments of a polygon up to first order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// Image-processing backend.
///
/// Implement this trait to run the tracker on top of a different image
/// library. [`ImageprocOps`](super::ImageprocOps) is the default backend.
///
/// # Example
///
/// ```ignore
/// use handtrack_rs::{HandTracker, ImageOps, TrackerConfig};
///
/// struct GpuOps { /* device handles */ }
///
/// impl ImageOps for GpuOps {
///     // ...
/// }
///
/// let tracker = HandTracker::with_ops(TrackerConfig::default(), GpuOps::new());
/// ```
pub trait ImageOps {
    /// Convert a color frame to single-channel luminance.
    fn to_gray(&self, frame: &RgbImage) -> GrayImage;

    /// Convert a color frame to 8-bit HSV (H in `[0, 180)`, S and V in `[0, 255]`).
    fn to_hsv(&self, frame: &RgbImage) -> RgbImage;

    /// Gaussian smoothing with the given standard deviation.
    fn gaussian_blur(&self, image: &GrayImage, sigma: f32) -> GrayImage;

    /// Per-pixel absolute difference of two equally sized images.
    fn abs_diff(&self, a: &GrayImage, b: &GrayImage) -> GrayImage;

    /// Binary threshold: pixels strictly above `level` become 255, the rest 0.
    fn threshold(&self, image: &GrayImage, level: u8) -> GrayImage;

    /// Morphological opening (erosion then dilation) with a kernel of the given radius.
    fn open(&self, image: &GrayImage, radius: u8) -> GrayImage;

    /// 255 where every channel lies inside the inclusive `[lower, upper]` bounds, else 0.
    fn in_range(&self, image: &RgbImage, lower: [u8; 3], upper: [u8; 3]) -> GrayImage;

    /// Saturating `a * alpha + b * beta + gamma`.
    fn add_weighted(
        &self,
        a: &GrayImage,
        alpha: f32,
        b: &GrayImage,
        beta: f32,
        gamma: f32,
    ) -> GrayImage;

    /// Outer borders of the top-level foreground regions (non-zero pixels).
    /// Holes and nested regions are not reported.
    fn find_outer_contours(&self, mask: &GrayImage) -> Vec<Vec<Point<i32>>>;

    /// Convex hull of a point set as an ordered cyclic sequence of vertices.
    fn convex_hull(&self, points: &[Point<i32>]) -> Vec<Point<i32>>;

    /// Convex hull of a contour as ascending indices into the contour.
    fn convex_hull_indices(&self, contour: &[Point<i32>]) -> Vec<usize>;

    /// Convexity defects of a contour given its hull indices.
    fn convexity_defects(&self, contour: &[Point<i32>], hull_indices: &[usize]) -> Vec<RawDefect>;

    /// Moments of the polygon traced by the contour.
    fn moments(&self, contour: &[Point<i32>]) -> Moments;
}
