//! Pure-Rust image backend built on `image` and `imageproc`.
//!
//! Primitives that `imageproc` does not ship (HSV conversion, range masks,
//! weighted blending, contour moments and convexity defects) are written
//! directly against `image` buffers here so the rest of the crate only ever
//! talks to [`ImageOps`].

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometry::convex_hull;
use imageproc::map::{map_colors, map_colors2};
use imageproc::morphology::{Mask, grayscale_open};
use imageproc::point::Point;
use nalgebra::Vector2;

use super::image_ops::{ImageOps, Moments, RawDefect};

/// Default [`ImageOps`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageprocOps;

impl ImageprocOps {
    pub fn new() -> Self {
        Self
    }
}

impl ImageOps for ImageprocOps {
    fn to_gray(&self, frame: &RgbImage) -> GrayImage {
        image::imageops::grayscale(frame)
    }

    fn to_hsv(&self, frame: &RgbImage) -> RgbImage {
        map_colors(frame, |Rgb([r, g, b]): Rgb<u8>| Rgb(rgb_to_hsv(r, g, b)))
    }

    fn gaussian_blur(&self, image: &GrayImage, sigma: f32) -> GrayImage {
        gaussian_blur_f32(image, sigma)
    }

    fn abs_diff(&self, a: &GrayImage, b: &GrayImage) -> GrayImage {
        map_colors2(a, b, |Luma([p]): Luma<u8>, Luma([q]): Luma<u8>| {
            Luma([p.abs_diff(q)])
        })
    }

    fn threshold(&self, image: &GrayImage, level: u8) -> GrayImage {
        threshold(image, level, ThresholdType::Binary)
    }

    fn open(&self, image: &GrayImage, radius: u8) -> GrayImage {
        grayscale_open(image, &Mask::from_image(&ellipse_kernel(radius), radius, radius))
    }

    fn in_range(&self, image: &RgbImage, lower: [u8; 3], upper: [u8; 3]) -> GrayImage {
        map_colors(image, |Rgb(px): Rgb<u8>| {
            let inside = (0..3).all(|c| lower[c] <= px[c] && px[c] <= upper[c]);
            Luma([if inside { 255 } else { 0 }])
        })
    }

    fn add_weighted(
        &self,
        a: &GrayImage,
        alpha: f32,
        b: &GrayImage,
        beta: f32,
        gamma: f32,
    ) -> GrayImage {
        map_colors2(a, b, |Luma([p]): Luma<u8>, Luma([q]): Luma<u8>| {
            // Ties go to even so a zero/zero pixel with gamma 0.5 stays zero.
            let v = (p as f32 * alpha + q as f32 * beta + gamma).round_ties_even();
            Luma([v.clamp(0.0, 255.0) as u8])
        })
    }

    fn find_outer_contours(&self, mask: &GrayImage) -> Vec<Vec<Point<i32>>> {
        find_contours::<i32>(mask)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| compress_runs(c.points))
            .collect()
    }

    fn convex_hull(&self, points: &[Point<i32>]) -> Vec<Point<i32>> {
        if points.is_empty() {
            return Vec::new();
        }
        convex_hull(points)
    }

    fn convex_hull_indices(&self, contour: &[Point<i32>]) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .convex_hull(contour)
            .iter()
            .filter_map(|v| contour.iter().position(|p| p == v))
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    fn convexity_defects(&self, contour: &[Point<i32>], hull_indices: &[usize]) -> Vec<RawDefect> {
        let n = contour.len();
        let m = hull_indices.len();
        if n < 3 || m < 2 {
            return Vec::new();
        }

        let mut defects = Vec::new();
        for i in 0..m {
            let start = hull_indices[i];
            let end = hull_indices[(i + 1) % m];
            if start >= n || end >= n {
                continue;
            }

            let s = to_vector(contour[start]);
            let edge = to_vector(contour[end]) - s;
            let edge_len = edge.norm();

            let mut deepest: Option<(usize, f64)> = None;
            let mut j = (start + 1) % n;
            while j != end {
                let offset = to_vector(contour[j]) - s;
                let depth = if edge_len > 0.0 {
                    edge.perp(&offset).abs() / edge_len
                } else {
                    offset.norm()
                };
                if deepest.is_none_or(|(_, d)| depth > d) {
                    deepest = Some((j, depth));
                }
                j = (j + 1) % n;
            }

            if let Some((far, depth)) = deepest {
                if depth > 0.0 {
                    defects.push(RawDefect {
                        start,
                        end,
                        far,
                        fixpt_depth: (depth * 256.0).round() as i32,
                    });
                }
            }
        }
        defects
    }

    fn moments(&self, contour: &[Point<i32>]) -> Moments {
        let n = contour.len();
        if n < 3 {
            return Moments::default();
        }

        let (mut a00, mut a10, mut a01) = (0.0f64, 0.0f64, 0.0f64);
        let mut prev = contour[n - 1];
        for &cur in contour {
            let (xp, yp) = (prev.x as f64, prev.y as f64);
            let (xc, yc) = (cur.x as f64, cur.y as f64);
            let cross = xp * yc - xc * yp;
            a00 += cross;
            a10 += cross * (xp + xc);
            a01 += cross * (yp + yc);
            prev = cur;
        }

        // Orientation-independent: a clockwise trace yields the same moments.
        let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
        Moments {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
        }
    }
}

/// Elliptical structuring element of side `2 * radius + 1`, rasterised row by
/// row the same way as OpenCV's `MORPH_ELLIPSE`.
fn ellipse_kernel(radius: u8) -> GrayImage {
    let r = radius as i32;
    let side = 2 * r as u32 + 1;
    let mut kernel = GrayImage::new(side, side);
    if r == 0 {
        kernel.put_pixel(0, 0, Luma([255]));
        return kernel;
    }

    let r2 = (r * r) as f64;
    for dy in -r..=r {
        let half = (r as f64 * ((r2 - (dy * dy) as f64) / r2).sqrt()).round() as i32;
        for dx in -half..=half {
            kernel.put_pixel((r + dx) as u32, (r + dy) as u32, Luma([255]));
        }
    }
    kernel
}

fn to_vector(p: Point<i32>) -> Vector2<f64> {
    Vector2::new(p.x as f64, p.y as f64)
}

/// 8-bit HSV with hue halved to fit a byte.
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };
    let mut h = if diff == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / diff
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h = (h / 2.0).round() as u32 % 180;
    [h as u8, s.round() as u8, v as u8]
}

/// Keep only the end points of straight runs in a closed pixel chain.
fn compress_runs(points: Vec<Point<i32>>) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points;
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let (ax, ay) = (cur.x - prev.x, cur.y - prev.y);
        let (bx, by) = (next.x - cur.x, next.y - cur.y);
        let collinear = ax * by - ay * bx == 0 && ax * bx + ay * by > 0;
        if !collinear {
            kept.push(cur);
        }
    }
    kept
}
