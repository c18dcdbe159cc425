use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Region of interest inside a camera frame.
///
/// Only the pixels inside the ROI are segmented each cycle. Coordinates are
/// in frame pixels:
/// - `x`, `y`: top-left corner
/// - `width`, `height`: size of the region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roi {
    /// Top-left x coordinate
    pub x: u32,
    /// Top-left y coordinate
    pub y: u32,
    /// Width of the region
    pub width: u32,
    /// Height of the region
    pub height: u32,
}

impl Default for Roi {
    fn default() -> Self {
        Self::new(300, 70, 300, 300)
    }
}

impl Roi {
    /// Create a new Roi from top-left coordinates and dimensions.
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pull the region inside a `frame_width` x `frame_height` frame.
    ///
    /// The corner is clamped into the frame first, then the size is clamped
    /// to what is left, keeping at least one pixel in each direction.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Self {
        let x = self.x.min(frame_width.saturating_sub(1));
        let y = self.y.min(frame_height.saturating_sub(1));
        let width = self.width.clamp(1, (frame_width - x).max(1));
        let height = self.height.clamp(1, (frame_height - y).max(1));
        Self::new(x, y, width, height)
    }

    /// Whether the whole region lies inside a frame of the given size.
    #[inline]
    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= frame_width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= frame_height)
    }

    /// Size as `(width, height)`.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Copy the region out of a frame.
    pub fn crop(&self, frame: &RgbImage) -> TrackerResult<RgbImage> {
        let (frame_width, frame_height) = frame.dimensions();
        if !self.fits_within(frame_width, frame_height) {
            return Err(TrackerError::RoiOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                frame_width,
                frame_height,
            });
        }
        Ok(image::imageops::crop_imm(frame, self.x, self.y, self.width, self.height).to_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_clamp_inside_frame_is_identity() {
        let roi = Roi::new(10, 20, 30, 40);
        assert_eq!(roi.clamp_to(640, 480), roi);
    }

    #[test]
    fn test_clamp_overflowing_roi() {
        let roi = Roi::new(600, 470, 300, 300);
        assert_eq!(roi.clamp_to(640, 480), Roi::new(600, 470, 40, 10));
    }

    #[test]
    fn test_clamp_corner_outside_frame() {
        let roi = Roi::new(1000, 1000, 0, 0);
        assert_eq!(roi.clamp_to(640, 480), Roi::new(639, 479, 1, 1));
    }

    #[test]
    fn test_fits_within() {
        assert!(Roi::new(0, 0, 640, 480).fits_within(640, 480));
        assert!(!Roi::new(1, 0, 640, 480).fits_within(640, 480));
        assert!(!Roi::new(0, 0, 0, 10).fits_within(640, 480));
        assert!(!Roi::new(u32::MAX, 0, 2, 2).fits_within(640, 480));
    }

    #[test]
    fn test_crop() {
        let mut frame = RgbImage::new(8, 8);
        frame.put_pixel(3, 4, Rgb([1, 2, 3]));
        let cropped = Roi::new(2, 2, 4, 4).crop(&frame).unwrap();
        assert_eq!(cropped.dimensions(), (4, 4));
        assert_eq!(cropped.get_pixel(1, 2), &Rgb([1, 2, 3]));
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let frame = RgbImage::new(8, 8);
        let err = Roi::new(6, 6, 4, 4).crop(&frame).unwrap_err();
        assert!(matches!(err, TrackerError::RoiOutOfBounds { .. }));
    }
}
