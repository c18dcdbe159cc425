//! Error types for the hand tracker.

use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Hard failures of a tracking cycle.
///
/// Conditions the cycle can recover from on its own (no contour, zero-area
/// contour, self-intersecting contour) are reported through
/// [`CycleOutcome`](crate::tracker::CycleOutcome) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("ROI {x},{y} {width}x{height} does not fit in a {frame_width}x{frame_height} frame")]
    RoiOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("background is {background:?} but the ROI crop is {frame:?}; recapture required")]
    BackgroundMismatch {
        background: (u32, u32),
        frame: (u32, u32),
    },

    #[error("no background captured; recapture required")]
    MissingBackground,

    #[error("invalid blur sigma {sigma}: must be finite")]
    InvalidBlurSigma { sigma: f32 },

    #[error("invalid HSV bounds: lower {lower:?} exceeds upper {upper:?}")]
    InvalidHsvBounds { lower: [u8; 3], upper: [u8; 3] },
}
