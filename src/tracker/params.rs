//! Segmentation parameters read fresh by every cycle.

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Sigma used when `blur_sigma` is zero or negative; what a 5x5 kernel implies.
pub const AUTO_BLUR_SIGMA: f32 = 1.1;

/// How a color crop becomes a foreground mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SegmentationMode {
    /// Difference against a captured background frame
    #[default]
    BackgroundDiff,
    /// Fixed hue/saturation/value window
    HsvRange,
    /// Blend of `BackgroundDiff` and `HsvRange`
    Hybrid,
    /// Running per-pixel background statistics
    AdaptiveModel,
}

impl SegmentationMode {
    /// Mode selected by the driver's toggle command.
    ///
    /// Flips between background differencing and the HSV window; any other
    /// mode drops back to background differencing.
    pub fn toggled(self) -> Self {
        match self {
            Self::BackgroundDiff => Self::HsvRange,
            _ => Self::BackgroundDiff,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackgroundDiff => "background-diff",
            Self::HsvRange => "hsv-range",
            Self::Hybrid => "hybrid",
            Self::AdaptiveModel => "adaptive-model",
        }
    }
}

/// Inclusive HSV window, 8-bit convention (hue halved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl Default for HsvBounds {
    fn default() -> Self {
        Self {
            lower: [0, 0, 82],
            upper: [255, 36, 255],
        }
    }
}

impl HsvBounds {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> TrackerResult<Self> {
        let bounds = Self { lower, upper };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        if self.lower.iter().zip(&self.upper).any(|(lo, hi)| lo > hi) {
            return Err(TrackerError::InvalidHsvBounds {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    pub mode: SegmentationMode,
    /// Binary threshold applied to the (differenced) grayscale crop
    pub sensitivity: u8,
    pub hsv: HsvBounds,
    /// Gaussian sigma used before differencing; `<= 0` selects [`AUTO_BLUR_SIGMA`]
    pub blur_sigma: f32,
    /// Radius of the speckle-removing opening
    pub opening_radius: u8,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            mode: SegmentationMode::default(),
            sensitivity: 20,
            hsv: HsvBounds::default(),
            blur_sigma: AUTO_BLUR_SIGMA,
            opening_radius: 2,
        }
    }
}

impl SegmentationParams {
    /// Sigma actually handed to the blur.
    pub fn effective_blur_sigma(&self) -> TrackerResult<f32> {
        if !self.blur_sigma.is_finite() {
            return Err(TrackerError::InvalidBlurSigma {
                sigma: self.blur_sigma,
            });
        }
        if self.blur_sigma <= 0.0 {
            return Ok(AUTO_BLUR_SIGMA);
        }
        Ok(self.blur_sigma)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        self.hsv.validate()?;
        self.effective_blur_sigma()?;
        Ok(())
    }
}
