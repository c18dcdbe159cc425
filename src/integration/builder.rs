//! Builder for assembling segmentation parameters.

use crate::error::TrackerResult;
use crate::tracker::{HsvBounds, SegmentationMode, SegmentationParams};

/// Builder for [`SegmentationParams`], starting from the defaults.
#[derive(Debug, Clone, Default)]
pub struct SegmentationParamsBuilder {
    params: SegmentationParams,
}

impl SegmentationParamsBuilder {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation mode.
    pub fn mode(mut self, mode: SegmentationMode) -> Self {
        self.params.mode = mode;
        self
    }

    /// Set the binary threshold used by background differencing.
    pub fn sensitivity(mut self, sensitivity: u8) -> Self {
        self.params.sensitivity = sensitivity;
        self
    }

    /// Set the lower HSV bound (hue, saturation, value).
    pub fn hsv_lower(mut self, h: u8, s: u8, v: u8) -> Self {
        self.params.hsv.lower = [h, s, v];
        self
    }

    /// Set the upper HSV bound (hue, saturation, value).
    pub fn hsv_upper(mut self, h: u8, s: u8, v: u8) -> Self {
        self.params.hsv.upper = [h, s, v];
        self
    }

    /// Set both HSV bounds at once.
    pub fn hsv(mut self, bounds: HsvBounds) -> Self {
        self.params.hsv = bounds;
        self
    }

    /// Set the Gaussian sigma applied before differencing; `<= 0` means automatic.
    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.params.blur_sigma = sigma;
        self
    }

    /// Set the radius of the speckle-removing opening.
    pub fn opening_radius(mut self, radius: u8) -> Self {
        self.params.opening_radius = radius;
        self
    }

    /// Build the final `SegmentationParams`, rejecting inverted HSV bounds
    /// and a non-finite blur sigma.
    pub fn build(self) -> TrackerResult<SegmentationParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;

    #[test]
    fn test_params_builder() {
        let params = SegmentationParamsBuilder::new()
            .mode(SegmentationMode::Hybrid)
            .sensitivity(35)
            .hsv_lower(0, 20, 70)
            .hsv_upper(20, 255, 255)
            .build()
            .unwrap();

        assert_eq!(params.mode, SegmentationMode::Hybrid);
        assert_eq!(params.sensitivity, 35);
        assert_eq!(params.hsv.lower, [0, 20, 70]);
        assert_eq!(params.opening_radius, 2);
    }

    #[test]
    fn test_params_builder_rejects_inverted_bounds() {
        let err = SegmentationParamsBuilder::new()
            .hsv_lower(0, 200, 0)
            .hsv_upper(255, 100, 255)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidHsvBounds { .. }));
    }

    #[test]
    fn test_params_builder_rejects_nan_sigma() {
        let err = SegmentationParamsBuilder::new()
            .blur_sigma(f32::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidBlurSigma { .. }));
    }
}
