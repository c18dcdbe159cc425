//! Running per-pixel Gaussian background model using ndarray.

use image::{GrayImage, Luma};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tuning of the adaptive background model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveModelConfig {
    /// Weight of the newest frame in the running statistics
    pub learning_rate: f32,
    /// Squared Mahalanobis distance above which a pixel is foreground
    pub var_threshold: f32,
    pub var_init: f32,
    pub var_min: f32,
    pub var_max: f32,
}

impl Default for AdaptiveModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1.0 / 500.0,
            var_threshold: 16.0,
            var_init: 15.0,
            var_min: 4.0,
            var_max: 75.0,
        }
    }
}

/// Background model that keeps a mean and variance per pixel.
///
/// Unlike a captured background frame it learns on every call to
/// [`apply`](Self::apply); [`reset`](Self::reset) forgets everything.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveBackgroundModel {
    config: AdaptiveModelConfig,
    mean: Option<Array2<f32>>,
    variance: Option<Array2<f32>>,
}

impl AdaptiveBackgroundModel {
    pub fn new(config: AdaptiveModelConfig) -> Self {
        Self {
            config,
            mean: None,
            variance: None,
        }
    }

    pub fn config(&self) -> &AdaptiveModelConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.mean.is_some()
    }

    pub fn reset(&mut self) {
        self.mean = None;
        self.variance = None;
    }

    /// Classify `frame` against the model, then fold it into the model.
    ///
    /// The first frame (or the first after a size change) seeds the model
    /// and yields an empty mask.
    pub fn apply(&mut self, frame: &GrayImage) -> GrayImage {
        let (width, height) = frame.dimensions();
        let shape = (height as usize, width as usize);

        if !matches!(&self.mean, Some(mean) if mean.dim() == shape) {
            if self.mean.is_some() {
                warn!(width, height, "frame size changed, re-initializing adaptive model");
            }
            self.initiate(frame);
            return GrayImage::new(width, height);
        }
        let (Some(mean), Some(variance)) = (self.mean.as_mut(), self.variance.as_mut()) else {
            return GrayImage::new(width, height);
        };

        let cfg = &self.config;
        let mut mask = GrayImage::new(width, height);
        for (x, y, Luma([value])) in frame.enumerate_pixels() {
            let idx = [y as usize, x as usize];
            let diff = *value as f32 - mean[idx];
            let dist2 = diff * diff;

            if dist2 > cfg.var_threshold * variance[idx] {
                mask.put_pixel(x, y, Luma([255]));
            }

            mean[idx] += cfg.learning_rate * diff;
            variance[idx] = (variance[idx] + cfg.learning_rate * (dist2 - variance[idx]))
                .clamp(cfg.var_min, cfg.var_max);
        }
        mask
    }

    fn initiate(&mut self, frame: &GrayImage) {
        let (width, height) = frame.dimensions();
        let shape = (height as usize, width as usize);
        let mean = Array2::from_shape_fn(shape, |(y, x)| frame.get_pixel(x as u32, y as u32)[0] as f32);
        self.mean = Some(mean);
        self.variance = Some(Array2::from_elem(shape, self.config.var_init));
    }
}
