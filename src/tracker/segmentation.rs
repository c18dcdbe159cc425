//! Foreground segmentation of the ROI crop.
//!
//! Each [`SegmentationMode`] has its own [`Segmenter`]; [`SegmentationEngine`]
//! owns the state that outlives a cycle (captured background, adaptive model)
//! and dispatches on the mode requested by the parameters of the cycle.

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::integration::ImageOps;
use crate::tracker::adaptive_model::{AdaptiveBackgroundModel, AdaptiveModelConfig};
use crate::tracker::params::{SegmentationMode, SegmentationParams};

/// Weights of the hybrid blend: `diff * 0.5 + hsv * 0.5 + 0.5`.
const HYBRID_ALPHA: f32 = 0.5;
const HYBRID_BETA: f32 = 0.5;
const HYBRID_GAMMA: f32 = 0.5;

/// What background differencing does when the background cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MismatchPolicy {
    /// Threshold the blurred crop on its own, without differencing
    #[default]
    Fallback,
    /// Fail the cycle until the background is recaptured
    RequireRecapture,
}

/// State persisting across cycles.
#[derive(Debug, Clone, Default)]
pub struct SegmentationState {
    pub background: Option<RgbImage>,
    pub model: AdaptiveBackgroundModel,
    pub mismatch_policy: MismatchPolicy,
}

/// One way of turning a color crop into a foreground mask.
pub trait Segmenter {
    fn segment<O: ImageOps>(
        &self,
        ops: &O,
        frame: &RgbImage,
        params: &SegmentationParams,
        state: &mut SegmentationState,
    ) -> TrackerResult<GrayImage>;
}

/// Blurred grayscale difference against the captured background.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundDiff;

impl Segmenter for BackgroundDiff {
    fn segment<O: ImageOps>(
        &self,
        ops: &O,
        frame: &RgbImage,
        params: &SegmentationParams,
        state: &mut SegmentationState,
    ) -> TrackerResult<GrayImage> {
        let sigma = params.effective_blur_sigma()?;
        let gray = ops.gaussian_blur(&ops.to_gray(frame), sigma);

        let base = match (&state.background, state.mismatch_policy) {
            (Some(bg), _) if bg.dimensions() == frame.dimensions() => {
                let bg = ops.gaussian_blur(&ops.to_gray(bg), sigma);
                ops.abs_diff(&gray, &bg)
            }
            (Some(bg), MismatchPolicy::RequireRecapture) => {
                return Err(TrackerError::BackgroundMismatch {
                    background: bg.dimensions(),
                    frame: frame.dimensions(),
                });
            }
            (None, MismatchPolicy::RequireRecapture) => {
                return Err(TrackerError::MissingBackground);
            }
            (background, MismatchPolicy::Fallback) => {
                debug!(
                    background = ?background.as_ref().map(|bg| bg.dimensions()),
                    frame = ?frame.dimensions(),
                    "background unusable, thresholding the frame alone"
                );
                gray
            }
        };

        let mask = ops.threshold(&base, params.sensitivity);
        Ok(ops.open(&mask, params.opening_radius))
    }
}

/// Pixels whose HSV value falls inside the configured window.
#[derive(Debug, Clone, Copy, Default)]
pub struct HsvRange;

impl Segmenter for HsvRange {
    fn segment<O: ImageOps>(
        &self,
        ops: &O,
        frame: &RgbImage,
        params: &SegmentationParams,
        _state: &mut SegmentationState,
    ) -> TrackerResult<GrayImage> {
        let hsv = ops.to_hsv(frame);
        Ok(ops.in_range(&hsv, params.hsv.lower, params.hsv.upper))
    }
}

/// Even blend of [`BackgroundDiff`] and [`HsvRange`].
///
/// The blend is tri-level: 0 where neither mode fires, 128 where one does,
/// 255 where both do. Contour extraction treats any non-zero pixel as
/// foreground, so the hand is the union of both masks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hybrid;

impl Segmenter for Hybrid {
    fn segment<O: ImageOps>(
        &self,
        ops: &O,
        frame: &RgbImage,
        params: &SegmentationParams,
        state: &mut SegmentationState,
    ) -> TrackerResult<GrayImage> {
        let diff = BackgroundDiff.segment(ops, frame, params, state)?;
        let hsv = HsvRange.segment(ops, frame, params, state)?;
        Ok(ops.add_weighted(&diff, HYBRID_ALPHA, &hsv, HYBRID_BETA, HYBRID_GAMMA))
    }
}

/// Foreground mask of the running background model; learns on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveModel;

impl Segmenter for AdaptiveModel {
    fn segment<O: ImageOps>(
        &self,
        ops: &O,
        frame: &RgbImage,
        _params: &SegmentationParams,
        state: &mut SegmentationState,
    ) -> TrackerResult<GrayImage> {
        Ok(state.model.apply(&ops.to_gray(frame)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SegmentationEngine {
    state: SegmentationState,
}

impl SegmentationEngine {
    pub fn new(model_config: AdaptiveModelConfig, mismatch_policy: MismatchPolicy) -> Self {
        Self {
            state: SegmentationState {
                background: None,
                model: AdaptiveBackgroundModel::new(model_config),
                mismatch_policy,
            },
        }
    }

    /// Replace the background reference with an ROI crop.
    pub fn set_background(&mut self, crop: RgbImage) {
        info!(width = crop.width(), height = crop.height(), "background captured");
        self.state.background = Some(crop);
    }

    pub fn background(&self) -> Option<&RgbImage> {
        self.state.background.as_ref()
    }

    pub fn model(&self) -> &AdaptiveBackgroundModel {
        &self.state.model
    }

    pub fn reset_model(&mut self) {
        info!("adaptive background model reset");
        self.state.model.reset();
    }

    pub fn mismatch_policy(&self) -> MismatchPolicy {
        self.state.mismatch_policy
    }

    pub fn set_mismatch_policy(&mut self, policy: MismatchPolicy) {
        self.state.mismatch_policy = policy;
    }

    /// Compute the foreground mask of `frame` with the mode in `params`.
    pub fn segment<O: ImageOps>(
        &mut self,
        ops: &O,
        frame: &RgbImage,
        params: &SegmentationParams,
    ) -> TrackerResult<GrayImage> {
        let state = &mut self.state;
        match params.mode {
            SegmentationMode::BackgroundDiff => BackgroundDiff.segment(ops, frame, params, state),
            SegmentationMode::HsvRange => HsvRange.segment(ops, frame, params, state),
            SegmentationMode::Hybrid => Hybrid.segment(ops, frame, params, state),
            SegmentationMode::AdaptiveModel => AdaptiveModel.segment(ops, frame, params, state),
        }
    }
}
