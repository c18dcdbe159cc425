//! Per-frame hand tracking cycle.

use image::{GrayImage, RgbImage};
use imageproc::point::Point;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TrackerResult;
use crate::integration::{ImageOps, ImageprocOps};
use crate::tracker::adaptive_model::AdaptiveModelConfig;
use crate::tracker::contour::{self, Contour};
use crate::tracker::cycle_stage::CycleStage;
use crate::tracker::defects::{self, Defect};
use crate::tracker::fingertips::{FingertipConfig, extract_fingertips};
use crate::tracker::gesture::GestureLabel;
use crate::tracker::hull;
use crate::tracker::params::{SegmentationMode, SegmentationParams};
use crate::tracker::roi::Roi;
use crate::tracker::segmentation::{MismatchPolicy, SegmentationEngine};

/// Configuration for the HandTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub roi: Roi,
    pub segmentation: SegmentationParams,
    pub adaptive_model: AdaptiveModelConfig,
    pub fingertips: FingertipConfig,
    /// Minimum depth (pixels) for a convexity defect to be marked
    pub depth_threshold: f32,
    pub mismatch_policy: MismatchPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            roi: Roi::default(),
            segmentation: SegmentationParams::default(),
            adaptive_model: AdaptiveModelConfig::default(),
            fingertips: FingertipConfig::default(),
            depth_threshold: 10.0,
            mismatch_policy: MismatchPolicy::default(),
        }
    }
}

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The mask held no foreground region
    NoHand,
    /// The dominant contour encloses no area, so it has no centroid
    DegenerateGeometry,
    Classified {
        fingertip_count: usize,
        gesture: GestureLabel,
    },
}

/// Everything one cycle computed, for classification and overlays.
///
/// Coordinates are relative to the ROI.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub roi: Roi,
    pub mask: GrayImage,
    pub stage: CycleStage,
    pub contour: Option<Contour>,
    pub hull: Vec<Point<i32>>,
    pub centroid: Option<Point2<f64>>,
    pub fingertips: Vec<Point<i32>>,
    pub defects: Vec<Defect>,
    pub outcome: CycleOutcome,
}

impl CycleReport {
    fn new(roi: Roi, mask: GrayImage) -> Self {
        Self {
            roi,
            mask,
            stage: CycleStage::Segmented,
            contour: None,
            hull: Vec::new(),
            centroid: None,
            fingertips: Vec::new(),
            defects: Vec::new(),
            outcome: CycleOutcome::NoHand,
        }
    }

    pub fn is_hand_detected(&self) -> bool {
        self.contour.is_some()
    }

    pub fn fingertip_count(&self) -> usize {
        self.fingertips.len()
    }

    pub fn gesture(&self) -> Option<GestureLabel> {
        match self.outcome {
            CycleOutcome::Classified { gesture, .. } => Some(gesture),
            _ => None,
        }
    }
}

/// Hand tracker holding the state that persists between frames.
///
/// Configuration may be changed freely between calls to
/// [`process`](Self::process); taking `&mut self` keeps a recapture from
/// interleaving with a running cycle.
pub struct HandTracker<O: ImageOps = ImageprocOps> {
    config: TrackerConfig,
    engine: SegmentationEngine,
    ops: O,
}

impl HandTracker<ImageprocOps> {
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_ops(config, ImageprocOps::new())
    }
}

impl<O: ImageOps> HandTracker<O> {
    pub fn with_ops(config: TrackerConfig, ops: O) -> Self {
        let engine = SegmentationEngine::new(config.adaptive_model.clone(), config.mismatch_policy);
        Self {
            config,
            engine,
            ops,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn roi(&self) -> Roi {
        self.config.roi
    }

    pub fn set_roi(&mut self, roi: Roi) {
        if roi != self.config.roi {
            info!(x = roi.x, y = roi.y, width = roi.width, height = roi.height, "ROI changed");
        }
        self.config.roi = roi;
    }

    pub fn mode(&self) -> SegmentationMode {
        self.config.segmentation.mode
    }

    pub fn set_mode(&mut self, mode: SegmentationMode) {
        if mode != self.config.segmentation.mode {
            info!(mode = mode.as_str(), "segmentation mode changed");
        }
        self.config.segmentation.mode = mode;
    }

    pub fn segmentation_params(&self) -> &SegmentationParams {
        &self.config.segmentation
    }

    pub fn set_segmentation_params(&mut self, params: SegmentationParams) {
        self.set_mode(params.mode);
        self.config.segmentation = params;
    }

    pub fn fingertip_config_mut(&mut self) -> &mut FingertipConfig {
        &mut self.config.fingertips
    }

    pub fn set_depth_threshold(&mut self, depth_threshold: f32) {
        self.config.depth_threshold = depth_threshold;
    }

    pub fn set_mismatch_policy(&mut self, policy: MismatchPolicy) {
        self.config.mismatch_policy = policy;
        self.engine.set_mismatch_policy(policy);
    }

    pub fn background(&self) -> Option<&RgbImage> {
        self.engine.background()
    }

    /// Capture the current ROI of `frame` as the new background reference.
    pub fn recapture_background(&mut self, frame: &RgbImage) -> TrackerResult<()> {
        let crop = self.config.roi.crop(frame)?;
        self.engine.set_background(crop);
        Ok(())
    }

    /// Forget everything the adaptive model has learned.
    pub fn reset_adaptive_model(&mut self) {
        self.engine.reset_model();
    }

    /// Run one full cycle on a camera frame.
    pub fn process(&mut self, frame: &RgbImage) -> TrackerResult<CycleReport> {
        let roi = self.config.roi;
        let crop = roi.crop(frame)?;
        let mask = self
            .engine
            .segment(&self.ops, &crop, &self.config.segmentation)?;
        let mut report = CycleReport::new(roi, mask);

        // Step 1: Dominant contour
        let Some(dominant) = contour::select_dominant(&self.ops, &report.mask) else {
            debug!("no contour in mask, no hand");
            return Ok(report);
        };
        report.stage = CycleStage::Contoured;

        // Step 2: Hull and centroid
        let analysis = hull::analyze(&self.ops, &dominant);
        report.hull = analysis.hull;
        report.centroid = analysis.centroid;
        report.stage = CycleStage::Hulled;

        // Step 3: Defects, independent of classification
        report.defects = defects::annotate(&self.ops, &dominant, self.config.depth_threshold);

        // Step 4: Fingertips and gesture
        report.outcome = match report.centroid {
            Some(centroid) => {
                report.fingertips =
                    extract_fingertips(&report.hull, &centroid, &self.config.fingertips);
                report.stage = CycleStage::Classified;
                let fingertip_count = report.fingertips.len();
                CycleOutcome::Classified {
                    fingertip_count,
                    gesture: GestureLabel::from_count(fingertip_count),
                }
            }
            None => {
                debug!(area = dominant.area, "zero-area contour, skipping fingertips");
                CycleOutcome::DegenerateGeometry
            }
        };
        report.contour = Some(dominant);

        debug!(
            stage = ?report.stage,
            hull = report.hull.len(),
            fingertips = report.fingertips.len(),
            defects = report.defects.len(),
            "cycle complete"
        );
        Ok(report)
    }
}
