//! GesturePipeline for driving the tracker from a frame source.

use image::RgbImage;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::TrackerError;
use crate::tracker::{CycleReport, HandTracker, Roi, SegmentationMode, TrackerConfig};

use super::{FrameSource, ImageOps, ImageprocOps};

/// Commands a driver (keyboard, UI) issues between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// Capture the last frame's ROI as the new background
    RecaptureBackground,
    /// Flip between background differencing and the HSV window
    ToggleMode,
    SetMode(SegmentationMode),
    /// Move the ROI; the rectangle is clamped into the last frame
    MoveRoi {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Drop the adaptive background model
    ResetModel,
}

/// Errors raised while driving the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError<E: std::error::Error + 'static> {
    #[error("frame source failed: {0}")]
    Source(#[source] E),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("no frame captured yet")]
    NoFrame,
}

/// Bundles a [`FrameSource`] with a [`HandTracker`].
///
/// Mirrors frames horizontally (selfie view) unless told otherwise, seeds the
/// background from the first frame, and applies driver commands between
/// cycles only.
pub struct GesturePipeline<S: FrameSource, O: ImageOps = ImageprocOps> {
    source: S,
    tracker: HandTracker<O>,
    mirror: bool,
    last_frame: Option<RgbImage>,
    last_fingertip_count: usize,
}

impl<S: FrameSource> GesturePipeline<S, ImageprocOps> {
    /// Create a new pipeline with the given source and tracker config.
    pub fn new(source: S, config: TrackerConfig) -> Self {
        Self::with_tracker(source, HandTracker::new(config))
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, TrackerConfig::default())
    }
}

impl<S: FrameSource, O: ImageOps> GesturePipeline<S, O> {
    pub fn with_tracker(source: S, tracker: HandTracker<O>) -> Self {
        Self {
            source,
            tracker,
            mirror: true,
            last_frame: None,
            last_fingertip_count: 0,
        }
    }

    /// Enable or disable horizontal mirroring of incoming frames.
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Grab one frame and run a cycle on it.
    ///
    /// # Returns
    /// `Ok(None)` once the source is exhausted.
    pub fn process_next(&mut self) -> Result<Option<CycleReport>, PipelineError<S::Error>> {
        let Some(mut frame) = self.source.next_frame().map_err(PipelineError::Source)? else {
            debug!("frame source exhausted");
            return Ok(None);
        };
        if self.mirror {
            image::imageops::flip_horizontal_in_place(&mut frame);
        }

        if self.last_frame.is_none() {
            let (width, height) = frame.dimensions();
            let roi = self.tracker.roi().clamp_to(width, height);
            self.tracker.set_roi(roi);
            self.tracker.recapture_background(&frame)?;
        }

        let report = self.tracker.process(&frame)?;
        if report.is_hand_detected() {
            self.last_fingertip_count = report.fingertip_count();
        }
        self.last_frame = Some(frame);
        Ok(Some(report))
    }

    /// Apply a driver command. Must be called between cycles.
    pub fn apply(&mut self, command: DriverCommand) -> Result<(), PipelineError<S::Error>> {
        match command {
            DriverCommand::RecaptureBackground => {
                let frame = self.last_frame.as_ref().ok_or(PipelineError::NoFrame)?;
                self.tracker.recapture_background(frame)?;
            }
            DriverCommand::ToggleMode => {
                let mode = self.tracker.mode().toggled();
                self.tracker.set_mode(mode);
            }
            DriverCommand::SetMode(mode) => self.tracker.set_mode(mode),
            DriverCommand::MoveRoi {
                x,
                y,
                width,
                height,
            } => {
                let mut roi = Roi::new(x, y, width, height);
                if let Some(frame) = &self.last_frame {
                    roi = roi.clamp_to(frame.width(), frame.height());
                }
                self.tracker.set_roi(roi);
            }
            DriverCommand::ResetModel => self.tracker.reset_adaptive_model(),
        }
        Ok(())
    }

    /// Run until the source ends, returning the last fingertip count.
    pub fn run(&mut self) -> Result<usize, PipelineError<S::Error>> {
        while self.process_next()?.is_some() {}
        info!(fingertips = self.last_fingertip_count, "pipeline finished");
        Ok(self.last_fingertip_count)
    }

    /// Current ROI, as reported to the operator.
    pub fn current_roi(&self) -> Roi {
        self.tracker.roi()
    }

    /// Fingertip count of the most recent cycle that found a hand.
    pub fn last_fingertip_count(&self) -> usize {
        self.last_fingertip_count
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &HandTracker<O> {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut HandTracker<O> {
        &mut self.tracker
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
