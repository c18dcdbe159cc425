//! Hand gesture recognition by convex-hull finger counting.
//!
//! Each frame is cropped to a region of interest, segmented into a
//! foreground mask, and the largest foreground contour is reduced to its
//! convex hull. Hull vertices far above and away from the contour's centroid
//! are counted as fingertips, and the count (0 to 5) names the gesture.
//!
//! ```ignore
//! use handtrack_rs::{HandTracker, TrackerConfig};
//!
//! let mut tracker = HandTracker::new(TrackerConfig::default());
//! tracker.recapture_background(&background_frame)?;
//! let report = tracker.process(&frame)?;
//! if let Some(gesture) = report.gesture() {
//!     println!("{} finger(s): {}", report.fingertip_count(), gesture);
//! }
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{TrackerError, TrackerResult};
pub use integration::{
    DriverCommand, FrameQueue, FrameSource, GesturePipeline, ImageOps, ImageprocOps,
    PipelineError, SegmentationParamsBuilder,
};
pub use tracker::{
    CycleOutcome, CycleReport, CycleStage, GestureLabel, HandTracker, Roi, SegmentationMode,
    SegmentationParams, TrackerConfig,
};
