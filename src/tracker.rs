mod adaptive_model;
mod contour;
mod cycle_stage;
mod defects;
mod fingertips;
mod gesture;
mod hand_tracker;
mod hull;
mod params;
mod roi;
mod segmentation;

pub use adaptive_model::{AdaptiveBackgroundModel, AdaptiveModelConfig};
pub use contour::{Contour, dominant_index, select_dominant};
pub use cycle_stage::CycleStage;
pub use defects::{Defect, annotate as annotate_defects, is_simple};
pub use fingertips::{FingertipConfig, MAX_FINGERTIPS, extract_fingertips};
pub use gesture::GestureLabel;
pub use hand_tracker::{CycleOutcome, CycleReport, HandTracker, TrackerConfig};
pub use hull::{HullAnalysis, analyze as analyze_hull, centroid};
pub use params::{AUTO_BLUR_SIGMA, HsvBounds, SegmentationMode, SegmentationParams};
pub use roi::Roi;
pub use segmentation::{
    AdaptiveModel, BackgroundDiff, HsvRange, Hybrid, MismatchPolicy, SegmentationEngine,
    SegmentationState, Segmenter,
};
