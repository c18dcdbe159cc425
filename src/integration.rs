//! Integration module for connecting the tracker to its collaborators.
//!
//! This module provides the traits the tracker is driven through: the image
//! primitives it runs on ([`ImageOps`]), the frames it consumes
//! ([`FrameSource`]), and a pipeline tying both to a
//! [`HandTracker`](crate::tracker::HandTracker).

mod builder;
mod frame_source;
mod image_ops;
mod imageproc_ops;
mod pipeline;

pub use builder::SegmentationParamsBuilder;
pub use frame_source::{FrameQueue, FrameSource};
pub use image_ops::{ImageOps, Moments, RawDefect};
pub use imageproc_ops::ImageprocOps;
pub use pipeline::{DriverCommand, GesturePipeline, PipelineError};
