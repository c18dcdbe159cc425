//! Trait for camera / video frame providers.

use image::RgbImage;

/// Trait for frame capture backends.
///
/// Implement this trait to feed any camera or video decoder into a
/// [`GesturePipeline`](super::GesturePipeline).
///
/// # Example
///
/// ```ignore
/// use handtrack_rs::FrameSource;
/// use image::RgbImage;
///
/// struct Webcam {
///     // Your capture handle here
/// }
///
/// impl FrameSource for Webcam {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<RgbImage>, Self::Error> {
///         // Grab and decode the next frame
///         Ok(None)
///     }
/// }
/// ```
pub trait FrameSource {
    /// Error type for capture failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Grab the next frame.
    ///
    /// # Returns
    /// `Ok(None)` once the stream has ended.
    fn next_frame(&mut self) -> Result<Option<RgbImage>, Self::Error>;
}

/// Replays a fixed list of frames; handy for tests and offline clips.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    frames: std::collections::VecDeque<RgbImage>,
}

impl FrameQueue {
    pub fn new(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: RgbImage) {
        self.frames.push_back(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for FrameQueue {
    type Error = std::convert::Infallible;

    fn next_frame(&mut self) -> Result<Option<RgbImage>, Self::Error> {
        Ok(self.frames.pop_front())
    }
}
