//! Frame source port for discovering and reading frames.

use crate::domain::{FrameDescriptor, FrameError};

/// Port for discovering frames and reading their headers and pixel data.
pub trait FrameSource: Send + Sync {
    /// Returns the frame identifiers in processing order.
    ///
    /// Each call restarts the sequence.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if discovery fails.
    fn frames(&self) -> Box<dyn Iterator<Item = Result<String, FrameError>> + Send + '_>;

    /// Returns the total number of frames, if known.
    fn count_hint(&self) -> Option<usize>;

    /// Reads the header fields of a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be read or is not a supported container.
    fn descriptor(&self, frame: &str) -> Result<FrameDescriptor, FrameError>;

    /// Reads the pixel payload of a frame into a fresh buffer.
    ///
    /// The buffer holds exactly `rows * width * 4` bytes starting at the
    /// descriptor's data offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be read in full.
    fn load_pixels(&self, frame: &str, descriptor: &FrameDescriptor)
        -> Result<Vec<u8>, FrameError>;
}
