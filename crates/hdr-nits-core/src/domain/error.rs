//! Errors raised while reading, validating, or aggregating a frame.

use thiserror::Error;

/// Description of the only encoding the pipeline accepts.
pub const SUPPORTED_PROFILE: &str =
    "10-bit, filled method A packing, reference range 0-1023 (full range PQ)";

/// Errors that can occur while processing a single frame.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameError {
    /// Frame encoding is not the supported profile.
    #[error("unsupported encoding: {reason}; expected {SUPPORTED_PROFILE}")]
    UnsupportedEncoding {
        /// Which check failed.
        reason: String,
    },

    /// Header is unreadable, the file is not a DPX file, or the payload is short.
    #[error("malformed container: {reason}")]
    MalformedContainer {
        /// What was wrong with the container.
        reason: String,
    },

    /// Underlying read or open failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame has no pixels.
    #[error("degenerate frame: {rows} rows x {width} pixels")]
    DegenerateFrame {
        /// Declared row count.
        rows: u32,
        /// Declared row width.
        width: u32,
    },

    /// A code outside the legal range was passed to the luminance table.
    #[error("code {0} is outside the legal range 64-940")]
    CodeOutOfRange(u16),
}

impl FrameError {
    /// Creates an [`FrameError::UnsupportedEncoding`].
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            reason: reason.into(),
        }
    }

    /// Creates a [`FrameError::MalformedContainer`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedContainer {
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the frame's content rather than I/O.
    #[must_use]
    pub const fn is_invalid_frame(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEncoding { .. }
                | Self::MalformedContainer { .. }
                | Self::DegenerateFrame { .. }
                | Self::CodeOutOfRange(_)
        )
    }
}
