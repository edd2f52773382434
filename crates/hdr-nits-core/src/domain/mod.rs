//! Core domain types for HDR luminance analysis.

mod code;
mod descriptor;
mod error;
mod stats;

pub use code::LegalCode;
pub use descriptor::{ByteOrder, FrameDescriptor, DPX_MAGIC_BE, DPX_MAGIC_LE};
pub use error::{FrameError, SUPPORTED_PROFILE};
pub use stats::{BatchStats, FrameReport, FrameStats};
