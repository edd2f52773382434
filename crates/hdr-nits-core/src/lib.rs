//! HDR Nits Core - Domain logic for HDR10 static metadata extraction
//!
//! This crate contains the pixel pipeline that turns PQ-coded, 10-bit
//! method-A packed frames into luminance statistics, the batch driver that
//! folds per-frame results into maxCLL/maxFALL, and the port traits that
//! adapters implement.

pub mod batch;
pub mod domain;
pub mod pixel;
pub mod ports;

pub use batch::{BatchDriver, BatchError};
pub use domain::{
    BatchStats, ByteOrder, FrameDescriptor, FrameError, FrameReport, FrameStats, LegalCode,
    DPX_MAGIC_BE, DPX_MAGIC_LE, SUPPORTED_PROFILE,
};
pub use ports::{FrameSource, ProgressEvent, ProgressSink};
