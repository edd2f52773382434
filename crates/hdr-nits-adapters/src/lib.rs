//! HDR Nits Adapters - External adapters for hdr-nits.
//!
//! This crate provides adapters for:
//! - DPX header and payload reading
//! - Filesystem frame discovery

pub mod dpx;
pub mod fs;

pub use dpx::{read_descriptor, read_pixels, DPX_HEADER_LEN};
pub use fs::FsFrameSource;
