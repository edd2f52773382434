//! Test support utilities for hdr-nits.
//!
//! Provides mocks, synthetic frame builders, and DPX file writers for
//! testing the luminance pipeline.
//!
//! # Example
//!
//! ```
//! use hdr_nits_test_support::{MockFrameSource, SyntheticFrameBuilder};
//!
//! // Create synthetic frames
//! let black = SyntheticFrameBuilder::uniform("black.dpx", 4, 4, 0);
//! let peak = SyntheticFrameBuilder::uniform("peak.dpx", 4, 4, 1023);
//!
//! // Create mock frame source
//! let source = MockFrameSource::new(vec![black, peak]);
//! ```

mod builders;
mod mocks;

pub use builders::{pack_word, DpxFileBuilder, SyntheticFrame, SyntheticFrameBuilder};
pub use mocks::{MockFrameSource, MockProgressSink};
