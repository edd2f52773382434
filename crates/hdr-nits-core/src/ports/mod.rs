//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod frame_source;
mod progress;

pub use frame_source::FrameSource;
pub use progress::{ProgressEvent, ProgressSink};
