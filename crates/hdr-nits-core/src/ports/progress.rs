//! Progress reporting port for UI integration.

use crate::domain::{BatchStats, FrameReport};

/// Events emitted while a batch is processed.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Processing started for a frame.
    Started {
        /// Frame identifier.
        frame: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total frames in batch, if known.
        total: Option<usize>,
    },
    /// A frame was analyzed and folded into the batch statistics.
    FrameCompleted {
        /// The per-frame record.
        report: FrameReport,
    },
    /// The batch stopped at a frame that could not be processed.
    Aborted {
        /// Frame identifier.
        frame: String,
        /// Why the frame failed.
        reason: String,
    },
    /// All frames have been processed.
    Finished {
        /// Final batch statistics.
        stats: BatchStats,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
