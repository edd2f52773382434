//! Batch processing: maxCLL and maxFALL over a sequence of frames.

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{BatchStats, FrameError, FrameStats};
use crate::pixel::{aggregate, validate};
use crate::ports::{FrameSource, ProgressEvent, ProgressSink};

/// A frame failure that aborted the batch.
#[derive(Debug, Error)]
#[error("{frame}: {source}")]
pub struct BatchError {
    /// Frame that failed.
    pub frame: String,
    /// Underlying frame error.
    #[source]
    pub source: FrameError,
}

/// Drives a batch of frames through validation and aggregation.
///
/// Any failing frame aborts the whole batch: statistics over an undisclosed
/// subset of frames would be misleading.
pub struct BatchDriver<'a> {
    source: &'a dyn FrameSource,
    sinks: Vec<&'a dyn ProgressSink>,
}

impl<'a> BatchDriver<'a> {
    /// Creates a driver over the given frame source.
    #[must_use]
    pub fn new(source: &'a dyn FrameSource) -> Self {
        Self {
            source,
            sinks: Vec::new(),
        }
    }

    /// Adds a progress sink.
    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Processes every frame in source order.
    ///
    /// # Errors
    ///
    /// Returns the first frame error; no later frame is read.
    pub fn run(&self) -> Result<BatchStats, BatchError> {
        let total = self.source.count_hint();
        info!("Processing {} frames", total.map_or_else(|| "?".into(), |t| t.to_string()));

        let mut batch = BatchStats::new();

        for (index, frame) in self.source.frames().enumerate() {
            let frame = match frame {
                Ok(frame) => frame,
                Err(source) => return Err(self.abort(format!("frame {index}"), source)),
            };

            self.emit(ProgressEvent::Started {
                frame: frame.clone(),
                index,
                total,
            });

            let stats = match self.process(&frame) {
                Ok(stats) => stats,
                Err(source) => return Err(self.abort(frame, source)),
            };

            let report = batch.record(&frame, stats);
            if report.peak_updated || report.mean_updated {
                debug!(
                    "{frame}: new maxima (maxCLL: {}, maxFALL: {})",
                    report.peak_updated, report.mean_updated
                );
            }
            self.emit(ProgressEvent::FrameCompleted { report });
        }

        info!(
            "Processed {} frames: maxCLL {:.2} nits, maxFALL {:.2} nits",
            batch.frames_processed, batch.global_peak, batch.global_mean_peak
        );
        self.emit(ProgressEvent::Finished {
            stats: batch.clone(),
        });

        Ok(batch)
    }

    /// Validates and aggregates one frame. The pixel buffer lives only for
    /// the duration of this call.
    fn process(&self, frame: &str) -> Result<FrameStats, FrameError> {
        let descriptor = self.source.descriptor(frame)?;
        validate(&descriptor)?;

        let pixels = self.source.load_pixels(frame, &descriptor)?;
        let stats = aggregate(&descriptor, &pixels)?;

        debug!(
            "{frame}: {}x{}, peak {:.2} nits, mean {:.2} nits",
            descriptor.width, descriptor.rows, stats.peak_nits, stats.mean_nits
        );
        Ok(stats)
    }

    fn abort(&self, frame: String, source: FrameError) -> BatchError {
        self.emit(ProgressEvent::Aborted {
            frame: frame.clone(),
            reason: source.to_string(),
        });
        BatchError { frame, source }
    }

    fn emit(&self, event: ProgressEvent) {
        for sink in &self.sinks {
            sink.on_event(event.clone());
        }
    }
}
