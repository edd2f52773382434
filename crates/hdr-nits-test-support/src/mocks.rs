//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use hdr_nits_core::ports::{FrameSource, ProgressEvent, ProgressSink};
use hdr_nits_core::{BatchStats, FrameDescriptor, FrameError, FrameReport};

use crate::builders::SyntheticFrame;

/// Mock implementation of `FrameSource` for testing.
///
/// Yields pre-built frames in order and records which payloads were loaded.
pub struct MockFrameSource {
    frames: Vec<SyntheticFrame>,
    loaded: Arc<Mutex<Vec<String>>>,
}

impl MockFrameSource {
    /// Creates a new mock source with the given frames.
    #[must_use]
    pub fn new(frames: Vec<SyntheticFrame>) -> Self {
        Self {
            frames,
            loaded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the identifiers of frames whose pixels were loaded, in order.
    #[must_use]
    pub fn loaded(&self) -> Vec<String> {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn find(&self, frame: &str) -> Result<&SyntheticFrame, FrameError> {
        self.frames.iter().find(|f| f.id == frame).ok_or_else(|| {
            FrameError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such frame: {frame}"),
            ))
        })
    }
}

impl FrameSource for MockFrameSource {
    fn frames(&self) -> Box<dyn Iterator<Item = Result<String, FrameError>> + Send + '_> {
        Box::new(self.frames.iter().map(|f| Ok(f.id.clone())))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.frames.len())
    }

    fn descriptor(&self, frame: &str) -> Result<FrameDescriptor, FrameError> {
        self.find(frame).map(|f| f.descriptor.clone())
    }

    fn load_pixels(
        &self,
        frame: &str,
        _descriptor: &FrameDescriptor,
    ) -> Result<Vec<u8>, FrameError> {
        let pixels = self.find(frame)?.pixels.clone();
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(frame.to_owned());
        Ok(pixels)
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the per-frame reports, in order.
    #[must_use]
    pub fn reports(&self) -> Vec<FrameReport> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::FrameCompleted { report } => Some(report),
                _ => None,
            })
            .collect()
    }

    /// Returns the frame and reason of the `Aborted` event, if any.
    #[must_use]
    pub fn aborted(&self) -> Option<(String, String)> {
        self.events().into_iter().find_map(|e| match e {
            ProgressEvent::Aborted { frame, reason } => Some((frame, reason)),
            _ => None,
        })
    }

    /// Returns the final statistics from the `Finished` event, if any.
    #[must_use]
    pub fn finished(&self) -> Option<BatchStats> {
        self.events().into_iter().find_map(|e| match e {
            ProgressEvent::Finished { stats } => Some(stats),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
