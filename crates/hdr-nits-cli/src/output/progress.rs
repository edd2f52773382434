//! Progress bar adapter using indicatif.

use hdr_nits_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of frames, if known
    /// * `show` - If false, the adapter ignores all events
    #[must_use]
    pub fn new(total: Option<u64>, show: bool) -> Self {
        if !show {
            return Self { bar: None };
        }

        let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }

        Self { bar: Some(bar) }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        let Some(bar) = &self.bar else {
            return;
        };

        match event {
            ProgressEvent::Started {
                frame,
                index,
                total,
            } => {
                if let Some(t) = total {
                    bar.set_length(t as u64);
                }
                bar.set_position(index as u64);
                bar.set_message(frame);
            }
            ProgressEvent::FrameCompleted { .. } => bar.inc(1),
            ProgressEvent::Aborted { frame, .. } => {
                bar.abandon_with_message(format!("aborted at {frame}"));
            }
            ProgressEvent::Finished { stats } => {
                bar.finish_with_message(format!("Done: {} frames", stats.frames_processed));
            }
        }
    }
}
