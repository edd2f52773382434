//! Human-readable report adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use hdr_nits_core::{BatchStats, FrameReport, ProgressEvent, ProgressSink};
use tracing::warn;

/// Writes one line per frame and a final maxCLL/maxFALL summary.
pub struct TextReport {
    writer: Mutex<Box<dyn Write + Send>>,
    quiet: bool,
}

impl TextReport {
    /// Creates a report writing to stdout.
    #[must_use]
    pub fn stdout(quiet: bool) -> Self {
        Self::new(Box::new(io::stdout()), quiet)
    }

    /// Creates a report writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, quiet: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            quiet,
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let Ok(mut writer) = self.writer.lock() else {
            warn!("Report writer lock poisoned");
            return;
        };
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(writer, "{line}"))
            .and_then(|()| writer.flush());
        if let Err(e) = result {
            warn!("Failed to write report: {e}");
        }
    }
}

/// Lines printed for a completed frame.
fn frame_lines(report: &FrameReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: peak {:.2} nits, mean {:.2} nits",
        report.frame, report.stats.peak_nits, report.stats.mean_nits
    )];
    if report.peak_updated {
        lines.push(format!("  new maxCLL: {:.2} nits", report.stats.peak_nits));
    }
    if report.mean_updated {
        lines.push(format!("  new maxFALL: {:.2} nits", report.stats.mean_nits));
    }
    lines
}

/// Summary line, or `None` for an empty batch.
fn summary_line(stats: &BatchStats) -> Option<String> {
    let peak_frame = stats.global_peak_frame.as_deref()?;
    let mean_frame = stats.global_mean_peak_frame.as_deref()?;
    Some(format!(
        "maxCLL {:.2} nits ({peak_frame}), maxFALL {:.2} nits ({mean_frame})",
        stats.global_peak, stats.global_mean_peak
    ))
}

impl ProgressSink for TextReport {
    fn on_event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FrameCompleted { report } if !self.quiet => {
                self.write_lines(&frame_lines(&report));
            }
            ProgressEvent::Finished { stats } => {
                if let Some(line) = summary_line(&stats) {
                    self.write_lines(&[line]);
                }
            }
            _ => {}
        }
    }
}
