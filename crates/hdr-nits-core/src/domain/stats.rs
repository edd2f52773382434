//! Per-frame and per-batch luminance statistics.

use serde::{Deserialize, Serialize};

/// Luminance statistics of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Brightest pixel in the frame, in nits.
    pub peak_nits: f64,
    /// Average pixel luminance, in nits.
    pub mean_nits: f64,
}

/// Progress record emitted after a frame has been folded into the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Frame identifier (usually the file path).
    pub frame: String,
    /// The frame's statistics.
    #[serde(flatten)]
    pub stats: FrameStats,
    /// Whether this frame raised the global peak (maxCLL).
    pub peak_updated: bool,
    /// Whether this frame raised the global mean peak (maxFALL).
    pub mean_updated: bool,
}

/// Running maxCLL/maxFALL over a batch of frames.
///
/// Both maxima only ever increase. The first folded frame seeds both; after
/// that a frame takes over only if it strictly exceeds the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Highest per-frame peak seen so far (maxCLL), in nits.
    pub global_peak: f64,
    /// Frame that produced `global_peak`.
    pub global_peak_frame: Option<String>,
    /// Highest per-frame mean seen so far (maxFALL), in nits.
    pub global_mean_peak: f64,
    /// Frame that produced `global_mean_peak`.
    pub global_mean_peak_frame: Option<String>,
    /// Number of frames folded in.
    pub frames_processed: usize,
}

impl BatchStats {
    /// Creates empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one frame into the running maxima.
    ///
    /// Returns the progress record for the frame.
    pub fn record(&mut self, frame: &str, stats: FrameStats) -> FrameReport {
        let peak_updated =
            self.global_peak_frame.is_none() || stats.peak_nits > self.global_peak;
        if peak_updated {
            self.global_peak = stats.peak_nits;
            self.global_peak_frame = Some(frame.to_owned());
        }

        let mean_updated =
            self.global_mean_peak_frame.is_none() || stats.mean_nits > self.global_mean_peak;
        if mean_updated {
            self.global_mean_peak = stats.mean_nits;
            self.global_mean_peak_frame = Some(frame.to_owned());
        }

        self.frames_processed += 1;

        FrameReport {
            frame: frame.to_owned(),
            stats,
            peak_updated,
            mean_updated,
        }
    }

    /// Returns true if no frame has been folded in.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.frames_processed == 0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    const fn stats(peak_nits: f64, mean_nits: f64) -> FrameStats {
        FrameStats {
            peak_nits,
            mean_nits,
        }
    }

    #[test]
    fn test_first_frame_seeds_both() {
        let mut batch = BatchStats::new();
        let report = batch.record("a.dpx", stats(0.0, 0.0));

        assert!(report.peak_updated);
        assert!(report.mean_updated);
        assert_eq!(batch.global_peak_frame.as_deref(), Some("a.dpx"));
        assert_eq!(batch.global_mean_peak_frame.as_deref(), Some("a.dpx"));
        assert_eq!(batch.frames_processed, 1);
    }

    #[test]
    fn test_equal_values_do_not_take_over() {
        let mut batch = BatchStats::new();
        batch.record("a.dpx", stats(100.0, 10.0));
        let report = batch.record("b.dpx", stats(100.0, 10.0));

        assert!(!report.peak_updated);
        assert!(!report.mean_updated);
        assert_eq!(batch.global_peak_frame.as_deref(), Some("a.dpx"));
        assert_eq!(batch.global_mean_peak_frame.as_deref(), Some("a.dpx"));
    }

    #[test]
    fn test_maxima_tracked_independently() {
        let mut batch = BatchStats::new();
        batch.record("a.dpx", stats(100.0, 10.0));
        let report = batch.record("b.dpx", stats(400.0, 5.0));
        assert!(report.peak_updated);
        assert!(!report.mean_updated);

        let report = batch.record("c.dpx", stats(50.0, 20.0));
        assert!(!report.peak_updated);
        assert!(report.mean_updated);

        assert_eq!(batch.global_peak, 400.0);
        assert_eq!(batch.global_peak_frame.as_deref(), Some("b.dpx"));
        assert_eq!(batch.global_mean_peak, 20.0);
        assert_eq!(batch.global_mean_peak_frame.as_deref(), Some("c.dpx"));
        assert_eq!(batch.frames_processed, 3);
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = FrameReport {
            frame: "a.dpx".into(),
            stats: stats(1.5, 0.5),
            peak_updated: true,
            mean_updated: false,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["frame"], "a.dpx");
        assert_eq!(json["peak_nits"], 1.5);
        assert_eq!(json["mean_nits"], 0.5);
        assert_eq!(json["peak_updated"], true);
    }
}
