//! JSON Lines report adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use hdr_nits_core::{BatchStats, ProgressEvent, ProgressSink};
use serde::Serialize;
use tracing::{debug, warn};

/// Final summary object.
#[derive(Serialize)]
struct Summary<'a> {
    /// Timestamp of the run (ISO 8601).
    timestamp: String,
    #[serde(flatten)]
    stats: &'a BatchStats,
}

/// Writes one JSON object per frame, then a summary object.
pub struct JsonReport {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonReport {
    /// Creates a report writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a report writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

impl ProgressSink for JsonReport {
    fn on_event(&self, event: ProgressEvent) {
        let result = match event {
            ProgressEvent::FrameCompleted { report } => self.write_json(&report),
            ProgressEvent::Finished { stats } => self.write_json(&Summary {
                timestamp: iso_timestamp(),
                stats: &stats,
            }),
            _ => Ok(()),
        };
        if let Err(e) = result {
            warn!("Failed to write JSON report: {e:#}");
        }
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
