//! Analyze command - compute maxCLL and maxFALL over a directory of frames.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use hdr_nits_adapters::FsFrameSource;
use hdr_nits_core::{BatchDriver, BatchStats, FrameSource, ProgressSink};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonReport, ProgressBar, TextReport};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON Lines (one object per frame, then a summary object)
    Json,
}

/// Hardcoded default values.
mod defaults {
    pub const DIR: &str = ".";
    pub const EXTENSION: &str = "dpx";
}

/// Arguments for frame analysis.
#[derive(Args, Clone, Default)]
pub struct AnalyzeArgs {
    /// Directory containing the frames (default: current directory)
    pub dir: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Frame file extension
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.input.recursive.unwrap_or(false);
        }

        if args.extension.is_none() {
            args.extension.clone_from(&config.input.extension);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }

        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }
        if !args.quiet {
            args.quiet = config.output.quiet.unwrap_or(false);
        }

        args
    }

    /// Get the frame directory with fallback to the current directory.
    fn dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::DIR))
    }

    /// Get the frame extension with fallback to `dpx`.
    fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(defaults::EXTENSION)
    }

    /// Get output format with fallback to text.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the analyze command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct AnalyzeResult {
    /// Final statistics, if the batch completed.
    pub stats: Option<BatchStats>,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    let dir = args.dir();
    info!("Analyzing frames in {}", dir.display());

    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let source = FsFrameSource::new(&dir, args.recursive).with_extension(args.extension());
    let total = source.count_hint();
    debug!("Frame count hint: {total:?}");

    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.progress);
    let text;
    let json;
    let report: &dyn ProgressSink = match args.format() {
        OutputFormat::Text => {
            text = TextReport::stdout(args.quiet);
            &text
        }
        OutputFormat::Json => {
            json = JsonReport::stdout();
            &json
        }
    };

    let driver = BatchDriver::new(&source)
        .with_sink(&progress_bar)
        .with_sink(report);

    match driver.run() {
        Ok(stats) => {
            if stats.is_empty() {
                warn!(
                    "No .{} frames found in {}",
                    args.extension(),
                    dir.display()
                );
            }
            Ok(AnalyzeResult {
                stats: Some(stats),
                exit_code: ExitCode::Success,
            })
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(AnalyzeResult {
                stats: None,
                exit_code: ExitCode::for_frame_error(&e.source),
            })
        }
    }
}
