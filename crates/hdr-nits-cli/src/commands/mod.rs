//! CLI command definitions and handlers.

pub mod analyze;

use clap::Parser;
use hdr_nits_core::FrameError;

/// HDR Nits - maxCLL and maxFALL for a directory of PQ-coded DPX frames
#[derive(Parser)]
#[command(name = "hdr-nits")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Analysis arguments (directory, output options).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every frame was analyzed.
    Success,
    /// Setup failed before any frame was read.
    Error,
    /// A frame was not a supported DPX frame; the batch was aborted.
    InvalidFrame,
    /// A frame could not be read; the batch was aborted.
    IoFailure,
}

impl ExitCode {
    /// Exit code for a frame error that aborted the batch.
    pub const fn for_frame_error(err: &FrameError) -> Self {
        if err.is_invalid_frame() {
            Self::InvalidFrame
        } else {
            Self::IoFailure
        }
    }

    /// Numeric process status.
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Error => 1,
            Self::InvalidFrame => 3,
            Self::IoFailure => 4,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}
