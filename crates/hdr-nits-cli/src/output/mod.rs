//! Output formatting for CLI.

mod json;
mod progress;
mod text;

pub use json::JsonReport;
pub use progress::ProgressBar;
pub use text::TextReport;
