//! Presentation layer for roundtable
//!
//! This crate contains the command-line definition, console output
//! formatting, and progress display for deliberation sessions.

pub mod cli;
pub mod output;
pub mod progress;

pub use cli::commands::{Cli, OutputFormat};
pub use output::{console::ConsoleFormatter, set_color_enabled};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
