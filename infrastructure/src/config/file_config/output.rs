//! `[output]` section: report format and terminal decoration

use roundtable_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// How the final report is written.
///
/// ```toml
/// [output]
/// format = "full"     # full | summary | json
/// color = true
/// progress = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report format when `--output` is not given
    pub format: Option<OutputFormat>,
    pub color: bool,
    /// Progress display on stderr while agents work
    pub progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            progress: true,
        }
    }
}

impl FileOutputConfig {
    /// `requested` (from the command line) wins over the configured format
    pub fn resolve_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }

    /// JSON reports are never colored
    pub fn color_for(&self, format: OutputFormat) -> bool {
        self.color && format != OutputFormat::Json
    }

    /// No progress for JSON reports or when `quiet` is requested
    pub fn progress_for(&self, format: OutputFormat, quiet: bool) -> bool {
        self.progress && !quiet && format != OutputFormat::Json
    }
}
