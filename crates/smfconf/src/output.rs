//! Output and telemetry settings for the command-line tools.

use serde::{Deserialize, Serialize};

/// How note listings are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width columns, one note per line
    #[default]
    Table,
    /// A single JSON document
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

/// Rendering of decoded notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default: table
    #[serde(default)]
    pub format: OutputFormat,

    /// Print the column header line before table output.
    /// Default: true
    #[serde(default = "OutputConfig::default_header")]
    pub header: bool,
}

impl OutputConfig {
    fn default_header() -> bool {
        true
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            header: Self::default_header(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive for stderr logs (trace, debug, info, warn, error,
    /// or a full `RUST_LOG` style directive).
    /// Default: warn
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
