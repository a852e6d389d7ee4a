//! Configuration loading for the smfnotes tools.
//!
//! # Usage
//!
//! ```rust,no_run
//! use smfconf::SmfConfig;
//!
//! let config = SmfConfig::load().expect("Failed to load config");
//! println!("matching: {}", config.decode.matching.as_str());
//! println!("format: {}", config.output.format.as_str());
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/smfnotes/config.toml` (system)
//! 2. `~/.config/smfnotes/config.toml` (user)
//! 3. `--config <path>` if given, otherwise `./smfnotes.toml`
//! 4. Environment variables (`SMFNOTES_*`, `RUST_LOG`)
//!
//! Each file only overrides the keys it sets.
//!
//! # Example Config
//!
//! ```toml
//! [decode]
//! matching = "channel_and_pitch"
//! dangling = "discard"
//! zero_velocity_note_off = false
//!
//! [output]
//! format = "table"
//! header = true
//!
//! [telemetry]
//! log_level = "warn"
//! ```

pub mod loader;
pub mod output;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use output::{OutputConfig, OutputFormat, TelemetryConfig};

use serde::{Deserialize, Serialize};
use smfnotes::DecodeOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmfConfig {
    /// Note pairing options handed to the decoder.
    #[serde(default)]
    pub decode: DecodeOptions,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl SmfConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration, with `config_path` replacing `./smfnotes.toml`.
    ///
    /// System and user configs still load first. A `config_path` that does
    /// not exist is a [`ConfigError::FileRead`].
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = SmfConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            loader::load_from_file(&mut config, &path)?;
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Built by hand so every key shows up, defaults included
        let mut output = String::new();

        output.push_str("# smfnotes configuration\n\n");

        output.push_str("[decode]\n");
        output.push_str(&format!(
            "matching = \"{}\"\n",
            self.decode.matching.as_str()
        ));
        output.push_str(&format!(
            "dangling = \"{}\"\n",
            self.decode.dangling.as_str()
        ));
        output.push_str(&format!(
            "zero_velocity_note_off = {}\n",
            self.decode.zero_velocity_note_off
        ));

        output.push_str("\n[output]\n");
        output.push_str(&format!("format = \"{}\"\n", self.output.format.as_str()));
        output.push_str(&format!("header = {}\n", self.output.header));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!(
            "log_level = \"{}\"\n",
            self.telemetry.log_level
        ));

        output
    }
}
