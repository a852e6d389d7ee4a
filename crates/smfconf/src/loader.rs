//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, OutputFormat, SmfConfig};
use serde::de::DeserializeOwned;
use smfnotes::{DanglingPolicy, MatchPolicy};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided it replaces the local override, and is returned
/// even when missing so that loading reports it.
/// Returns paths in load order (system, user, local/cli).
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/smfnotes/config.toml");
    if system.exists() {
        files.push(system);
    }

    // User config (XDG_CONFIG_HOME or ~/.config)
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("smfnotes/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    let local = PathBuf::from("smfnotes.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Overlay the keys set in a TOML file onto `config`.
pub fn load_from_file(config: &mut SmfConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    overlay_toml(config, &contents, path)
}

/// Overlay the keys set in `contents` onto `config`. Missing keys keep their
/// current value; present keys of the wrong type or with unknown values fail.
pub fn overlay_toml(config: &mut SmfConfig, contents: &str, path: &Path) -> Result<(), ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let parse_error = |key: &str, value: &toml::Value| ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("invalid value for {key}: {value}"),
    };

    if let Some(decode) = section(&table, "decode", path)? {
        if let Some(v) = decode.get("matching") {
            config.decode.matching =
                named_value(v).ok_or_else(|| parse_error("decode.matching", v))?;
        }
        if let Some(v) = decode.get("dangling") {
            config.decode.dangling =
                named_value(v).ok_or_else(|| parse_error("decode.dangling", v))?;
        }
        if let Some(v) = decode.get("zero_velocity_note_off") {
            config.decode.zero_velocity_note_off = v
                .as_bool()
                .ok_or_else(|| parse_error("decode.zero_velocity_note_off", v))?;
        }
    }

    if let Some(output) = section(&table, "output", path)? {
        if let Some(v) = output.get("format") {
            config.output.format = named_value(v).ok_or_else(|| parse_error("output.format", v))?;
        }
        if let Some(v) = output.get("header") {
            config.output.header = v.as_bool().ok_or_else(|| parse_error("output.header", v))?;
        }
    }

    if let Some(telemetry) = section(&table, "telemetry", path)? {
        if let Some(v) = telemetry.get("log_level") {
            config.telemetry.log_level = v
                .as_str()
                .ok_or_else(|| parse_error("telemetry.log_level", v))?
                .to_string();
        }
    }

    Ok(())
}

fn section<'t>(
    table: &'t toml::Table,
    name: &str,
    path: &Path,
) -> Result<Option<&'t toml::Table>, ConfigError> {
    match table.get(name) {
        None => Ok(None),
        Some(value) => value.as_table().map(Some).ok_or_else(|| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!("[{name}] must be a table"),
        }),
    }
}

/// A unit enum variant given by its snake_case name.
fn named_value<T: DeserializeOwned>(value: &toml::Value) -> Option<T> {
    value.as_str()?;
    value.clone().try_into().ok()
}

fn named_str<T: DeserializeOwned>(value: &str) -> Option<T> {
    named_value(&toml::Value::String(value.to_string()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut SmfConfig, sources: &mut ConfigSources) {
    apply_env_overrides_from(config, sources, |key| env::var(key).ok());
}

/// Apply overrides using `lookup` in place of the process environment.
///
/// Unparseable values are skipped and not recorded as overrides.
pub fn apply_env_overrides_from(
    config: &mut SmfConfig,
    sources: &mut ConfigSources,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("SMFNOTES_MATCHING") {
        if let Some(matching) = named_str::<MatchPolicy>(&v) {
            config.decode.matching = matching;
            sources.env_overrides.push("SMFNOTES_MATCHING".to_string());
        }
    }
    if let Some(v) = lookup("SMFNOTES_DANGLING") {
        if let Some(dangling) = named_str::<DanglingPolicy>(&v) {
            config.decode.dangling = dangling;
            sources.env_overrides.push("SMFNOTES_DANGLING".to_string());
        }
    }
    if let Some(v) = lookup("SMFNOTES_ZERO_VELOCITY_NOTE_OFF") {
        if let Some(flag) = parse_bool(&v) {
            config.decode.zero_velocity_note_off = flag;
            sources
                .env_overrides
                .push("SMFNOTES_ZERO_VELOCITY_NOTE_OFF".to_string());
        }
    }

    if let Some(v) = lookup("SMFNOTES_FORMAT") {
        if let Some(format) = named_str::<OutputFormat>(&v) {
            config.output.format = format;
            sources.env_overrides.push("SMFNOTES_FORMAT".to_string());
        }
    }

    if let Some(v) = lookup("SMFNOTES_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("SMFNOTES_LOG_LEVEL".to_string());
    }
    // RUST_LOG wins over SMFNOTES_LOG_LEVEL
    if let Some(v) = lookup("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}
