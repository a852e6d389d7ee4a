//! Subcommand implementations.

use crate::input::read_midi;
use crate::render;
use anyhow::{Context, Result};
use smfconf::{ConfigSources, OutputFormat, SmfConfig};
use smfnotes::{decode, DecodeOptions, Decoded};
use std::path::Path;
use tracing::info;

/// Settings for the `notes` subcommand, after CLI flags are folded into config.
pub struct NotesRun<'a> {
    pub path: &'a Path,
    pub hex_text: bool,
    pub options: DecodeOptions,
    pub format: OutputFormat,
    pub header: bool,
}

fn decode_file(path: &Path, hex_text: bool, options: &DecodeOptions) -> Result<Decoded> {
    let bytes = read_midi(path, hex_text)?;
    decode(&bytes, options).with_context(|| format!("Failed to decode {}", path.display()))
}

pub fn notes(run: &NotesRun<'_>) -> Result<()> {
    let decoded = decode_file(run.path, run.hex_text, &run.options)?;

    if decoded.has_errors() {
        info!(
            errors = decoded.errors().count(),
            "some tracks were only partly decoded"
        );
    }

    match run.format {
        OutputFormat::Table => print!("{}", render::table(&decoded.notes, run.header)),
        OutputFormat::Json => println!("{}", render::json(&decoded)?),
    }

    Ok(())
}

pub fn header(path: &Path, hex_text: bool, options: &DecodeOptions) -> Result<()> {
    let decoded = decode_file(path, hex_text, options)?;
    print!("{}", render::header_summary(&decoded));
    Ok(())
}

pub fn config(config: &SmfConfig, sources: &ConfigSources) -> Result<()> {
    if sources.files.is_empty() {
        println!("# no config files found, using defaults");
    }
    for path in &sources.files {
        println!("# loaded {}", path.display());
    }
    for var in &sources.env_overrides {
        println!("# overridden by ${var}");
    }
    println!();
    print!("{}", config.to_toml());
    Ok(())
}
