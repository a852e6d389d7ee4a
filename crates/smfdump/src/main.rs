//! smfdump - print the notes of a Standard MIDI File
//!
//! Subcommands:
//! - `smfdump notes <file>` - List notes in start order
//! - `smfdump header <file>` - Show header fields and track segments
//! - `smfdump config` - Show the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use smfconf::{OutputFormat, SmfConfig};
use smfnotes::{DanglingPolicy, MatchPolicy};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod render;

#[derive(Parser)]
#[command(name = "smfdump")]
#[command(about = "Extract notes from Standard MIDI Files")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ./smfnotes.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the notes of a file in start order
    Notes {
        /// MIDI file to read
        file: PathBuf,

        /// The file holds hexadecimal text rather than raw bytes
        #[arg(long)]
        hex: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Omit the column header line in table output
        #[arg(long)]
        no_header: bool,

        /// Let a Note-Off close a Note-On on any channel
        #[arg(long)]
        pitch_only: bool,

        /// End notes still open at end of track instead of dropping them
        #[arg(long)]
        close_dangling: bool,

        /// Treat Note-On with velocity 0 as Note-Off
        #[arg(long)]
        zero_velocity_off: bool,
    },

    /// Show header fields and the track segments that were decoded
    Header {
        /// MIDI file to read
        file: PathBuf,

        /// The file holds hexadecimal text rather than raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Print the effective configuration and where it came from
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, sources) = SmfConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&config.telemetry.log_level);
    tracing::debug!(files = ?sources.files, env = ?sources.env_overrides, "configuration loaded");

    match cli.command {
        Commands::Notes {
            file,
            hex,
            format,
            no_header,
            pitch_only,
            close_dangling,
            zero_velocity_off,
        } => {
            if pitch_only {
                config.decode.matching = MatchPolicy::PitchOnly;
            }
            if close_dangling {
                config.decode.dangling = DanglingPolicy::CloseAtTrackEnd;
            }
            if zero_velocity_off {
                config.decode.zero_velocity_note_off = true;
            }
            if let Some(format) = format {
                config.output.format = format.into();
            }
            if no_header {
                config.output.header = false;
            }

            commands::notes(&commands::NotesRun {
                path: &file,
                hex_text: hex,
                options: config.decode,
                format: config.output.format,
                header: config.output.header,
            })?;
        }
        Commands::Header { file, hex } => {
            commands::header(&file, hex, &config.decode)?;
        }
        Commands::Config => {
            commands::config(&config, &sources)?;
        }
    }

    Ok(())
}
