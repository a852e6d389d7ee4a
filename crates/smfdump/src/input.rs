//! Reading MIDI bytes from disk.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Read `path` as raw SMF bytes, or as hexadecimal text when `hex_text` is set.
pub fn read_midi(path: &Path, hex_text: bool) -> Result<Vec<u8>> {
    let raw = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let bytes = if hex_text {
        decode_hex_text(&raw).with_context(|| format!("{} is not valid hex", path.display()))?
    } else {
        raw
    };

    debug!(path = %path.display(), bytes = bytes.len(), hex_text, "read input");
    Ok(bytes)
}

/// Decode hex text, ignoring all ASCII whitespace.
pub fn decode_hex_text(text: &[u8]) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(hex::decode(digits)?)
}
