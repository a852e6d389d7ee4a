//! Fixtures for smfdump CLI tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Format 1: an empty tempo track, then two note tracks.
///
/// Track 2 plays C4 (ch 1) and E4 (ch 2) from tick 0; track 3 plays B3 on
/// channel 1 at tick 0 and an unmatched Note-Off.
pub fn two_voice_file() -> Vec<u8> {
    let tempo: &[u8] = &[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, 0x00, 0xFF, 0x2F, 0x00];
    let voices: &[u8] = &[
        0x00, 0x90, 60, 100, // C4 on
        0x00, 0x91, 64, 100, // E4 on, channel 2
        0x83, 0x60, 0x80, 60, 64, // 480: C4 off
        0x81, 0x70, 0x81, 64, 64, // 720: E4 off
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let bass: &[u8] = &[
        0x00, 0x90, 59, 90, // B3 on
        0x60, 0x80, 59, 64, // 96: B3 off
        0x00, 0x80, 40, 64, // unmatched
        0x00, 0xFF, 0x2F, 0x00,
    ];
    smf(1, &[tempo, voices, bass])
}

pub fn smf(format: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"MThd");
    buf.extend_from_slice(&6u32.to_be_bytes());
    buf.extend_from_slice(&format.to_be_bytes());
    buf.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    buf.extend_from_slice(&480u16.to_be_bytes());
    for events in tracks {
        buf.extend_from_slice(b"MTrk");
        buf.extend_from_slice(&(events.len() as u32).to_be_bytes());
        buf.extend_from_slice(events);
    }
    buf
}

/// Write `contents` into a fresh temp dir and return both.
pub fn write_temp(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

/// The binary with configuration taken only from what the test passes.
pub fn smfdump(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("smfdump").unwrap();
    cmd.current_dir(cwd.path())
        .env("XDG_CONFIG_HOME", cwd.path().join("xdg"))
        .env("HOME", cwd.path())
        .env_remove("RUST_LOG")
        .env_remove("SMFNOTES_MATCHING")
        .env_remove("SMFNOTES_DANGLING")
        .env_remove("SMFNOTES_ZERO_VELOCITY_NOTE_OFF")
        .env_remove("SMFNOTES_FORMAT")
        .env_remove("SMFNOTES_LOG_LEVEL");
    cmd
}
