//! Text and JSON renderings of decoded files.

use serde::Serialize;
use smfnotes::{Decoded, Diagnostic, Header, Note, TrackSummary};
use std::fmt::Write;

/// Column header for [`note_line`].
pub const TABLE_HEADER: &str = "ticks     note octave duration track channel";

/// One fixed-width row: start tick, name, octave, duration, track, channel.
pub fn note_line(note: &Note) -> String {
    let label = note.label();
    format!(
        "{:07}:  {:<4} {:<5}     {:05}    {:02}      {:02}",
        note.start_tick,
        label.name,
        label.octave,
        note.duration(),
        note.track,
        note.channel
    )
}

pub fn table(notes: &[Note], header: bool) -> String {
    let mut out = String::new();
    if header {
        out.push_str(TABLE_HEADER);
        out.push('\n');
    }
    for note in notes {
        out.push_str(&note_line(note));
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
struct NoteView {
    start_tick: u32,
    end_tick: u32,
    duration: u32,
    pitch: u8,
    name: &'static str,
    octave: u8,
    track: u32,
    channel: u8,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        let label = note.label();
        NoteView {
            start_tick: note.start_tick,
            end_tick: note.end_tick,
            duration: note.duration(),
            pitch: note.pitch,
            name: label.name,
            octave: label.octave,
            track: note.track,
            channel: note.channel,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    header: &'a Header,
    tracks: &'a [TrackSummary],
    notes: Vec<NoteView>,
    diagnostics: &'a [Diagnostic],
}

pub fn json(decoded: &Decoded) -> serde_json::Result<String> {
    let report = Report {
        header: &decoded.header,
        tracks: &decoded.tracks,
        notes: decoded.notes.iter().map(NoteView::from).collect(),
        diagnostics: &decoded.diagnostics,
    };
    serde_json::to_string_pretty(&report)
}

/// Header fields followed by one line per processed track segment.
pub fn header_summary(decoded: &Decoded) -> String {
    let header = &decoded.header;
    let mut out = String::new();

    let _ = writeln!(out, "length:   {}", header.data_length);
    let _ = writeln!(
        out,
        "format:   {} ({})",
        header.format,
        header.format_name()
    );
    let _ = writeln!(out, "tracks:   {}", header.track_count);
    match header.division {
        Some(division) if division & 0x8000 == 0 => {
            let _ = writeln!(out, "division: {division} ticks per quarter note");
        }
        Some(division) => {
            let _ = writeln!(out, "division: {division:#06x} (SMPTE)");
        }
        None => {
            let _ = writeln!(out, "division: -");
        }
    }

    for track in &decoded.tracks {
        let _ = writeln!(
            out,
            "track {:02}: {} bytes, {} notes{}",
            track.number,
            track.byte_len,
            track.note_count,
            if track.aborted { ", aborted" } else { "" }
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use smfnotes::{decode, DecodeOptions};

    fn note(start_tick: u32, end_tick: u32, pitch: u8, track: u32, channel: u8) -> Note {
        Note {
            start_tick,
            end_tick,
            pitch,
            track,
            channel,
        }
    }

    #[test]
    fn table_row_layout() {
        assert_eq!(
            note_line(&note(0, 480, 60, 1, 1)),
            "0000000:  C    4         00480    01      01"
        );
        assert_eq!(
            note_line(&note(1920, 2160, 70, 12, 10)),
            "0001920:  A#   4         00240    12      10"
        );
        assert_eq!(
            note_line(&note(5, 6, 10, 2, 3)),
            "0000005:  N/A  99        00001    02      03"
        );
    }

    #[test]
    fn table_header_is_optional() {
        let notes = [note(0, 480, 60, 1, 1)];
        assert!(table(&notes, true).starts_with(TABLE_HEADER));
        assert_eq!(table(&notes, false).lines().count(), 1);
        assert_eq!(table(&[], true), format!("{TABLE_HEADER}\n"));
    }

    fn sample() -> Decoded {
        let bytes = [
            b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0, //
            b'M', b'T', b'r', b'k', 0, 0, 0, 13, //
            0x00, 0x90, 69, 100, 0x83, 0x60, 0x80, 69, 0, 0x00, 0xFF, 0x2F, 0x00,
        ];
        decode(&bytes, &DecodeOptions::default()).unwrap()
    }

    #[test]
    fn json_report_has_labels() {
        let value: serde_json::Value = serde_json::from_str(&json(&sample()).unwrap()).unwrap();
        let first = &value["notes"][0];
        assert_eq!(first["name"], "A");
        assert_eq!(first["octave"], 4);
        assert_eq!(first["duration"], 480);
        assert_eq!(value["header"]["division"], 480);
        assert_eq!(value["tracks"][0]["note_count"], 1);
        assert!(value["diagnostics"].as_array().unwrap().is_empty());
    }

    #[test]
    fn header_summary_lists_tracks() {
        let text = header_summary(&sample());
        assert!(text.contains("format:   0 (single track)"));
        assert!(text.contains("division: 480 ticks per quarter note"));
        assert!(text.contains("track 01: 21 bytes, 1 notes"));
    }
}
