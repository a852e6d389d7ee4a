//! The full pipeline: header → track segments → per-track pairing → ordering.

use crate::diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity};
use crate::header::{read_header, Header};
use crate::note::Note;
use crate::order::sort_notes;
use crate::pairing::{DanglingPolicy, MatchPolicy, TrackPairing};
use crate::track::{split_tracks, TrackSegment};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Knobs for how notes are paired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub matching: MatchPolicy,
    pub dangling: DanglingPolicy,
    /// Treat a Note-On with velocity 0 as a Note-Off.
    pub zero_velocity_note_off: bool,
}

/// Per-track outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub number: u32,
    /// Segment length including the chunk prefix and end-of-track marker
    pub byte_len: usize,
    pub note_count: usize,
    /// Track stopped on a structural error before end-of-track
    pub aborted: bool,
}

/// Result of decoding a whole file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    pub header: Header,
    pub tracks: Vec<TrackSummary>,
    /// All notes, in canonical order
    pub notes: Vec<Note>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

/// Decode a complete file held in memory.
///
/// Only a header too short to read fails the call. Everything else ends up
/// in [`Decoded::diagnostics`], and a track that cannot be read to its end
/// still contributes the notes it completed.
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Decoded> {
    let header = read_header(bytes)?;
    let mut diagnostics = DiagnosticCollector::new();

    let segments = split_tracks(bytes, &header, &mut diagnostics);

    let mut notes = Vec::new();
    let mut tracks = Vec::with_capacity(segments.len());

    for segment in &segments {
        diagnostics.set_track(Some(segment.number));
        let (track_notes, aborted) = decode_track(segment, options, &mut diagnostics);

        debug!(
            track = segment.number,
            bytes = segment.bytes.len(),
            notes = track_notes.len(),
            aborted,
            "decoded track"
        );

        tracks.push(TrackSummary {
            number: segment.number,
            byte_len: segment.bytes.len(),
            note_count: track_notes.len(),
            aborted,
        });
        notes.extend(track_notes);
    }
    diagnostics.set_track(None);

    sort_notes(&mut notes);

    info!(
        format = header.format,
        tracks = tracks.len(),
        notes = notes.len(),
        diagnostics = diagnostics.diagnostics().len(),
        "decoded {} file",
        header.format_name()
    );

    Ok(Decoded {
        header,
        tracks,
        notes,
        diagnostics: diagnostics.into_diagnostics(),
    })
}

/// Pair one track's notes with a fresh stack.
///
/// Returns the track's notes (unsorted) and whether it was aborted.
pub fn decode_track(
    segment: &TrackSegment<'_>,
    options: &DecodeOptions,
    diagnostics: &mut DiagnosticCollector,
) -> (Vec<Note>, bool) {
    let mut pairing = TrackPairing::new(segment.number, options);

    let outcome = segment
        .events()
        .and_then(|events| pairing.run(events, diagnostics));

    match outcome {
        Ok(()) => (pairing.finish(diagnostics), false),
        Err(err) => {
            let tick = pairing.current_tick();
            let (notes, dropped) = pairing.abandon();
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::TrackAborted,
                    format!("{err}; kept {} notes, dropped {dropped} open", notes.len()),
                )
                .with_tick(tick),
            );
            (notes, true)
        }
    }
}
