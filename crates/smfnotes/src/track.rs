//! Track segmentation.
//!
//! The bytes after the header chunk are cut immediately after each
//! end-of-track marker (`FF 2F 00`), keeping the marker at the end of the
//! segment it closes. Chunk length fields are not consulted, so a literal
//! marker inside event data also ends a segment.

use crate::diagnostic::{DiagnosticCollector, DiagnosticKind};
use crate::event::END_OF_TRACK;
use crate::header::{Header, CHUNK_PREFIX_LEN};
use crate::{DecodeError, Result};

/// One track's bytes, chunk prefix included, with its output track number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSegment<'a> {
    /// 1-based; in format 1 the discarded tempo track keeps number 1.
    pub number: u32,
    pub bytes: &'a [u8],
}

impl<'a> TrackSegment<'a> {
    /// Event data following the `MTrk` tag and length.
    pub fn events(&self) -> Result<&'a [u8]> {
        self.bytes
            .get(CHUNK_PREFIX_LEN..)
            .ok_or(DecodeError::TruncatedTrackChunk {
                len: self.bytes.len(),
            })
    }
}

/// Split `body` after each end-of-track marker into at most `limit` pieces.
///
/// At most `limit - 1` cuts are made; the last piece holds whatever remains.
/// An empty remainder is not a piece.
pub fn split_after_marker(body: &[u8], limit: usize) -> Vec<&[u8]> {
    let mut pieces = Vec::new();
    if limit == 0 {
        return pieces;
    }

    let mut rest = body;
    while pieces.len() + 1 < limit {
        let Some(end) = find_marker_end(rest) else {
            break;
        };
        let (piece, tail) = rest.split_at(end);
        pieces.push(piece);
        rest = tail;
    }

    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces
}

fn find_marker_end(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(END_OF_TRACK.len())
        .position(|window| window == END_OF_TRACK)
        .map(|start| start + END_OF_TRACK.len())
}

/// Cut the file into the track segments notes are extracted from.
///
/// Format 0 expects one segment and reports otherwise; format 1 drops the
/// first (tempo) segment; format 2 keeps every segment. Unknown formats are
/// reported and read like format 2.
pub fn split_tracks<'a>(
    bytes: &'a [u8],
    header: &Header,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<TrackSegment<'a>> {
    let body = bytes.get(header.body_offset()..).unwrap_or(&[]);
    let pieces = split_after_marker(body, header.track_count as usize);

    let skip = match header.format {
        0 => {
            if pieces.len() != 1 {
                diagnostics.warning(
                    DiagnosticKind::TrackCountMismatch,
                    format!(
                        "format 0 file split into {} track segments, expected 1",
                        pieces.len()
                    ),
                );
            }
            0
        }
        1 => 1,
        2 => 0,
        other => {
            diagnostics.warning(
                DiagnosticKind::UnknownFormat,
                format!("unknown format {other}, reading tracks independently"),
            );
            0
        }
    };

    pieces
        .into_iter()
        .enumerate()
        .skip(skip)
        .map(|(index, piece)| TrackSegment {
            number: index as u32 + 1,
            bytes: piece,
        })
        .collect()
}
