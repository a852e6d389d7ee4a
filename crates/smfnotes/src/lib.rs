//! Standard MIDI File note extraction.
//!
//! Turns the bytes of an SMF into an ordered list of notes (start and end
//! tick, pitch, track, channel) by pairing each Note-Off with the Note-On it
//! closes.
//!
//! # Example
//!
//! ```
//! use smfnotes::{decode, DecodeOptions};
//!
//! let bytes = [
//!     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
//!     b'M', b'T', b'r', b'k', 0, 0, 0, 13,
//!     0x00, 0x90, 60, 100,       // Note-On C4
//!     0x83, 0x60, 0x80, 60, 0,   // 480 ticks later, Note-Off C4
//!     0x00, 0xFF, 0x2F, 0x00,    // end of track
//! ];
//!
//! let decoded = decode(&bytes, &DecodeOptions::default()).unwrap();
//! assert_eq!(decoded.notes.len(), 1);
//! assert_eq!(decoded.notes[0].duration(), 480);
//! assert_eq!(decoded.notes[0].label().name, "C");
//! ```
//!
//! Running status is not supported; a track that relies on it stops with
//! [`DecodeError::UnsupportedRunningStatus`] instead of being misread.

pub mod decode;
pub mod diagnostic;
pub mod event;
pub mod header;
pub mod note;
pub mod order;
pub mod pairing;
pub mod pitch;
pub mod track;
pub mod varlen;

pub use decode::{decode, decode_track, DecodeOptions, Decoded, TrackSummary};
pub use diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity};
pub use event::{classify, Event, EventKind, END_OF_TRACK};
pub use header::{read_header, Header};
pub use note::{Note, PartialNote};
pub use order::sort_notes;
pub use pairing::{DanglingPolicy, MatchPolicy, TrackPairing, TrackStack};
pub use pitch::PitchLabel;
pub use track::{split_tracks, TrackSegment};
pub use varlen::read_varlen;

/// Structural decoding failures.
///
/// `MalformedHeader` fails the whole file; the others stop only the track
/// they occur in. Offsets are relative to that track's event data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("header needs at least 12 bytes, file has {len}")]
    MalformedHeader { len: usize },

    #[error("variable-length quantity at offset {offset} does not end within 4 bytes")]
    TruncatedVarLen { offset: usize },

    #[error("event at offset {offset} needs {needed} bytes, only {available} left")]
    TruncatedEvent {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("data byte {byte:#04x} at offset {offset} where a status byte was expected (running status is not supported)")]
    UnsupportedRunningStatus { offset: usize, byte: u8 },

    #[error("track data ended without an end-of-track event")]
    MissingEndOfTrack,

    #[error("track segment of {len} bytes is shorter than its chunk prefix")]
    TruncatedTrackChunk { len: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
