//! Decode diagnostics.
//!
//! Decoding keeps going past recoverable problems, such as a Note-Off with
//! nothing to close or a track that stops mid-event, and records what
//! happened here instead of failing the whole file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Track number as reported in note output, if the problem is track-local.
    pub track: Option<u32>,
    /// Absolute tick at which the problem was seen.
    pub tick: Option<u32>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            kind,
            message: message.into(),
            track: None,
            tick: None,
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            track: None,
            tick: None,
        }
    }

    pub fn with_track(mut self, track: u32) -> Self {
        self.track = Some(track);
        self
    }

    pub fn with_tick(mut self, tick: u32) -> Self {
        self.tick = Some(tick);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(track) = self.track {
            write!(f, " track {track:02}")?;
        }
        if let Some(tick) = self.tick {
            write!(f, " tick {tick:07}")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A track (or the whole file) could not be read to its end
    Error,
    /// Decoding continued, but some events were skipped or guessed at
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Format 0 file that did not split into exactly one track
    TrackCountMismatch,
    /// Header format outside 0..=2; tracks are read as format 2
    UnknownFormat,
    /// Note-Off with no open Note-On of the same pitch (and channel)
    UnmatchedNoteOff,
    /// Note-On still open when its track ended
    DanglingNoteOn,
    /// Track stopped early on a structural error
    TrackAborted,
}

/// Collects diagnostics during a decode, stamping the current track.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    current_track: Option<u32>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        DiagnosticCollector::default()
    }

    /// Track that subsequent diagnostics belong to (`None` for file-level).
    pub fn set_track(&mut self, track: Option<u32>) {
        self.current_track = track;
    }

    pub fn push(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.track.is_none() {
            diagnostic.track = self.current_track;
        }

        match diagnostic.severity {
            Severity::Error => tracing::error!(kind = ?diagnostic.kind, "{}", diagnostic),
            Severity::Warning => tracing::warn!(kind = ?diagnostic.kind, "{}", diagnostic),
        }

        self.diagnostics.push(diagnostic);
    }

    pub fn warning(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Diagnostic::warning(kind, message));
    }

    /// Add a warning tied to a tick on the current track
    pub fn warning_at(&mut self, kind: DiagnosticKind, tick: u32, message: impl Into<String>) {
        self.push(Diagnostic::warning(kind, message).with_tick(tick));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
