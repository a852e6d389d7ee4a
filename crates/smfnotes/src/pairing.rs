//! Note-On / Note-Off pairing for a single track.
//!
//! Each track gets a fresh [`TrackStack`] of open notes. A Note-Off searches
//! the stack from the top for the most recent matching Note-On; entries it
//! passes over are put back in their original order, so overlapping notes
//! pair correctly even when they do not close in LIFO order.

use crate::decode::DecodeOptions;
use crate::diagnostic::{DiagnosticCollector, DiagnosticKind};
use crate::event::{classify, EventKind};
use crate::note::{Note, PartialNote};
use crate::varlen::read_varlen;
use crate::{DecodeError, Result};
use serde::{Deserialize, Serialize};

/// Which open Note-On a Note-Off may close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Same channel and same pitch
    #[default]
    ChannelAndPitch,
    /// Same pitch on any channel; only safe for single-channel tracks
    PitchOnly,
}

impl MatchPolicy {
    pub fn matches(self, open: &PartialNote, channel: u8, pitch: u8) -> bool {
        match self {
            MatchPolicy::ChannelAndPitch => open.pitch == pitch && open.channel == channel,
            MatchPolicy::PitchOnly => open.pitch == pitch,
        }
    }

    /// Name as written in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchPolicy::ChannelAndPitch => "channel_and_pitch",
            MatchPolicy::PitchOnly => "pitch_only",
        }
    }
}

/// What happens to Note-Ons still open at end of track. Both report them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    #[default]
    Discard,
    /// Emit the note, ending at the end-of-track tick
    CloseAtTrackEnd,
}

impl DanglingPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DanglingPolicy::Discard => "discard",
            DanglingPolicy::CloseAtTrackEnd => "close_at_track_end",
        }
    }
}

/// Open notes of one track, last in first out.
#[derive(Debug, Default)]
pub struct TrackStack {
    entries: Vec<PartialNote>,
}

impl TrackStack {
    pub fn new() -> Self {
        TrackStack::default()
    }

    pub fn push(&mut self, note: PartialNote) {
        self.entries.push(note);
    }

    pub fn pop(&mut self) -> Option<PartialNote> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Open notes from bottom to top.
    pub fn entries(&self) -> &[PartialNote] {
        &self.entries
    }

    /// Remove the topmost entry matching `channel`/`pitch` under `policy`.
    ///
    /// Entries above the match are popped into a holding area while
    /// searching and pushed back afterwards, bottom-most first. With no
    /// match the stack is left exactly as it was.
    pub fn take_match(&mut self, channel: u8, pitch: u8, policy: MatchPolicy) -> Option<PartialNote> {
        let mut held = Vec::new();
        let mut found = None;

        while let Some(open) = self.pop() {
            if policy.matches(&open, channel, pitch) {
                found = Some(open);
                break;
            }
            held.push(open);
        }

        while let Some(open) = held.pop() {
            self.push(open);
        }

        found
    }

    /// Empty the stack, yielding entries bottom to top.
    pub fn drain(&mut self) -> impl Iterator<Item = PartialNote> + '_ {
        self.entries.drain(..)
    }
}

/// Pairing state for one track: its open-note stack, running tick and
/// completed notes.
#[derive(Debug)]
pub struct TrackPairing<'a> {
    track: u32,
    options: &'a DecodeOptions,
    stack: TrackStack,
    current_tick: u32,
    notes: Vec<Note>,
}

impl<'a> TrackPairing<'a> {
    pub fn new(track: u32, options: &'a DecodeOptions) -> Self {
        TrackPairing {
            track,
            options,
            stack: TrackStack::new(),
            current_tick: 0,
            notes: Vec::new(),
        }
    }

    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    pub fn stack(&self) -> &TrackStack {
        &self.stack
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Walk `events` (delta-time, event)* up to and including end-of-track.
    ///
    /// Structural errors stop the walk; notes completed so far stay
    /// available through [`TrackPairing::abandon`].
    pub fn run(&mut self, events: &[u8], diagnostics: &mut DiagnosticCollector) -> Result<()> {
        let mut cursor = 0;

        loop {
            if cursor >= events.len() {
                return Err(DecodeError::MissingEndOfTrack);
            }

            let (delta, width) = read_varlen(events, cursor)?;
            self.current_tick = self.current_tick.saturating_add(delta);
            cursor += width;

            let event = classify(events, cursor)?;
            cursor += event.bytes.len();

            match event.kind {
                EventKind::EndOfTrack => return Ok(()),
                EventKind::NoteOn {
                    channel,
                    pitch,
                    velocity: 0,
                } if self.options.zero_velocity_note_off => {
                    self.note_off(channel, pitch, diagnostics);
                }
                EventKind::NoteOn { channel, pitch, .. } => self.note_on(channel, pitch),
                EventKind::NoteOff { channel, pitch, .. } => {
                    self.note_off(channel, pitch, diagnostics);
                }
                _ => {}
            }
        }
    }

    pub fn note_on(&mut self, channel: u8, pitch: u8) {
        self.stack.push(PartialNote {
            start_tick: self.current_tick,
            pitch,
            track: self.track,
            channel,
        });
    }

    /// Close the matching open note, or report an unmatched Note-Off.
    pub fn note_off(&mut self, channel: u8, pitch: u8, diagnostics: &mut DiagnosticCollector) {
        match self.stack.take_match(channel, pitch, self.options.matching) {
            Some(open) => {
                self.notes
                    .push(Note::close(&open, self.current_tick, self.track, channel));
            }
            None => diagnostics.warning_at(
                DiagnosticKind::UnmatchedNoteOff,
                self.current_tick,
                format!("Note-Off for pitch {pitch} on channel {channel} has no open Note-On"),
            ),
        }
    }

    /// Finish a track that reached end-of-track, applying the dangling policy.
    pub fn finish(mut self, diagnostics: &mut DiagnosticCollector) -> Vec<Note> {
        let end_tick = self.current_tick;

        for open in self.stack.drain() {
            diagnostics.warning_at(
                DiagnosticKind::DanglingNoteOn,
                open.start_tick,
                format!(
                    "Note-On for pitch {} on channel {} still open at end of track (tick {})",
                    open.pitch, open.channel, end_tick
                ),
            );

            if self.options.dangling == DanglingPolicy::CloseAtTrackEnd {
                self.notes
                    .push(Note::close(&open, end_tick, open.track, open.channel));
            }
        }

        self.notes
    }

    /// Give up on a track that hit a structural error.
    ///
    /// Returns the notes completed so far and how many open notes were dropped.
    pub fn abandon(self) -> (Vec<Note>, usize) {
        (self.notes, self.stack.len())
    }
}
