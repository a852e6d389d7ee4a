//! Byte builders for test MIDI files.

#![allow(dead_code)]

/// Encode a MIDI variable-length quantity.
pub fn varlen(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out.reverse();
    out
}

/// Builds one track's event data. Channels are 1-16, as in note output.
#[derive(Debug, Default)]
pub struct TrackBuilder {
    events: Vec<u8>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        TrackBuilder::default()
    }

    pub fn raw(mut self, delta: u32, bytes: &[u8]) -> Self {
        self.events.extend(varlen(delta));
        self.events.extend_from_slice(bytes);
        self
    }

    pub fn note_on(self, delta: u32, channel: u8, pitch: u8, velocity: u8) -> Self {
        self.raw(delta, &[0x90 | (channel - 1), pitch, velocity])
    }

    pub fn note_off(self, delta: u32, channel: u8, pitch: u8) -> Self {
        self.raw(delta, &[0x80 | (channel - 1), pitch, 64])
    }

    pub fn tempo(self, delta: u32, microseconds_per_beat: u32) -> Self {
        let [_, a, b, c] = microseconds_per_beat.to_be_bytes();
        self.raw(delta, &[0xFF, 0x51, 0x03, a, b, c])
    }

    pub fn end(self, delta: u32) -> Vec<u8> {
        self.raw(delta, &[0xFF, 0x2F, 0x00]).events
    }

    /// Event data without an end-of-track event.
    pub fn unterminated(self) -> Vec<u8> {
        self.events
    }
}

/// Assemble a file: header chunk plus one `MTrk` chunk per track.
pub fn smf(format: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    smf_with_count(format, tracks.len() as u16, tracks)
}

/// Like [`smf`], but with an explicit track count in the header.
pub fn smf_with_count(format: u16, track_count: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"MThd");
    buf.extend_from_slice(&6u32.to_be_bytes());
    buf.extend_from_slice(&format.to_be_bytes());
    buf.extend_from_slice(&track_count.to_be_bytes());
    buf.extend_from_slice(&480u16.to_be_bytes());

    for events in tracks {
        buf.extend_from_slice(b"MTrk");
        buf.extend_from_slice(&(events.len() as u32).to_be_bytes());
        buf.extend_from_slice(events);
    }

    buf
}
