use crate::pitch::{self, PitchLabel};
use serde::{Deserialize, Serialize};

/// A Note-On still waiting for its Note-Off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialNote {
    pub start_tick: u32,
    pub pitch: u8,
    pub track: u32,
    /// 1-16
    pub channel: u8,
}

/// A completed note with absolute tick timing and source track/channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub start_tick: u32,
    pub end_tick: u32,
    pub pitch: u8,
    pub track: u32,
    /// 1-16
    pub channel: u8,
}

impl Note {
    /// Close `open` at `end_tick`. Track and channel come from the closing event.
    pub fn close(open: &PartialNote, end_tick: u32, track: u32, channel: u8) -> Self {
        Note {
            start_tick: open.start_tick,
            end_tick,
            pitch: open.pitch,
            track,
            channel,
        }
    }

    pub fn duration(&self) -> u32 {
        self.end_tick.saturating_sub(self.start_tick)
    }

    pub fn label(&self) -> PitchLabel {
        pitch::label(self.pitch)
    }

    /// Keys of the canonical output order: start tick, pitch, track, channel.
    pub fn sort_key(&self) -> (u32, u8, u32, u8) {
        (self.start_tick, self.pitch, self.track, self.channel)
    }
}
