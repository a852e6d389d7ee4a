//! Event classification: how many bytes an event spans and what it is.
//!
//! Lengths come from a fixed table keyed on the status byte (and, for meta
//! events, the meta type). Running status is not supported: an event that
//! starts with a data byte is rejected rather than misread.

use crate::varlen::read_varlen;
use crate::{DecodeError, Result};

/// The end-of-track meta event. Also the marker tracks are split on.
pub const END_OF_TRACK: [u8; 3] = [0xFF, 0x2F, 0x00];

/// Coarse category of a classified event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Channel is 1-16.
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    /// Channel is 1-16.
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
    /// Control change, program change, pressure, pitch bend
    ChannelVoice { status: u8 },
    /// `F0`/`F1` events with a length-prefixed payload
    SysEx,
    /// Status bytes `F2`..=`FE`
    System { status: u8 },
    Meta { kind: u8 },
    EndOfTrack,
}

/// An event's bytes (status byte first, delta-time excluded) and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
    pub bytes: &'a [u8],
    pub kind: EventKind,
}

/// Total byte length of the event whose status byte is at `offset`.
pub fn event_length(bytes: &[u8], offset: usize) -> Result<usize> {
    let Some(&status) = bytes.get(offset) else {
        return Err(DecodeError::TruncatedEvent {
            offset,
            needed: 1,
            available: 0,
        });
    };

    if status < 0x80 {
        return Err(DecodeError::UnsupportedRunningStatus {
            offset,
            byte: status,
        });
    }

    let length = match status {
        0xF0 | 0xF1 => prefixed_length(bytes, offset)?,
        0xFF => {
            let Some(&meta) = bytes.get(offset + 1) else {
                return Err(DecodeError::TruncatedEvent {
                    offset,
                    needed: 2,
                    available: bytes.len() - offset,
                });
            };
            match meta {
                0x20 => 4,
                0x2F => 3,
                0x51 => 6,
                0x54 => 8,
                0x58 => 7,
                0x00 | 0x59 => 5,
                _ => prefixed_length(bytes, offset)?,
            }
        }
        // Program Change, Channel Pressure
        s if matches!(s >> 4, 0xC | 0xD) => 2,
        _ => 3,
    };

    Ok(length)
}

/// Two leading bytes, then a variable-length payload size, then the payload.
fn prefixed_length(bytes: &[u8], offset: usize) -> Result<usize> {
    let (payload, width) = read_varlen(bytes, offset + 2)?;
    Ok(2 + width + payload as usize)
}

/// Classify the event whose status byte is at `offset`.
pub fn classify(bytes: &[u8], offset: usize) -> Result<Event<'_>> {
    let length = event_length(bytes, offset)?;
    let available = bytes.len() - offset;
    if length > available {
        return Err(DecodeError::TruncatedEvent {
            offset,
            needed: length,
            available,
        });
    }

    let data = &bytes[offset..offset + length];
    Ok(Event {
        bytes: data,
        kind: kind_of(data),
    })
}

fn kind_of(data: &[u8]) -> EventKind {
    let status = data[0];
    match status {
        0xF0 | 0xF1 => EventKind::SysEx,
        0xFF if data[1] == 0x2F => EventKind::EndOfTrack,
        0xFF => EventKind::Meta { kind: data[1] },
        0xF2..=0xFE => EventKind::System { status },
        _ => {
            let channel = (status & 0x0F) + 1;
            match (status >> 4, data) {
                (0x9, &[_, pitch, velocity]) => EventKind::NoteOn {
                    channel,
                    pitch,
                    velocity,
                },
                (0x8, &[_, pitch, velocity]) => EventKind::NoteOff {
                    channel,
                    pitch,
                    velocity,
                },
                _ => EventKind::ChannelVoice { status },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn note_events_are_three_bytes_with_one_based_channel() {
        let on = classify(&[0x90, 60, 100, 0x00], 0).unwrap();
        assert_eq!(on.bytes, &[0x90, 60, 100]);
        assert_eq!(
            on.kind,
            EventKind::NoteOn {
                channel: 1,
                pitch: 60,
                velocity: 100
            }
        );

        let off = classify(&[0x8F, 64, 0], 0).unwrap();
        assert_eq!(
            off.kind,
            EventKind::NoteOff {
                channel: 16,
                pitch: 64,
                velocity: 0
            }
        );
    }

    #[test]
    fn program_change_and_channel_pressure_are_two_bytes() {
        assert_eq!(event_length(&[0xC3, 0x05], 0).unwrap(), 2);
        assert_eq!(event_length(&[0xD0, 0x40], 0).unwrap(), 2);
    }

    #[test]
    fn other_channel_messages_are_three_bytes() {
        let cc = classify(&[0xB0, 7, 100], 0).unwrap();
        assert_eq!(cc.kind, EventKind::ChannelVoice { status: 0xB0 });

        let bend = classify(&[0xE1, 0x00, 0x40], 0).unwrap();
        assert_eq!(bend.kind, EventKind::ChannelVoice { status: 0xE1 });
    }

    #[test]
    fn fixed_length_meta_events() {
        let cases: &[(&[u8], usize)] = &[
            (&[0xFF, 0x20, 0x01, 0x00], 4),
            (&[0xFF, 0x2F, 0x00], 3),
            (&[0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20], 6),
            (&[0xFF, 0x54, 0x05, 0x60, 0x00, 0x00, 0x00, 0x00], 8),
            (&[0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08], 7),
            (&[0xFF, 0x00, 0x02, 0x00, 0x01], 5),
            (&[0xFF, 0x59, 0x02, 0x00, 0x00], 5),
        ];

        for (bytes, length) in cases {
            assert_eq!(event_length(bytes, 0).unwrap(), *length, "{bytes:02X?}");
        }
    }

    #[test]
    fn other_meta_events_use_length_prefix() {
        // Track name "Piano"
        let bytes = [0xFF, 0x03, 0x05, b'P', b'i', b'a', b'n', b'o', 0x00];
        let event = classify(&bytes, 0).unwrap();
        assert_eq!(event.bytes.len(), 8);
        assert_eq!(event.kind, EventKind::Meta { kind: 0x03 });
    }

    #[test]
    fn sysex_payload_length_is_read_after_two_bytes() {
        let bytes = [0xF0, 0x7E, 0x03, 0x01, 0x02, 0x03];
        let event = classify(&bytes, 0).unwrap();
        assert_eq!(event.bytes.len(), 6);
        assert_eq!(event.kind, EventKind::SysEx);
    }

    #[test]
    fn end_of_track_is_recognized() {
        let event = classify(&[0x00, 0xFF, 0x2F, 0x00], 1).unwrap();
        assert_eq!(event.kind, EventKind::EndOfTrack);
        assert_eq!(event.bytes, &END_OF_TRACK);
    }

    #[test]
    fn data_byte_in_status_position_is_running_status() {
        assert_eq!(
            classify(&[0x90, 60, 100, 62, 100], 3).unwrap_err(),
            DecodeError::UnsupportedRunningStatus {
                offset: 3,
                byte: 62
            }
        );
    }

    #[test]
    fn event_past_buffer_end_is_truncated() {
        assert_eq!(
            classify(&[0x90, 60], 0).unwrap_err(),
            DecodeError::TruncatedEvent {
                offset: 0,
                needed: 3,
                available: 2
            }
        );
        assert_eq!(
            classify(&[0x90, 60, 0], 3).unwrap_err(),
            DecodeError::TruncatedEvent {
                offset: 3,
                needed: 1,
                available: 0
            }
        );
        assert_eq!(
            classify(&[0xFF], 0).unwrap_err(),
            DecodeError::TruncatedEvent {
                offset: 0,
                needed: 2,
                available: 1
            }
        );
    }

    #[test]
    fn meta_length_prefix_running_off_the_end_is_truncated_varlen() {
        assert_eq!(
            classify(&[0xFF, 0x03, 0x85], 0).unwrap_err(),
            DecodeError::TruncatedVarLen { offset: 2 }
        );
    }
}
