//! Header chunk (`MThd`) reading.

use crate::{DecodeError, Result};
use serde::{Deserialize, Serialize};

/// Bytes needed to read the tag, length, format and track count.
pub const HEADER_MIN_LEN: usize = 12;

/// Size of any chunk prefix: 4-byte tag plus 4-byte big-endian length.
pub const CHUNK_PREFIX_LEN: usize = 8;

/// Fields of the file header chunk.
///
/// The chunk tag is not checked; a file whose first four bytes are not
/// `MThd` is read the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Length of the header chunk's data, normally 6.
    pub data_length: u32,
    /// 0 (single track), 1 (multi-track with a tempo track) or 2 (sequential).
    pub format: u16,
    /// Number of track chunks the header announces.
    pub track_count: u16,
    /// Ticks per quarter note or SMPTE division word, when present.
    pub division: Option<u16>,
}

impl Header {
    pub fn read(bytes: &[u8]) -> Result<Self> {
        read_header(bytes)
    }

    /// Offset of the first byte after the header chunk.
    pub fn body_offset(&self) -> usize {
        CHUNK_PREFIX_LEN.saturating_add(self.data_length as usize)
    }

    pub fn format_name(&self) -> &'static str {
        match self.format {
            0 => "single track",
            1 => "multi-track",
            2 => "sequential",
            _ => "unknown",
        }
    }
}

/// Read the header fields from the start of `bytes`.
pub fn read_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_MIN_LEN {
        return Err(DecodeError::MalformedHeader { len: bytes.len() });
    }

    let data_length = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let format = u16::from_be_bytes([bytes[8], bytes[9]]);
    let track_count = u16::from_be_bytes([bytes[10], bytes[11]]);

    let division = if data_length >= 6 {
        bytes.get(12..14).map(|b| u16::from_be_bytes([b[0], b[1]]))
    } else {
        None
    };

    Ok(Header {
        data_length,
        format,
        track_count,
        division,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header_bytes(data_length: u32, format: u16, track_count: u16) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"MThd");
        buf.extend_from_slice(&data_length.to_be_bytes());
        buf.extend_from_slice(&format.to_be_bytes());
        buf.extend_from_slice(&track_count.to_be_bytes());
        buf
    }

    #[test]
    fn reads_the_three_fields() {
        let mut buf = header_bytes(6, 1, 3);
        buf.extend_from_slice(&480u16.to_be_bytes());

        let header = read_header(&buf).unwrap();
        assert_eq!(
            header,
            Header {
                data_length: 6,
                format: 1,
                track_count: 3,
                division: Some(480),
            }
        );
        assert_eq!(header.body_offset(), 14);
        assert_eq!(header.format_name(), "multi-track");
    }

    #[test]
    fn division_missing_when_buffer_stops_after_track_count() {
        let header = read_header(&header_bytes(6, 0, 1)).unwrap();
        assert_eq!(header.division, None);
        assert_eq!(header.track_count, 1);
    }

    #[test]
    fn tag_is_not_validated() {
        let mut buf = header_bytes(6, 2, 4);
        buf[..4].copy_from_slice(b"RIFF");
        let header = read_header(&buf).unwrap();
        assert_eq!(header.format, 2);
        assert_eq!(header.track_count, 4);
    }

    #[test]
    fn short_buffer_is_malformed() {
        let buf = header_bytes(6, 0, 1);
        assert_eq!(
            read_header(&buf[..11]).unwrap_err(),
            DecodeError::MalformedHeader { len: 11 }
        );
        assert_eq!(
            read_header(&[]).unwrap_err(),
            DecodeError::MalformedHeader { len: 0 }
        );
    }
}
