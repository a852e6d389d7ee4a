//! MIDI variable-length quantities.
//!
//! Seven bits per byte, most significant group first. A set high bit means
//! another byte follows. Delta-times and SysEx/meta payload lengths use this
//! encoding.

use crate::{DecodeError, Result};

/// Longest encoding a Standard MIDI File may contain.
pub const MAX_VARLEN_BYTES: usize = 4;

/// Decode the quantity starting at `offset`.
///
/// Returns `(value, bytes_consumed)`. Fails with
/// [`DecodeError::TruncatedVarLen`] when the buffer ends mid-quantity or no
/// terminating byte appears within [`MAX_VARLEN_BYTES`].
pub fn read_varlen(bytes: &[u8], offset: usize) -> Result<(u32, usize)> {
    let mut value: u32 = 0;

    for consumed in 0..MAX_VARLEN_BYTES {
        let Some(&byte) = bytes.get(offset + consumed) else {
            return Err(DecodeError::TruncatedVarLen { offset });
        };

        value = (value << 7) | u32::from(byte & 0x7F);

        if byte & 0x80 == 0 {
            return Ok((value, consumed + 1));
        }
    }

    Err(DecodeError::TruncatedVarLen { offset })
}
