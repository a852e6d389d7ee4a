//! Canonical ordering of decoded notes.
//!
//! Among simultaneous notes the lower pitch comes first, whichever track or
//! channel produced it; track and channel only break remaining ties.

use crate::note::Note;
use std::cmp::Ordering;

/// Compare by start tick, then pitch, then track, then channel.
pub fn compare(a: &Note, b: &Note) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

/// Stable sort into canonical order.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(compare);
}

pub fn is_sorted(notes: &[Note]) -> bool {
    notes
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}
