//! Pairwise time-conflict detection.
//!
//! Lecture and lab blocks are not distinguished here: a section's
//! combined meeting times either collide with another section's or
//! they don't. Telling lecture from lab is a display concern.

use crate::models::ScheduleEntry;

/// Whether any meeting block of `a` overlaps any meeting block of `b`.
pub fn entries_conflict(a: &ScheduleEntry, b: &ScheduleEntry) -> bool {
    a.blocks().any(|x| b.blocks().any(|y| x.overlaps(y)))
}

/// Whether any unordered pair of entries conflicts.
///
/// Pairwise O(n²) over the schedule size, which equals the number of
/// selected courses and stays small in practice.
pub fn has_conflict(entries: &[ScheduleEntry]) -> bool {
    first_conflict(entries).is_some()
}

/// Finds the first conflicting pair, as indices into `entries`.
///
/// Lets a host report which two courses collide rather than only that
/// some collision exists.
pub fn first_conflict(entries: &[ScheduleEntry]) -> Option<(usize, usize)> {
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            if entries_conflict(&entries[i], &entries[j]) {
                return Some((i, j));
            }
        }
    }
    None
}
