//! Pin filtering.
//!
//! A pin forces a specific section for a course across all displayed
//! schedules. Filtering is pure and order-preserving: the unfiltered
//! solution list stays with the caller, so pins can be re-applied or
//! lifted without re-enumerating.

use std::collections::HashMap;

use crate::models::Schedule;

/// Whether `schedule` satisfies every `(course, section)` pin.
///
/// Courses absent from the pin map are unconstrained.
pub fn schedule_matches_pins(schedule: &Schedule, pins: &HashMap<String, String>) -> bool {
    pins.iter().all(|(course, section)| {
        schedule
            .entry_for_course(course)
            .map_or(false, |e| e.section_id == *section)
    })
}

/// Narrows `solutions` to the schedules satisfying every pin.
///
/// Preserves input order; with no pins this is the identity filter.
/// The input list is never mutated.
pub fn apply_pins(solutions: &[Schedule], pins: &HashMap<String, String>) -> Vec<Schedule> {
    if pins.is_empty() {
        return solutions.to_vec();
    }

    solutions
        .iter()
        .filter(|s| schedule_matches_pins(s, pins))
        .cloned()
        .collect()
}
