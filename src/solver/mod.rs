//! Conflict detection, schedule enumeration, and pin filtering.
//!
//! # Algorithm
//!
//! `ScheduleEnumerator` walks the cartesian product of per-course
//! section choices depth-first, testing each complete combination for
//! pairwise time conflicts and keeping the conflict-free ones. Pins
//! then narrow the enumerated set without re-running the search.
//!
//! # Scaling
//!
//! Enumeration is exhaustive and exponential in the number of courses
//! times sections per course. That is a deliberate trade for small
//! interactive inputs, not a bug; there is no pruning during descent
//! and no optimization objective.

mod conflict;
mod enumerate;
mod filter;

pub use conflict::{entries_conflict, first_conflict, has_conflict};
pub use enumerate::{Enumeration, ScheduleEnumerator};
pub use filter::{apply_pins, schedule_matches_pins};
