//! Weekday and time block models.
//!
//! Defines the atomic unit of timetable occupancy: one contiguous
//! interval of whole hours on one weekday.
//!
//! # Time Model
//! Blocks are half-open intervals `[start, end)` in whole hours. A block
//! ending at hour 10 and a block starting at hour 10 share an endpoint
//! but do not overlap.

use serde::{Deserialize, Serialize};

/// A teaching weekday.
///
/// Serialized as the two-letter lowercase codes used by the input
/// document (`"mo"` through `"fr"`). Weekends carry no teaching blocks
/// and are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    /// Monday.
    Mo,
    /// Tuesday.
    Tu,
    /// Wednesday.
    We,
    /// Thursday.
    Th,
    /// Friday.
    Fr,
}

impl Weekday {
    /// All weekdays in display order, Monday first.
    pub const ALL: [Weekday; 5] = [
        Weekday::Mo,
        Weekday::Tu,
        Weekday::We,
        Weekday::Th,
        Weekday::Fr,
    ];

    /// Two-letter wire code (`"mo"` ..).
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Mo => "mo",
            Weekday::Tu => "tu",
            Weekday::We => "we",
            Weekday::Th => "th",
            Weekday::Fr => "fr",
        }
    }

    /// Full English name for column headers (`"Monday"` ..).
    pub fn display_name(&self) -> &'static str {
        match self {
            Weekday::Mo => "Monday",
            Weekday::Tu => "Tuesday",
            Weekday::We => "Wednesday",
            Weekday::Th => "Thursday",
            Weekday::Fr => "Friday",
        }
    }
}

/// One contiguous occupied interval on one weekday.
///
/// Half-open: includes `start`, excludes `end`. The Load boundary
/// guarantees `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Weekday this block occupies.
    pub day: Weekday,
    /// First occupied hour (inclusive).
    pub start: u32,
    /// First free hour (exclusive).
    pub end: u32,
}

impl TimeBlock {
    /// Creates a new time block.
    pub fn new(day: Weekday, start: u32, end: u32) -> Self {
        Self { day, start, end }
    }

    /// Duration of this block in hours.
    #[inline]
    pub fn duration_hours(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether an hour falls within this block.
    #[inline]
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Whether two blocks overlap.
    ///
    /// Blocks overlap iff they fall on the same day and their intervals
    /// intersect. Touching endpoints do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}
