//! Schedule (solution) model.
//!
//! A schedule is one complete, conflict-free assignment of exactly one
//! section per selected course. Entries are denormalized copies of
//! their source sections so a schedule stays renderable even after the
//! course set is replaced.
//!
//! # Grid Rendering
//! Hosts render schedules as a day × hour grid. [`Schedule::entry_at`]
//! answers which entry occupies a cell and [`Schedule::occupied_hours`]
//! lists the grid's rows.

use serde::{Deserialize, Serialize};

use super::{Section, TimeBlock, Weekday};

/// One chosen section for one course within a schedule.
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Owning course name.
    pub course_name: String,
    /// Chosen section id.
    pub section_id: String,
    /// Lecture meeting blocks.
    pub lec: Vec<TimeBlock>,
    /// Lab meeting blocks.
    pub lab: Vec<TimeBlock>,
}

impl ScheduleEntry {
    /// Creates an entry from a course name and a normalized section.
    pub fn from_section(course_name: impl Into<String>, section: &Section) -> Self {
        Self {
            course_name: course_name.into(),
            section_id: section.id.clone(),
            lec: section.lec.clone(),
            lab: section.lab.clone(),
        }
    }

    /// Iterates lecture and lab blocks uniformly (lectures first).
    pub fn blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.lec.iter().chain(self.lab.iter())
    }

    /// Whether this entry occupies the given grid cell.
    pub fn occupies(&self, day: Weekday, hour: u32) -> bool {
        self.blocks().any(|b| b.day == day && b.contains_hour(hour))
    }
}

/// One complete conflict-free schedule.
///
/// Entries follow course order; immutable once produced by enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Exactly one entry per selected course, in course order.
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates a schedule from its entries.
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Finds the entry for a course.
    pub fn entry_for_course(&self, course_name: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.course_name == course_name)
    }

    /// Finds the entry occupying a day × hour grid cell.
    ///
    /// In a conflict-free schedule at most one entry occupies any cell.
    pub fn entry_at(&self, day: Weekday, hour: u32) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.occupies(day, hour))
    }

    /// Sorted distinct hours occupied by any entry, for grid rows.
    pub fn occupied_hours(&self) -> Vec<u32> {
        let mut hours: Vec<u32> = self
            .entries
            .iter()
            .flat_map(|e| e.blocks())
            .flat_map(|b| b.start..b.end)
            .collect();
        hours.sort_unstable();
        hours.dedup();
        hours
    }

    /// Number of courses in this schedule.
    pub fn course_count(&self) -> usize {
        self.entries.len()
    }
}
