//! Course models.
//!
//! A course groups the interchangeable sections a student may enroll
//! in; a course set is the full normalized input. Course names are
//! unique keys. Input order is insignificant for correctness but is
//! preserved for display.

use serde::{Deserialize, Serialize};

use super::Section;

/// A course with its enrollable sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course name (unique within a course set).
    pub name: String,
    /// Normalized sections, in input encounter order.
    pub sections: Vec<Section>,
}

impl Course {
    /// Creates a course with no sections.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Finds a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Whether this course has any sections.
    ///
    /// A course without sections is structurally valid but empties the
    /// cartesian product of any selection that includes it.
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }
}

/// The full normalized input: every course, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSet {
    /// Courses in input order.
    pub courses: Vec<Course>,
}

impl CourseSet {
    /// Creates a course set.
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Finds a course by name.
    pub fn course(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name == name)
    }

    /// Course names in display order.
    pub fn course_names(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the set holds no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
