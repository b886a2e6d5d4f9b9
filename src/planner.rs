//! Interactive planning state machine.
//!
//! The [`Planner`] owns all mutable session state: the loaded course
//! set, the user's course selection and pins, both solution sets, and
//! the browse cursor. Every user action maps to one transition
//! ([`Planner::load`], [`Planner::toggle_course`], [`Planner::toggle_pin`],
//! [`Planner::navigate`]) and each runs to completion before the next
//! is processed. Transitions take `&mut self`, so they are mutually
//! exclusive by construction; there is no background computation.
//!
//! # Recompute Rules
//!
//! - Selection changes re-enumerate, then re-apply pins.
//! - Pin changes only re-filter the stored unfiltered solution set.
//! - The cursor resets to 0 whenever the displayed set changes.
//!
//! # Error Surface
//!
//! Failed transitions return a [`PlannerError`] and also record it for
//! the host's results area ([`Planner::error`]); every kind is
//! recoverable by a subsequent user action.

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use serde::Serialize;

use crate::models::{Course, CourseSet, Schedule};
use crate::normalize::SectionNormalizer;
use crate::solver::{apply_pins, ScheduleEnumerator};
use crate::validation::{parse_course_document, ValidationError};

/// A planner transition failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannerError {
    /// Error category.
    pub kind: PlannerErrorKind,
    /// Human-readable description for the host's error area.
    pub message: String,
}

/// Categories of planner errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlannerErrorKind {
    /// Malformed input document, or a transition referenced an unknown
    /// course or section. Prior state is left untouched.
    Data,
    /// The transition would have deselected every course; it was
    /// refused and prior results were kept.
    EmptySelection,
    /// Enumeration produced zero conflict-free schedules for the
    /// current selection.
    NoSolution,
    /// The active pins match zero schedules. Pins are kept as set so
    /// the user can unpin to recover.
    NoMatch,
}

impl PlannerError {
    fn new(kind: PlannerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn data(message: impl Into<String>) -> Self {
        Self::new(PlannerErrorKind::Data, message)
    }

    fn from_validation(errors: &[ValidationError]) -> Self {
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        Self::data(messages.join("; "))
    }
}

/// Per-course line of the host's selectable course list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseView {
    /// Course name.
    pub name: String,
    /// Whether the course participates in enumeration.
    pub selected: bool,
    /// Number of normalized sections.
    pub section_count: usize,
}

/// Interactive timetable planner.
///
/// # Example
/// ```
/// use timetable_solver::planner::Planner;
///
/// let input = r#"{"courses": [
///     {"name": "Algebra", "sections": [
///         {"id": "01", "lec": [{"day": "mo", "start": 9, "end": 11}], "lab": []},
///         {"id": "02", "lec": [{"day": "tu", "start": 9, "end": 11}], "lab": []}
///     ]},
///     {"name": "Physics", "sections": [
///         {"id": "01", "lec": [{"day": "we", "start": 10, "end": 12}], "lab": []}
///     ]}
/// ]}"#;
///
/// let mut planner = Planner::new();
/// planner.load(input).unwrap();
/// assert_eq!(planner.solution_count(), 2);
///
/// planner.toggle_pin("Algebra", "01").unwrap();
/// assert_eq!(planner.solution_count(), 1);
/// ```
#[derive(Debug)]
pub struct Planner {
    normalizer: SectionNormalizer,
    enumerator: ScheduleEnumerator,
    courses: Option<CourseSet>,
    selected: HashSet<String>,
    pins: HashMap<String, String>,
    all_solutions: Vec<Schedule>,
    solutions: Vec<Schedule>,
    cursor: usize,
    error: Option<PlannerError>,
}

impl Planner {
    /// Creates a planner with no course data loaded.
    pub fn new() -> Self {
        Self {
            normalizer: SectionNormalizer::new(),
            enumerator: ScheduleEnumerator::new(),
            courses: None,
            selected: HashSet::new(),
            pins: HashMap::new(),
            all_solutions: Vec::new(),
            solutions: Vec::new(),
            cursor: 0,
            error: None,
        }
    }

    /// Replaces the section normalizer (e.g. to swap the merge policy).
    pub fn with_normalizer(mut self, normalizer: SectionNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    // ======================== Transitions ========================

    /// Loads a fresh course document, replacing any prior one.
    ///
    /// On success: every course is normalized and selected, pins are
    /// cleared, solutions recomputed, cursor reset. If the fresh
    /// enumeration is empty the new state is kept and `NoSolution` is
    /// surfaced. On a parse or validation failure the prior state is
    /// left untouched and a `Data` error is surfaced.
    pub fn load(&mut self, input: &str) -> Result<(), PlannerError> {
        let document = match parse_course_document(input) {
            Ok(document) => document,
            Err(errors) => return Err(self.fail(PlannerError::from_validation(&errors))),
        };

        let courses: Vec<Course> = document
            .courses
            .iter()
            .map(|c| self.normalizer.normalize_course(&c.name, &c.sections))
            .collect();
        let course_set = CourseSet::new(courses);

        self.selected = course_set
            .courses
            .iter()
            .map(|c| c.name.clone())
            .collect();
        self.pins.clear();
        info!(
            "loaded {} courses, all selected",
            course_set.course_count()
        );
        self.courses = Some(course_set);
        self.recompute()
    }

    /// Flips whether a course participates in enumeration.
    ///
    /// Deselecting a course also lifts its pin. Deselecting the last
    /// selected course is refused with `EmptySelection`, keeping the
    /// prior results. An unknown course name is a `Data` error.
    pub fn toggle_course(&mut self, name: &str) -> Result<(), PlannerError> {
        let known = match self.courses.as_ref() {
            Some(courses) => courses.course(name).is_some(),
            None => return Err(self.fail(PlannerError::data("No course data loaded"))),
        };
        if !known {
            return Err(self.fail(PlannerError::data(format!("Unknown course: {name}"))));
        }

        if self.selected.contains(name) {
            if self.selected.len() == 1 {
                return Err(self.fail(PlannerError::new(
                    PlannerErrorKind::EmptySelection,
                    "At least one course must stay selected",
                )));
            }
            self.selected.remove(name);
            self.pins.remove(name);
            debug!("deselected course {name}");
        } else {
            self.selected.insert(name.to_string());
            debug!("selected course {name}");
        }

        self.recompute()
    }

    /// Pins a course to a section, or lifts the pin if it is already
    /// set to that section.
    ///
    /// Only re-filters the stored solution set; no re-enumeration.
    /// Pinning an unknown or deselected course, or an unknown section,
    /// is a `Data` error leaving state untouched. A pin combination
    /// matching zero schedules surfaces `NoMatch` while keeping the
    /// pins in place.
    pub fn toggle_pin(&mut self, course: &str, section: &str) -> Result<(), PlannerError> {
        let section_known = match self.courses.as_ref() {
            Some(courses) => match courses.course(course) {
                Some(found) => found.section(section).is_some(),
                None => {
                    return Err(self.fail(PlannerError::data(format!("Unknown course: {course}"))))
                }
            },
            None => return Err(self.fail(PlannerError::data("No course data loaded"))),
        };
        if !section_known {
            return Err(self.fail(PlannerError::data(format!(
                "Course '{course}' has no section '{section}'"
            ))));
        }
        if !self.selected.contains(course) {
            return Err(self.fail(PlannerError::data(format!(
                "Course '{course}' is not selected"
            ))));
        }

        if self.pins.get(course).map(String::as_str) == Some(section) {
            self.pins.remove(course);
            debug!("unpinned {course}");
        } else {
            self.pins.insert(course.to_string(), section.to_string());
            debug!("pinned {course} to section {section}");
        }

        self.refilter()
    }

    /// Moves the browse cursor by `delta`, clamped to the displayed
    /// solution range.
    ///
    /// No-op when there is nothing to browse. Returns the new cursor.
    pub fn navigate(&mut self, delta: i32) -> Option<usize> {
        if self.solutions.is_empty() {
            return None;
        }
        let max = (self.solutions.len() - 1) as i64;
        let target = self.cursor as i64 + delta as i64;
        self.cursor = target.clamp(0, max) as usize;
        Some(self.cursor)
    }

    // ======================== Views ========================

    /// Whether a course document is loaded.
    pub fn is_loaded(&self) -> bool {
        self.courses.is_some()
    }

    /// The cursor-addressed schedule, if any are displayed.
    pub fn current_schedule(&self) -> Option<&Schedule> {
        self.solutions.get(self.cursor)
    }

    /// Every course with its selection state and section count, in
    /// display order.
    pub fn courses(&self) -> Vec<CourseView> {
        self.courses
            .as_ref()
            .map(|set| {
                set.courses
                    .iter()
                    .map(|c| CourseView {
                        name: c.name.clone(),
                        selected: self.selected.contains(&c.name),
                        section_count: c.section_count(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The active pin map (course name → section id).
    pub fn pins(&self) -> &HashMap<String, String> {
        &self.pins
    }

    /// Whether a specific section is pinned for a course.
    pub fn is_pinned(&self, course: &str, section: &str) -> bool {
        self.pins.get(course).map(String::as_str) == Some(section)
    }

    /// Number of displayed (pin-filtered) solutions.
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    /// Number of solutions before pin filtering.
    pub fn total_solution_count(&self) -> usize {
        self.all_solutions.len()
    }

    /// The displayed solutions, in enumeration order.
    pub fn solutions(&self) -> &[Schedule] {
        &self.solutions
    }

    /// Current cursor position, if any solutions are displayed.
    pub fn cursor(&self) -> Option<usize> {
        if self.solutions.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Whether the cursor can step backward.
    pub fn has_prev(&self) -> bool {
        self.cursor().map_or(false, |c| c > 0)
    }

    /// Whether the cursor can step forward.
    pub fn has_next(&self) -> bool {
        self.cursor()
            .map_or(false, |c| c + 1 < self.solutions.len())
    }

    /// The most recent transition error, if the last transition failed.
    pub fn error(&self) -> Option<&PlannerError> {
        self.error.as_ref()
    }

    /// Whether the host's results area has anything to show.
    pub fn has_results(&self) -> bool {
        !self.solutions.is_empty()
    }

    // ======================== Internals ========================

    /// Re-enumerates the selected courses, then re-applies pins.
    fn recompute(&mut self) -> Result<(), PlannerError> {
        let courses = match self.courses.as_ref() {
            Some(courses) => courses,
            None => return Err(self.fail(PlannerError::data("No course data loaded"))),
        };

        let active: Vec<Course> = courses
            .courses
            .iter()
            .filter(|c| self.selected.contains(&c.name))
            .cloned()
            .collect();

        let enumeration = self.enumerator.enumerate(&active);
        debug!(
            "{} of {} combinations conflict-free",
            enumeration.solutions.len(),
            enumeration.examined
        );
        self.all_solutions = enumeration.solutions;
        self.refilter()
    }

    /// Re-applies pins to the stored solution set.
    fn refilter(&mut self) -> Result<(), PlannerError> {
        self.solutions = apply_pins(&self.all_solutions, &self.pins);
        self.cursor = 0;

        if self.all_solutions.is_empty() {
            Err(self.fail(PlannerError::new(
                PlannerErrorKind::NoSolution,
                "No valid schedules: every combination has a time conflict",
            )))
        } else if self.solutions.is_empty() {
            Err(self.fail(PlannerError::new(
                PlannerErrorKind::NoMatch,
                "No schedules match the current pins",
            )))
        } else {
            self.error = None;
            Ok(())
        }
    }

    /// Records a transition failure for the host's error area.
    fn fail(&mut self, error: PlannerError) -> PlannerError {
        warn!("{}", error.message);
        self.error = Some(error.clone());
        error
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two courses, two disjoint sections each: 4 valid schedules.
    fn disjoint_input() -> &'static str {
        r#"{"courses": [
            {"name": "Algebra", "sections": [
                {"id": "01", "lec": [{"day": "mo", "start": 9, "end": 11}], "lab": []},
                {"id": "02", "lec": [{"day": "tu", "start": 9, "end": 11}], "lab": []}
            ]},
            {"name": "Physics", "sections": [
                {"id": "01", "lec": [{"day": "we", "start": 9, "end": 11}], "lab": []},
                {"id": "02", "lec": [{"day": "th", "start": 9, "end": 11}], "lab": []}
            ]}
        ]}"#
    }

    /// Every section pairing overlaps: zero valid schedules.
    fn clashing_input() -> &'static str {
        r#"{"courses": [
            {"name": "Algebra", "sections": [
                {"id": "01", "lec": [{"day": "mo", "start": 9, "end": 11}], "lab": []}
            ]},
            {"name": "Physics", "sections": [
                {"id": "01", "lec": [{"day": "mo", "start": 10, "end": 12}], "lab": []}
            ]}
        ]}"#
    }

    fn loaded_planner() -> Planner {
        let mut planner = Planner::new();
        planner.load(disjoint_input()).unwrap();
        planner
    }

    #[test]
    fn test_load_selects_all_and_enumerates() {
        let planner = loaded_planner();
        assert!(planner.is_loaded());
        assert_eq!(planner.solution_count(), 4);
        assert_eq!(planner.total_solution_count(), 4);
        assert_eq!(planner.cursor(), Some(0));
        assert!(planner.error().is_none());
        assert!(planner.has_results());

        let views = planner.courses();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.selected));
        assert!(views.iter().all(|v| v.section_count == 2));
    }

    #[test]
    fn test_load_normalizes_split_sections() {
        let input = r#"{"courses": [
            {"name": "Chemistry", "sections": [
                {"id": "021", "lec": [{"day": "mo", "start": 9, "end": 11}], "lab": []},
                {"id": "022", "lec": [], "lab": [{"day": "we", "start": 14, "end": 16}]}
            ]}
        ]}"#;

        let mut planner = Planner::new();
        planner.load(input).unwrap();
        assert_eq!(planner.courses()[0].section_count, 1);

        let schedule = planner.current_schedule().unwrap();
        let entry = schedule.entry_for_course("Chemistry").unwrap();
        assert_eq!(entry.section_id, "02");
        assert_eq!(entry.lec.len(), 1);
        assert_eq!(entry.lab.len(), 1);
    }

    #[test]
    fn test_load_failure_keeps_prior_state() {
        let mut planner = loaded_planner();
        let err = planner.load("{broken").unwrap_err();
        assert_eq!(err.kind, PlannerErrorKind::Data);
        // Prior document and solutions are untouched
        assert_eq!(planner.solution_count(), 4);
        assert_eq!(planner.courses().len(), 2);
        assert_eq!(planner.error().unwrap().kind, PlannerErrorKind::Data);
    }

    #[test]
    fn test_load_with_no_solution_keeps_new_state() {
        let mut planner = loaded_planner();
        let err = planner.load(clashing_input()).unwrap_err();
        assert_eq!(err.kind, PlannerErrorKind::NoSolution);
        // The clashing document replaced the old one
        assert_eq!(planner.solution_count(), 0);
        assert_eq!(planner.total_solution_count(), 0);
        assert!(planner.cursor().is_none());
        assert!(!planner.has_results());
    }

    #[test]
    fn test_load_resets_pins() {
        let mut planner = loaded_planner();
        planner.toggle_pin("Algebra", "01").unwrap();
        planner.load(disjoint_input()).unwrap();
        assert!(planner.pins().is_empty());
        assert_eq!(planner.solution_count(), 4);
    }

    #[test]
    fn test_toggle_course_recomputes() {
        let mut planner = loaded_planner();
        planner.toggle_course("Physics").unwrap();
        // Only Algebra's two sections remain
        assert_eq!(planner.solution_count(), 2);
        let views = planner.courses();
        assert!(!views.iter().find(|v| v.name == "Physics").unwrap().selected);

        planner.toggle_course("Physics").unwrap();
        assert_eq!(planner.solution_count(), 4);
    }

    #[test]
    fn test_toggle_unknown_course() {
        let mut planner = loaded_planner();
        let err = planner.toggle_course("Chemistry").unwrap_err();
        assert_eq!(err.kind, PlannerErrorKind::Data);
        assert_eq!(planner.solution_count(), 4);
    }

    #[test]
    fn test_deselecting_last_course_is_refused() {
        let mut planner = loaded_planner();
        planner.toggle_course("Physics").unwrap();
        let err = planner.toggle_course("Algebra").unwrap_err();
        assert_eq!(err.kind, PlannerErrorKind::EmptySelection);
        // Refused: Algebra stays selected, results kept
        assert!(planner.courses().iter().any(|v| v.selected));
        assert_eq!(planner.solution_count(), 2);
    }

    #[test]
    fn test_deselecting_pinned_course_lifts_pin() {
        let mut planner = loaded_planner();
        planner.toggle_pin("Physics", "01").unwrap();
        assert_eq!(planner.solution_count(), 2);

        planner.toggle_course("Physics").unwrap();
        assert!(planner.pins().is_empty());
        // Recomputation proceeds over Algebra alone
        assert_eq!(planner.solution_count(), 2);
        assert!(planner
            .current_schedule()
            .unwrap()
            .entry_for_course("Physics")
            .is_none());
    }

    #[test]
    fn test_pin_narrows_without_reenumeration() {
        let mut planner = loaded_planner();
        planner.toggle_pin("Algebra", "01").unwrap();
        assert_eq!(planner.solution_count(), 2);
        assert_eq!(planner.total_solution_count(), 4); // unfiltered set intact
        for schedule in planner.solutions() {
            assert_eq!(schedule.entry_for_course("Algebra").unwrap().section_id, "01");
        }
    }

    #[test]
    fn test_pin_toggles_off() {
        let mut planner = loaded_planner();
        planner.toggle_pin("Algebra", "01").unwrap();
        assert!(planner.is_pinned("Algebra", "01"));

        planner.toggle_pin("Algebra", "01").unwrap();
        assert!(planner.pins().is_empty());
        assert_eq!(planner.solution_count(), 4);
    }

    #[test]
    fn test_pin_replaces_prior_pin() {
        let mut planner = loaded_planner();
        planner.toggle_pin("Algebra", "01").unwrap();
        planner.toggle_pin("Algebra", "02").unwrap();
        assert!(planner.is_pinned("Algebra", "02"));
        assert!(!planner.is_pinned("Algebra", "01"));
        assert_eq!(planner.pins().len(), 1);
    }

    #[test]
    fn test_conflicting_pins_surface_no_match() {
        // Pin Algebra to a section, then make it collide via input where
        // only some pairings survive
        let input = r#"{"courses": [
            {"name": "Algebra", "sections": [
                {"id": "01", "lec": [{"day": "mo", "start": 9, "end": 11}], "lab": []},
                {"id": "02", "lec": [{"day": "tu", "start": 9, "end": 11}], "lab": []}
            ]},
            {"name": "Physics", "sections": [
                {"id": "01", "lec": [{"day": "mo", "start": 10, "end": 12}], "lab": []}
            ]}
        ]}"#;
        let mut planner = Planner::new();
        planner.load(input).unwrap();
        // Only Algebra 02 + Physics 01 is conflict-free
        assert_eq!(planner.solution_count(), 1);

        let err = planner.toggle_pin("Algebra", "01").unwrap_err();
        assert_eq!(err.kind, PlannerErrorKind::NoMatch);
        // Pins stay so the user can unpin to recover
        assert!(planner.is_pinned("Algebra", "01"));
        assert_eq!(planner.solution_count(), 0);
        assert!(planner.cursor().is_none());
        assert_eq!(planner.total_solution_count(), 1);

        planner.toggle_pin("Algebra", "01").unwrap();
        assert_eq!(planner.solution_count(), 1);
        assert_eq!(planner.cursor(), Some(0));
    }

    #[test]
    fn test_pin_unknown_section() {
        let mut planner = loaded_planner();
        let err = planner.toggle_pin("Algebra", "99").unwrap_err();
        assert_eq!(err.kind, PlannerErrorKind::Data);
        assert!(planner.pins().is_empty());
    }

    #[test]
    fn test_pin_deselected_course() {
        let mut planner = loaded_planner();
        planner.toggle_course("Physics").unwrap();
        let err = planner.toggle_pin("Physics", "01").unwrap_err();
        assert_eq!(err.kind, PlannerErrorKind::Data);
        assert!(planner.pins().is_empty());
    }

    #[test]
    fn test_navigate_clamps() {
        let mut planner = loaded_planner();
        assert_eq!(planner.navigate(1), Some(1));
        assert_eq!(planner.navigate(100), Some(3)); // clamped to last
        assert!(!planner.has_next());
        assert_eq!(planner.navigate(-1), Some(2));
        assert_eq!(planner.navigate(-100), Some(0)); // clamped to first
        assert!(!planner.has_prev());
        assert!(planner.has_next());
    }

    #[test]
    fn test_navigate_on_empty_is_noop() {
        let mut planner = Planner::new();
        assert_eq!(planner.navigate(1), None);

        planner.load(clashing_input()).unwrap_err();
        assert_eq!(planner.navigate(1), None);
    }

    #[test]
    fn test_cursor_resets_on_recompute_and_refilter() {
        let mut planner = loaded_planner();
        planner.navigate(3);
        planner.toggle_pin("Algebra", "01").unwrap();
        assert_eq!(planner.cursor(), Some(0));

        planner.navigate(1);
        planner.toggle_course("Physics").unwrap();
        assert_eq!(planner.cursor(), Some(0));
    }

    #[test]
    fn test_custom_merge_policy() {
        use crate::normalize::VerbatimMerge;

        let input = r#"{"courses": [
            {"name": "Chemistry", "sections": [
                {"id": "021", "lec": [{"day": "mo", "start": 9, "end": 11}], "lab": []},
                {"id": "022", "lec": [{"day": "tu", "start": 9, "end": 11}], "lab": []}
            ]}
        ]}"#;

        // Verbatim policy keeps the two rows as distinct sections
        let mut planner =
            Planner::new().with_normalizer(SectionNormalizer::new().with_policy(VerbatimMerge));
        planner.load(input).unwrap();
        assert_eq!(planner.courses()[0].section_count, 2);
        assert_eq!(planner.solution_count(), 2);
    }

    #[test]
    fn test_transitions_before_load() {
        let mut planner = Planner::new();
        assert_eq!(
            planner.toggle_course("Algebra").unwrap_err().kind,
            PlannerErrorKind::Data
        );
        assert_eq!(
            planner.toggle_pin("Algebra", "01").unwrap_err().kind,
            PlannerErrorKind::Data
        );
        assert!(planner.courses().is_empty());
        assert!(planner.current_schedule().is_none());
    }

    #[test]
    fn test_successful_transition_clears_error() {
        let mut planner = loaded_planner();
        planner.toggle_course("Chemistry").unwrap_err();
        assert!(planner.error().is_some());

        planner.toggle_course("Physics").unwrap();
        assert!(planner.error().is_none());
    }
}
