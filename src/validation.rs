//! Input validation for course documents.
//!
//! Parses the JSON course document consumed at the Load boundary and
//! checks structural integrity before anything reaches the solver:
//! - Document shape (top-level `courses` list, typed fields, known
//!   weekday codes)
//! - Duplicate or blank course names
//! - Inverted time blocks (`start >= end`)
//!
//! Malformed input is rejected wholesale; nothing is partially
//! recovered. A course with zero sections passes validation: it
//! legitimately empties the cartesian product downstream.

use std::collections::HashSet;

use serde::Deserialize;

use crate::models::RawSection;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Input is not JSON, lacks the `courses` list, or has a field of
    /// the wrong type (including unknown weekday codes).
    MalformedDocument,
    /// Two courses share the same name.
    DuplicateCourseName,
    /// A course has a blank name.
    EmptyCourseName,
    /// A time block with `start >= end`.
    InvalidTimeBlock,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The top-level input document.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDocument {
    /// Raw courses, in display order.
    pub courses: Vec<RawCourse>,
}

/// One course as it appears in the input document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCourse {
    /// Course name (unique key).
    pub name: String,
    /// Raw section rows, possibly suffix-split.
    pub sections: Vec<RawSection>,
}

/// Parses and validates a course document.
///
/// Deserialization enforces the structural schema (the `courses` list,
/// field types, weekday codes); semantic checks then run over the typed
/// document, collecting every detected issue.
///
/// # Returns
/// The typed document, or all detected errors.
pub fn parse_course_document(input: &str) -> Result<CourseDocument, Vec<ValidationError>> {
    let document: CourseDocument = serde_json::from_str(input).map_err(|e| {
        vec![ValidationError::new(
            ValidationErrorKind::MalformedDocument,
            format!("Invalid course document: {e}"),
        )]
    })?;

    validate_document(&document)?;
    Ok(document)
}

/// Validates a typed course document.
///
/// Checks:
/// 1. No duplicate course names
/// 2. No blank course names
/// 3. Every time block satisfies `start < end`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_document(document: &CourseDocument) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for course in &document.courses {
        if course.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourseName,
                "Course with blank name",
            ));
        }

        if !names.insert(course.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourseName,
                format!("Duplicate course name: {}", course.name),
            ));
        }

        for section in &course.sections {
            for block in section.lec.iter().chain(section.lab.iter()) {
                if block.start >= block.end {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidTimeBlock,
                        format!(
                            "Course '{}' section '{}': block {}-{} on {} does not end after it starts",
                            course.name,
                            section.id,
                            block.start,
                            block.end,
                            block.day.code()
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
