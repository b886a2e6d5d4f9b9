//! Section normalizer.
//!
//! Input documents often split one enrollable offering into separate
//! lecture and lab rows whose ids share a base prefix: `"021"` and
//! `"022"` both describe offering `"02"`. The normalizer merges such
//! groups into unified [`Section`]s before enumeration, concatenating
//! their lecture and lab blocks in encounter order.
//!
//! The grouping rule is an institution-specific id convention, so it is
//! pluggable via [`MergePolicy`]. [`TrailingDigitMerge`] reproduces the
//! historical convention; [`VerbatimMerge`] opts out entirely.
//!
//! Normalization is purely structural. No conflict checking happens
//! here.

use std::fmt;

use crate::models::{Course, RawSection, Section};

/// Derives the base id under which raw sections are grouped.
pub trait MergePolicy {
    /// Short policy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Base id for a raw section id.
    ///
    /// Raw sections with equal base ids are merged into one section.
    fn base_id<'a>(&self, id: &'a str) -> &'a str;
}

/// Strips one trailing merge-suffix digit from sufficiently long ids.
///
/// An id of at least `min_id_len` characters ending in one of the
/// accepted suffix digits is grouped under the id minus that digit;
/// shorter ids are used verbatim. With the defaults (length 3,
/// suffixes `1`/`2`), `"021"` and `"022"` merge under `"02"` while a
/// two-character id like `"01"` is never split.
#[derive(Debug, Clone)]
pub struct TrailingDigitMerge {
    min_id_len: usize,
    suffixes: Vec<char>,
}

impl TrailingDigitMerge {
    /// Creates the policy with the historical defaults.
    pub fn new() -> Self {
        Self {
            min_id_len: 3,
            suffixes: vec!['1', '2'],
        }
    }

    /// Sets the minimum id length at which stripping applies.
    pub fn with_min_id_len(mut self, min_id_len: usize) -> Self {
        self.min_id_len = min_id_len;
        self
    }

    /// Sets the accepted trailing suffix digits.
    pub fn with_suffixes(mut self, suffixes: Vec<char>) -> Self {
        self.suffixes = suffixes;
        self
    }
}

impl Default for TrailingDigitMerge {
    fn default() -> Self {
        Self::new()
    }
}

impl MergePolicy for TrailingDigitMerge {
    fn name(&self) -> &'static str {
        "trailing-digit"
    }

    fn base_id<'a>(&self, id: &'a str) -> &'a str {
        if id.len() >= self.min_id_len {
            if let Some(last) = id.chars().last() {
                if self.suffixes.contains(&last) {
                    return &id[..id.len() - last.len_utf8()];
                }
            }
        }
        id
    }
}

/// Identity policy: every raw section is its own offering.
#[derive(Debug, Clone, Copy)]
pub struct VerbatimMerge;

impl MergePolicy for VerbatimMerge {
    fn name(&self) -> &'static str {
        "verbatim"
    }

    fn base_id<'a>(&self, id: &'a str) -> &'a str {
        id
    }
}

/// Merges raw input sections into enrollable offerings.
///
/// # Example
/// ```
/// use timetable_solver::models::{RawSection, TimeBlock, Weekday};
/// use timetable_solver::normalize::SectionNormalizer;
///
/// let raw = vec![
///     RawSection::new("021").with_lecture(TimeBlock::new(Weekday::Mo, 9, 11)),
///     RawSection::new("022").with_lab(TimeBlock::new(Weekday::We, 14, 16)),
/// ];
///
/// let sections = SectionNormalizer::new().normalize(&raw);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].id, "02");
/// ```
pub struct SectionNormalizer {
    policy: Box<dyn MergePolicy>,
}

impl SectionNormalizer {
    /// Creates a normalizer with the default [`TrailingDigitMerge`] policy.
    pub fn new() -> Self {
        Self {
            policy: Box::new(TrailingDigitMerge::new()),
        }
    }

    /// Replaces the merge policy.
    pub fn with_policy<P: MergePolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Merges raw sections into normalized sections.
    ///
    /// Groups by base id, preserving first-seen order of base ids, and
    /// concatenates each group's lecture and lab lists in encounter
    /// order. Zero input sections yield zero output sections.
    pub fn normalize(&self, raw: &[RawSection]) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();

        for raw_section in raw {
            let base = self.policy.base_id(&raw_section.id);
            let idx = match sections.iter().position(|s| s.id == base) {
                Some(i) => i,
                None => {
                    sections.push(Section::new(base));
                    sections.len() - 1
                }
            };
            sections[idx].lec.extend(raw_section.lec.iter().copied());
            sections[idx].lab.extend(raw_section.lab.iter().copied());
        }

        sections
    }

    /// Normalizes one named course.
    pub fn normalize_course(&self, name: impl Into<String>, raw: &[RawSection]) -> Course {
        Course {
            name: name.into(),
            sections: self.normalize(raw),
        }
    }
}

impl Default for SectionNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SectionNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionNormalizer")
            .field("policy", &self.policy.name())
            .finish()
    }
}
