//! Section models.
//!
//! A [`RawSection`] is one entry of the input document, which often
//! splits a single enrollable offering into separate lecture and lab
//! rows sharing a base identifier. A [`Section`] is the merged result:
//! one true offering carrying both its lecture and lab meeting times.
//! The merge itself lives in the `normalize` module.

use serde::{Deserialize, Serialize};

use super::TimeBlock;

/// A section row as it appears in the input document.
///
/// Immutable once parsed; the normalizer groups raw sections by base id
/// and never mutates them in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSection {
    /// Section identifier as published (may carry a merge suffix).
    pub id: String,
    /// Lecture meeting blocks.
    pub lec: Vec<TimeBlock>,
    /// Lab meeting blocks.
    pub lab: Vec<TimeBlock>,
}

impl RawSection {
    /// Creates a raw section with no meeting blocks.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lec: Vec::new(),
            lab: Vec::new(),
        }
    }

    /// Adds a lecture block.
    pub fn with_lecture(mut self, block: TimeBlock) -> Self {
        self.lec.push(block);
        self
    }

    /// Adds a lab block.
    pub fn with_lab(mut self, block: TimeBlock) -> Self {
        self.lab.push(block);
        self
    }
}

/// A normalized, enrollable section.
///
/// Produced by merging all raw sections that share a base id. Lecture
/// and lab blocks are kept apart for display; conflict checking treats
/// them uniformly via [`Section::blocks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Base section identifier.
    pub id: String,
    /// Lecture meeting blocks, in input encounter order.
    pub lec: Vec<TimeBlock>,
    /// Lab meeting blocks, in input encounter order.
    pub lab: Vec<TimeBlock>,
}

impl Section {
    /// Creates a section with no meeting blocks.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lec: Vec::new(),
            lab: Vec::new(),
        }
    }

    /// Adds a lecture block.
    pub fn with_lecture(mut self, block: TimeBlock) -> Self {
        self.lec.push(block);
        self
    }

    /// Adds a lab block.
    pub fn with_lab(mut self, block: TimeBlock) -> Self {
        self.lab.push(block);
        self
    }

    /// Iterates lecture and lab blocks uniformly (lectures first).
    pub fn blocks(&self) -> impl Iterator<Item = &TimeBlock> {
        self.lec.iter().chain(self.lab.iter())
    }

    /// Total number of meeting blocks.
    pub fn block_count(&self) -> usize {
        self.lec.len() + self.lab.len()
    }
}
