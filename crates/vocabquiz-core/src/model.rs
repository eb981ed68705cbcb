//! Core data model types for vocabquiz.
//!
//! These are the fundamental types the whole system works with: a vocabulary
//! entry, the question direction, and the shuffled set a quiz runs over.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::parser::format_vocab_text;

/// A single word/type/meaning record.
///
/// Created by the parser from one input line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    /// The English term.
    pub word: String,
    /// Part-of-speech tag (`n`, `v`, `adj`, `adv`, `prep`, `phr`, `phr. v`, ...).
    /// An open set; conventions only.
    #[serde(rename = "type")]
    pub word_type: String,
    /// The Vietnamese translation.
    pub meaning: String,
}

/// Which language is presented as the question for a given round.
///
/// Re-drawn uniformly at random for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// The word is shown; the meaning is the expected answer.
    #[serde(rename = "en-vi")]
    EnToVi,
    /// The meaning is shown; the word is the expected answer.
    #[serde(rename = "vi-en")]
    ViToEn,
}

impl Direction {
    /// Draw a direction uniformly from the two-element set.
    pub fn draw(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Direction::EnToVi
        } else {
            Direction::ViToEn
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::EnToVi => write!(f, "en-vi"),
            Direction::ViToEn => write!(f, "vi-en"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en-vi" => Ok(Direction::EnToVi),
            "vi-en" => Ok(Direction::ViToEn),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// An ordered collection of entries forming one quiz instance.
///
/// Non-empty by construction; the order is randomized once at quiz start
/// (and again on restart).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabSet {
    entries: Vec<VocabEntry>,
}

impl VocabSet {
    /// Build a set from parsed entries. Rejects an empty list: a quiz can
    /// never start without entries.
    pub fn new(entries: Vec<VocabEntry>) -> Result<Self, QuizError> {
        if entries.is_empty() {
            return Err(QuizError::EmptyVocabSet);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for call-site symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    /// Randomize the question order in place.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.entries.shuffle(rng);
    }

    /// Render the set back into the line format the parser accepts, so a
    /// downloaded list can be re-uploaded as-is.
    pub fn to_text(&self) -> String {
        format_vocab_text(&self.entries)
    }
}
