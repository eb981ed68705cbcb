//! Capability traits for the external language-model collaborators.
//!
//! The quiz core never talks HTTP itself; correctness judging, example
//! sentences, and list generation are delegated through these async traits,
//! implemented by the `vocabquiz-providers` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Direction, VocabEntry};

// ---------------------------------------------------------------------------
// Answer oracle
// ---------------------------------------------------------------------------

/// Everything the oracle needs to judge one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    /// The question prompt shown to the user.
    pub question: String,
    /// What the user typed.
    pub user_answer: String,
    /// The expected answer for the current direction.
    pub expected: String,
    /// Part-of-speech tag of the entry (may be empty).
    pub word_type: String,
    /// Translation direction of this round.
    pub direction: Direction,
}

/// The oracle's judgement on one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the answer is correct or a reasonable synonym.
    pub is_correct: bool,
    /// Brief human-readable explanation.
    pub explanation: String,
}

/// Judges whether a user's answer is semantically equivalent to the expected
/// one. Synonyms and reasonable paraphrases count as correct; exact string
/// match is explicitly not the contract.
#[async_trait]
pub trait AnswerOracle: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Judge one submission.
    async fn check(&self, request: &CheckRequest) -> anyhow::Result<Verdict>;
}

// ---------------------------------------------------------------------------
// Example generator
// ---------------------------------------------------------------------------

/// The entry fields an example sentence is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleRequest {
    pub word: String,
    pub word_type: String,
    pub meaning: String,
}

impl From<&VocabEntry> for ExampleRequest {
    fn from(entry: &VocabEntry) -> Self {
        Self {
            word: entry.word.clone(),
            word_type: entry.word_type.clone(),
            meaning: entry.meaning.clone(),
        }
    }
}

/// Produces one short illustrative sentence using the word in context.
#[async_trait]
pub trait ExampleGenerator: Send + Sync {
    async fn example(&self, request: &ExampleRequest) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Vocabulary list generator
// ---------------------------------------------------------------------------

/// A request to generate a fresh vocabulary list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabListRequest {
    /// Topic of the list (e.g. "Technology").
    pub topic: String,
    /// Free-form characteristics (e.g. "IELTS Band 7.0, phrasal verbs").
    pub characteristics: String,
}

/// Generates raw list text in the same line format uploads use, so generated
/// and uploaded lists converge on one ingestion path (the parser).
#[async_trait]
pub trait VocabGenerator: Send + Sync {
    async fn generate_list(&self, request: &VocabListRequest) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Verdict extraction
// ---------------------------------------------------------------------------

/// Parse a model response into a verdict.
///
/// Protocol: the first line is YES or NO (case-insensitive, trailing period
/// tolerated); everything after it is the explanation. Anything that is not
/// an affirmative first line counts as incorrect.
pub fn parse_verdict(response: &str) -> Verdict {
    let text = response.trim();
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };

    let is_correct = first.trim().trim_end_matches('.').eq_ignore_ascii_case("yes");
    let explanation = if rest.trim().is_empty() {
        "No explanation provided.".to_string()
    } else {
        rest.trim().to_string()
    };

    Verdict {
        is_correct,
        explanation,
    }
}
