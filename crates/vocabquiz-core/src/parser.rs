//! Line-oriented vocabulary list parser.
//!
//! Accepts one candidate entry per line in the shape
//! `"word" (type) : "meaning"`, where the quote marks are optional. Lines
//! that do not match are skipped rather than rejected; this is a deliberate
//! best-effort policy so hand-edited and model-generated lists both parse.
//! Zero matching lines is the caller-visible "no valid entries" case.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::QuizError;
use crate::model::{VocabEntry, VocabSet};

/// Non-greedy on word and type so the first parenthesis and the first
/// following colon delimit the fields; the meaning runs to end of line.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^["']?(.+?)["']?\s+\((.+?)\)\s*:\s*["']?(.+?)["']?$"#)
        .expect("vocab line pattern is valid")
});

/// Parse a block of text into vocabulary entries, best-effort per line.
pub fn parse_vocab_text(text: &str) -> Vec<VocabEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match LINE_PATTERN.captures(line) {
            Some(caps) => entries.push(VocabEntry {
                word: caps[1].trim().to_string(),
                word_type: caps[2].trim().to_string(),
                meaning: caps[3].trim().to_string(),
            }),
            None => tracing::warn!("skipping unparseable vocabulary line: {line:?}"),
        }
    }
    entries
}

/// Parse text straight into a quiz-ready set.
///
/// `NoValidEntries` if no line parsed at all.
pub fn parse_vocab_set(text: &str) -> Result<VocabSet, QuizError> {
    let entries = parse_vocab_text(text);
    if entries.is_empty() {
        return Err(QuizError::NoValidEntries);
    }
    VocabSet::new(entries)
}

/// Render entries back into the line format `parse_vocab_text` accepts.
pub fn format_vocab_text(entries: &[VocabEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("\"{}\" ({}) : \"{}\"", e.word, e.word_type, e.meaning))
        .collect::<Vec<_>>()
        .join("\n")
}
