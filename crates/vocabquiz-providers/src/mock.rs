//! Mock backend for testing.
//!
//! Deterministic, offline, and inspectable: scripted verdicts keyed on the
//! user's answer, a fixed example sentence, and a canned vocabulary list.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use vocabquiz_core::traits::{
    AnswerOracle, CheckRequest, ExampleGenerator, ExampleRequest, Verdict, VocabGenerator,
    VocabListRequest,
};

/// Scripted in-memory backend.
///
/// By default every answer that equals the expected meaning (ignoring case
/// and surrounding whitespace) is judged correct. `with_verdict` overrides
/// the judgement for specific answers.
pub struct MockProvider {
    verdicts: Vec<(String, Verdict)>,
    example_sentence: String,
    vocab_list: String,
    check_calls: AtomicU32,
    last_check: Mutex<Option<CheckRequest>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            verdicts: Vec::new(),
            example_sentence: "The quick brown fox jumps over the lazy dog.".to_string(),
            vocab_list: "\"hello\" (n) : \"xin chào\"\n\"goodbye\" (n) : \"tạm biệt\"".to_string(),
            check_calls: AtomicU32::new(0),
            last_check: Mutex::new(None),
        }
    }

    /// Script a verdict for a specific user answer.
    pub fn with_verdict(mut self, user_answer: &str, verdict: Verdict) -> Self {
        self.verdicts.push((user_answer.to_string(), verdict));
        self
    }

    /// Replace the fixed example sentence.
    pub fn with_example(mut self, sentence: &str) -> Self {
        self.example_sentence = sentence.to_string();
        self
    }

    /// Replace the canned vocabulary list text.
    pub fn with_vocab_list(mut self, text: &str) -> Self {
        self.vocab_list = text.to_string();
        self
    }

    /// Number of `check` calls made so far.
    pub fn check_calls(&self) -> u32 {
        self.check_calls.load(Ordering::SeqCst)
    }

    /// The most recent `check` request, if any.
    pub fn last_check(&self) -> Option<CheckRequest> {
        self.last_check.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerOracle for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn check(&self, request: &CheckRequest) -> anyhow::Result<Verdict> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_check.lock().unwrap() = Some(request.clone());

        for (answer, verdict) in &self.verdicts {
            if answer == &request.user_answer {
                return Ok(verdict.clone());
            }
        }

        let is_correct = request
            .user_answer
            .trim()
            .eq_ignore_ascii_case(request.expected.trim());
        Ok(Verdict {
            is_correct,
            explanation: if is_correct {
                "Exact match.".to_string()
            } else {
                format!("Expected '{}'.", request.expected)
            },
        })
    }
}

#[async_trait]
impl ExampleGenerator for MockProvider {
    async fn example(&self, _request: &ExampleRequest) -> anyhow::Result<String> {
        Ok(self.example_sentence.clone())
    }
}

#[async_trait]
impl VocabGenerator for MockProvider {
    async fn generate_list(&self, _request: &VocabListRequest) -> anyhow::Result<String> {
        Ok(self.vocab_list.clone())
    }
}
