//! Quiz engine orchestrator.
//!
//! Drives one question round at a time: answer validation, the oracle round
//! trip with bounded retries, feedback application, and example generation.
//! Collaborator failures are absorbed at this boundary into error-flavored
//! text values; they never corrupt session invariants and never prevent the
//! user from advancing.

use std::sync::Arc;
use std::time::Duration;

use crate::error::QuizError;
use crate::session::QuizSession;
use crate::traits::{AnswerOracle, CheckRequest, ExampleGenerator, ExampleRequest, Verdict};

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// Retries on transient oracle errors (not on "incorrect" verdicts).
    pub max_retries: u32,
    /// Initial delay between retries; doubles per attempt.
    pub retry_delay: Duration,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// What a single submission produced.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The oracle's judgement (or the absorbed-failure stand-in).
    pub verdict: Verdict,
    /// The feedback text now stored on the session.
    pub feedback: String,
    /// The example sentence now stored on the session.
    pub example_sentence: String,
}

/// Orchestrates a session against the oracle and example generator.
pub struct QuizEngine {
    oracle: Arc<dyn AnswerOracle>,
    examples: Arc<dyn ExampleGenerator>,
    config: QuizEngineConfig,
}

impl QuizEngine {
    pub fn new(
        oracle: Arc<dyn AnswerOracle>,
        examples: Arc<dyn ExampleGenerator>,
        config: QuizEngineConfig,
    ) -> Self {
        Self {
            oracle,
            examples,
            config,
        }
    }

    /// Submit the user's answer for the current question.
    ///
    /// Rejects empty answers and duplicate submissions without touching
    /// session state. An oracle failure after retries becomes an incorrect
    /// verdict whose explanation carries the error text; an example-generator
    /// failure becomes the stored sentence text.
    pub async fn submit_answer(
        &self,
        session: &mut QuizSession,
        answer: &str,
    ) -> Result<SubmitOutcome, QuizError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        let question = session.question().ok_or(QuizError::QuizComplete)?;
        if session.feedback().is_some() {
            return Err(QuizError::AlreadyAnswered);
        }

        let example_request = session
            .current_entry()
            .map(ExampleRequest::from)
            .ok_or(QuizError::QuizComplete)?;

        let request = CheckRequest {
            question: question.prompt,
            user_answer: answer.to_string(),
            expected: question.expected,
            word_type: question.word_type,
            direction: question.direction,
        };

        let verdict = match self.check_with_retries(&request).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!("answer check failed, treating as incorrect: {e:#}");
                Verdict {
                    is_correct: false,
                    explanation: format!("Could not check the answer: {e:#}"),
                }
            }
        };

        session.apply_verdict(&verdict)?;

        let sentence = match self.examples.example(&example_request).await {
            Ok(sentence) => sentence.trim().to_string(),
            Err(e) => {
                tracing::warn!("example generation failed: {e:#}");
                format!("Could not generate an example sentence: {e:#}")
            }
        };
        session.set_example_sentence(sentence.clone());

        Ok(SubmitOutcome {
            verdict,
            feedback: session.feedback().unwrap_or_default().to_string(),
            example_sentence: sentence,
        })
    }

    /// Call the oracle, retrying transient failures with exponential backoff.
    async fn check_with_retries(&self, request: &CheckRequest) -> anyhow::Result<Verdict> {
        let mut last_error = None;
        let mut delay = self.config.retry_delay;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(Duration::from_secs(30));
            }
            match self.oracle.check(request).await {
                Ok(verdict) => return Ok(verdict),
                Err(e) => {
                    let err_str = e.to_string();
                    // Permanent errors are not worth retrying.
                    if err_str.contains("authentication") || err_str.contains("model not found") {
                        return Err(e);
                    }
                    // Honor the provider's retry-after hint if present.
                    if err_str.contains("rate limited") {
                        if let Some(ms) = parse_retry_after_ms(&err_str) {
                            delay = Duration::from_millis(ms);
                        }
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown oracle error")))
    }
}

/// Parse retry-after milliseconds from a `ProviderError::RateLimited` message.
fn parse_retry_after_ms(err_msg: &str) -> Option<u64> {
    // Error format: "rate limited, retry after {ms}ms"
    err_msg
        .strip_prefix("rate limited, retry after ")
        .and_then(|s| s.strip_suffix("ms"))
        .and_then(|s| s.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, VocabEntry, VocabSet};
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StubOracle {
        verdict: Option<Verdict>,
        fail_first: u32,
        calls: AtomicU32,
    }

    impl StubOracle {
        fn returning(verdict: Verdict) -> Self {
            Self {
                verdict: Some(verdict),
                fail_first: 0,
                calls: AtomicU32::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                verdict: None,
                fail_first: u32::MAX,
                calls: AtomicU32::new(0),
            }
        }

        fn flaky(fail_first: u32, verdict: Verdict) -> Self {
            Self {
                verdict: Some(verdict),
                fail_first,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl AnswerOracle for StubOracle {
        fn name(&self) -> &str {
            "stub"
        }

        async fn check(&self, _request: &CheckRequest) -> anyhow::Result<Verdict> {
            let call = self.calls.fetch_add(1, Ordering::Relaxed);
            if call < self.fail_first {
                anyhow::bail!("network error: connection reset");
            }
            Ok(self.verdict.clone().expect("verdict configured"))
        }
    }

    struct StubExamples {
        fail: bool,
    }

    #[async_trait]
    impl ExampleGenerator for StubExamples {
        async fn example(&self, request: &ExampleRequest) -> anyhow::Result<String> {
            if self.fail {
                anyhow::bail!("network error: connection reset");
            }
            Ok(format!("I like to {} every morning.", request.word))
        }
    }

    fn engine(oracle: StubOracle, examples: StubExamples) -> QuizEngine {
        QuizEngine::new(
            Arc::new(oracle),
            Arc::new(examples),
            QuizEngineConfig {
                max_retries: 2,
                retry_delay: Duration::from_millis(1),
            },
        )
    }

    fn run_chay_session() -> QuizSession {
        let set = VocabSet::new(vec![VocabEntry {
            word: "run".into(),
            word_type: "v".into(),
            meaning: "chạy".into(),
        }])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = QuizSession::start(set, &mut rng);
        session.force_direction(Direction::EnToVi);
        session
    }

    #[tokio::test]
    async fn end_to_end_single_question() {
        let engine = engine(
            StubOracle::returning(Verdict {
                is_correct: true,
                explanation: "ok".into(),
            }),
            StubExamples { fail: false },
        );
        let mut session = run_chay_session();

        let q = session.question().unwrap();
        assert_eq!(q.prompt, "run");
        assert_eq!(q.expected, "chạy");

        let outcome = engine.submit_answer(&mut session, "chạy").await.unwrap();
        assert!(outcome.verdict.is_correct);
        assert_eq!(session.correct_count(), 1);
        assert!(session.feedback().unwrap().contains("ok"));
        assert!(session.example_sentence().unwrap().contains("run"));

        let mut rng = StdRng::seed_from_u64(2);
        session.advance(&mut rng).unwrap();
        assert_eq!(session.position(), 1);
        assert_eq!(session.position(), session.total());
        assert!(session.is_complete());
    }

    #[tokio::test]
    async fn empty_answer_is_rejected_without_state_change() {
        let engine = engine(
            StubOracle::returning(Verdict {
                is_correct: true,
                explanation: "ok".into(),
            }),
            StubExamples { fail: false },
        );
        let mut session = run_chay_session();

        let err = engine.submit_answer(&mut session, "   ").await.unwrap_err();
        assert_eq!(err, QuizError::EmptyAnswer);
        assert_eq!(session.correct_count(), 0);
        assert!(session.feedback().is_none());
    }

    #[tokio::test]
    async fn duplicate_submission_is_rejected() {
        let engine = engine(
            StubOracle::returning(Verdict {
                is_correct: true,
                explanation: "ok".into(),
            }),
            StubExamples { fail: false },
        );
        let mut session = run_chay_session();

        engine.submit_answer(&mut session, "chạy").await.unwrap();
        let err = engine.submit_answer(&mut session, "chạy").await.unwrap_err();
        assert_eq!(err, QuizError::AlreadyAnswered);
        assert_eq!(session.correct_count(), 1);
    }

    #[tokio::test]
    async fn oracle_failure_is_absorbed_and_advancing_still_works() {
        let engine = engine(StubOracle::failing(), StubExamples { fail: false });
        let mut session = run_chay_session();

        let outcome = engine.submit_answer(&mut session, "chạy").await.unwrap();
        assert!(!outcome.verdict.is_correct);
        assert!(outcome.verdict.explanation.contains("Could not check"));
        assert_eq!(session.correct_count(), 0);
        assert!(session.feedback().unwrap().contains("chạy"));

        let mut rng = StdRng::seed_from_u64(3);
        session.advance(&mut rng).unwrap();
        assert!(session.is_complete());
    }

    #[tokio::test]
    async fn example_failure_is_absorbed_into_sentence_text() {
        let engine = engine(
            StubOracle::returning(Verdict {
                is_correct: true,
                explanation: "ok".into(),
            }),
            StubExamples { fail: true },
        );
        let mut session = run_chay_session();

        let outcome = engine.submit_answer(&mut session, "chạy").await.unwrap();
        assert!(outcome.verdict.is_correct);
        assert!(outcome
            .example_sentence
            .contains("Could not generate an example sentence"));
    }

    #[tokio::test]
    async fn transient_oracle_errors_are_retried() {
        let oracle = StubOracle::flaky(
            2,
            Verdict {
                is_correct: true,
                explanation: "ok".into(),
            },
        );
        let engine = engine(oracle, StubExamples { fail: false });
        let mut session = run_chay_session();

        let outcome = engine.submit_answer(&mut session, "chạy").await.unwrap();
        assert!(outcome.verdict.is_correct);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn parse_retry_after_ms_from_error() {
        assert_eq!(
            parse_retry_after_ms("rate limited, retry after 5000ms"),
            Some(5000)
        );
        assert_eq!(parse_retry_after_ms("something else"), None);
    }
}
