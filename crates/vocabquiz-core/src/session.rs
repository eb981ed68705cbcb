//! Quiz session state machine.
//!
//! A `QuizSession` is a value owned by whatever per-user context drives it;
//! there is no shared or global instance. Transitions mutate it in place and
//! are atomic from the caller's point of view. "Not started" is simply the
//! absence of a session; dropping the session returns to the entry screen.

use rand::Rng;
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{Direction, VocabEntry, VocabSet};
use crate::traits::Verdict;

/// One question, derived fresh from the current entry and direction.
///
/// Never stored on the session, so it can never go stale when the direction
/// is redrawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Text shown to the user.
    pub prompt: String,
    /// The answer the oracle checks against.
    pub expected: String,
    /// Part-of-speech tag of the underlying entry.
    pub word_type: String,
    /// Direction of this round.
    pub direction: Direction,
}

/// The mutable run-state of one quiz attempt.
///
/// Invariants, held across every transition:
/// - `position <= vocab.len()`
/// - `correct_count <= position + 1`, and a question is counted at most once
/// - `position == vocab.len()` is the completed state; no separate flag
#[derive(Debug)]
pub struct QuizSession {
    vocab: VocabSet,
    position: usize,
    direction: Direction,
    correct_count: usize,
    feedback: Option<String>,
    example_sentence: Option<String>,
    run_id: Uuid,
}

impl QuizSession {
    /// Start a quiz: shuffle the set, reset counters, draw a direction.
    ///
    /// The set is non-empty by construction (`VocabSet::new`), so starting
    /// cannot fail.
    pub fn start(mut vocab: VocabSet, rng: &mut impl Rng) -> Self {
        vocab.shuffle(rng);
        Self {
            direction: Direction::draw(rng),
            vocab,
            position: 0,
            correct_count: 0,
            feedback: None,
            example_sentence: None,
            run_id: Uuid::new_v4(),
        }
    }

    /// Restart with the same set: reshuffle, reset counters, fresh run id.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        self.vocab.shuffle(rng);
        self.position = 0;
        self.correct_count = 0;
        self.feedback = None;
        self.example_sentence = None;
        self.direction = Direction::draw(rng);
        self.run_id = Uuid::new_v4();
    }

    pub fn is_complete(&self) -> bool {
        self.position == self.vocab.len()
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.vocab.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Outcome text of the most recent submission, if any.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Most recently generated example sentence, if any.
    pub fn example_sentence(&self) -> Option<&str> {
        self.example_sentence.as_deref()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn entries(&self) -> &[VocabEntry] {
        self.vocab.entries()
    }

    /// Render the full set in the re-uploadable line format.
    pub fn export_text(&self) -> String {
        self.vocab.to_text()
    }

    pub fn current_entry(&self) -> Option<&VocabEntry> {
        self.vocab.get(self.position)
    }

    /// Derive the current question, or `None` once the session is complete.
    pub fn question(&self) -> Option<Question> {
        let entry = self.current_entry()?;
        let (prompt, expected) = match self.direction {
            Direction::EnToVi => (entry.word.clone(), entry.meaning.clone()),
            Direction::ViToEn => (entry.meaning.clone(), entry.word.clone()),
        };
        Some(Question {
            prompt,
            expected,
            word_type: entry.word_type.clone(),
            direction: self.direction,
        })
    }

    /// Record the oracle's verdict for the current question.
    ///
    /// Counts the question at most once: a second call before `advance`
    /// fails with `AlreadyAnswered` instead of re-incrementing the score.
    pub fn apply_verdict(&mut self, verdict: &Verdict) -> Result<(), QuizError> {
        let question = self.question().ok_or(QuizError::QuizComplete)?;
        if self.feedback.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }

        if verdict.is_correct {
            self.correct_count += 1;
            self.feedback = Some(format!("Correct! {}", verdict.explanation));
        } else {
            self.feedback = Some(format!(
                "Incorrect. The correct answer is: {}\n{}",
                question.expected, verdict.explanation
            ));
        }
        Ok(())
    }

    /// Attach the generated example sentence for the current question.
    pub fn set_example_sentence(&mut self, sentence: String) {
        self.example_sentence = Some(sentence);
    }

    /// Move to the next question: clear transients, redraw the direction.
    ///
    /// Valid only after a submission; `NoPendingFeedback` otherwise.
    pub fn advance(&mut self, rng: &mut impl Rng) -> Result<(), QuizError> {
        if self.is_complete() {
            return Err(QuizError::QuizComplete);
        }
        if self.feedback.is_none() {
            return Err(QuizError::NoPendingFeedback);
        }
        self.position += 1;
        self.feedback = None;
        self.example_sentence = None;
        self.direction = Direction::draw(rng);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn force_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}
