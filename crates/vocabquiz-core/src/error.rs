//! Quiz error types.
//!
//! These cover user-facing failures of the session state machine. Provider
//! failures are deliberately not represented here: the engine absorbs them
//! into error-flavored feedback text instead of propagating them.

use thiserror::Error;

/// Errors produced by quiz session transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The input text contained no parseable vocabulary lines.
    #[error("no valid vocabulary entries found in the input")]
    NoValidEntries,

    /// A quiz cannot start with zero entries.
    #[error("cannot start a quiz with an empty vocabulary set")]
    EmptyVocabSet,

    /// The user submitted without typing an answer.
    #[error("answer must not be empty")]
    EmptyAnswer,

    /// The current question already has feedback; it cannot be scored twice.
    #[error("this question has already been answered; advance to the next one")]
    AlreadyAnswered,

    /// `advance` was called before any answer was submitted.
    #[error("no answer has been submitted for the current question")]
    NoPendingFeedback,

    /// The session has already reached the end of the set.
    #[error("the quiz is already complete")]
    QuizComplete,
}
