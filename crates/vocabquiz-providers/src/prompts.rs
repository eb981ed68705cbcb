//! Prompt construction shared by the HTTP backends.
//!
//! The wording is deliberately strict about output shape: the list prompt
//! pins the exact line format the parser accepts, and the check prompt pins
//! the YES/NO-first-line protocol `parse_verdict` expects.

use vocabquiz_core::model::Direction;
use vocabquiz_core::traits::{CheckRequest, ExampleRequest, VocabListRequest};

/// Build the answer-check prompt.
///
/// The explanation language follows the direction: a learner translating
/// into Vietnamese gets a Vietnamese explanation, and vice versa.
pub fn check_prompt(request: &CheckRequest) -> String {
    let (from_lang, to_lang, explanation_lang) = match request.direction {
        Direction::EnToVi => ("English", "Vietnamese", "Vietnamese"),
        Direction::ViToEn => ("Vietnamese", "English", "English"),
    };
    let word_type = if request.word_type.is_empty() {
        "unknown"
    } else {
        &request.word_type
    };

    format!(
        "Evaluate a vocabulary quiz answer.\n\
         The user is translating from {from_lang} to {to_lang}.\n\
         Word type: {word_type}\n\
         - Question word: '{}'\n\
         - Correct answer: '{}'\n\
         - User's answer: '{}'\n\
         \n\
         First, on a single line, respond with only \"YES\" if the user's answer \
         is correct or a reasonable synonym, and \"NO\" otherwise.\n\
         Then, on a new line, provide a brief, helpful explanation in {explanation_lang}.",
        request.question, request.expected, request.user_answer
    )
}

/// Build the example-sentence prompt.
pub fn example_prompt(request: &ExampleRequest) -> String {
    let word_type = if request.word_type.is_empty() {
        "n/a"
    } else {
        &request.word_type
    };
    format!(
        "Write one short, clear English sentence using the word '{}' ({word_type}) \
         which means '{}' in Vietnamese.",
        request.word, request.meaning
    )
}

/// Build the vocabulary-list generation prompt.
pub fn vocab_list_prompt(request: &VocabListRequest) -> String {
    format!(
        "You are an API that generates vocabulary lists.\n\
         Your task is to create a list of 15-20 vocabulary words based on the user's request.\n\
         You MUST follow this format for EACH line EXACTLY:\n\
         \"English Word\" (type) : \"Vietnamese Meaning\"\n\
         \n\
         Valid types are: n, v, adj, adv, prep, phr, phr. v.\n\
         \n\
         DO NOT include any headers, footers, explanations, or any text other than \
         the vocabulary list itself.\n\
         \n\
         ---\n\
         User's Request:\n\
         Topic: {}\n\
         Characteristics: {}\n\
         ---",
        request.topic, request.characteristics
    )
}
