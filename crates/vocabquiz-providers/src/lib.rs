//! vocabquiz-providers — language-model backend integrations.
//!
//! Implements the core capability traits (`AnswerOracle`, `ExampleGenerator`,
//! `VocabGenerator`) for Gemini and OpenAI-compatible APIs, plus a mock
//! backend for tests.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod openai;
pub mod prompts;

pub use config::{create_backend, load_config, ProviderConfig, QuizBackend, VocabquizConfig};
pub use error::ProviderError;
