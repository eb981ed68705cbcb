//! vocabquiz-core — vocabulary model, parser, session state machine, and scoring.
//!
//! This crate defines the data model, the line-oriented vocabulary list
//! parser, the quiz session state machine, and the engine that drives one
//! question round at a time against a pluggable answer oracle.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod score;
pub mod session;
pub mod summary;
pub mod traits;
