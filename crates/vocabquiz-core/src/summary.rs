//! Quiz summary with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::score::{percent, ScoreBand};
use crate::session::QuizSession;

/// Final record of one completed quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    /// Identifier of the run this summary belongs to.
    pub run_id: Uuid,
    /// When the summary was produced.
    pub completed_at: DateTime<Utc>,
    /// Number of questions in the set.
    pub total: usize,
    /// Questions answered correctly.
    pub correct: usize,
    /// Final score percentage.
    pub percent: f64,
    /// Completion band for the score.
    pub band: ScoreBand,
}

impl QuizSummary {
    /// Build a summary from a session, or `None` if it is not yet complete.
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        if !session.is_complete() {
            return None;
        }
        let pct = percent(session.correct_count(), session.total());
        Some(Self {
            run_id: session.run_id(),
            completed_at: Utc::now(),
            total: session.total(),
            correct: session.correct_count(),
            percent: pct,
            band: ScoreBand::for_percent(pct),
        })
    }

    /// Save the summary as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        let summary: QuizSummary =
            serde_json::from_str(&content).context("failed to parse summary JSON")?;
        Ok(summary)
    }
}
