//! Final-score computation and completion banding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final score as a percentage of questions answered correctly.
///
/// Displayed with one decimal place; callers format with `{:.1}`.
pub fn percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 * 100.0 / total as f64
}

/// Completion band for a final score.
///
/// The thresholds are presentation policy, not load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Passable,
    NeedsPractice,
}

impl ScoreBand {
    pub fn for_percent(pct: f64) -> Self {
        if pct >= 90.0 {
            ScoreBand::Excellent
        } else if pct >= 70.0 {
            ScoreBand::Good
        } else if pct >= 50.0 {
            ScoreBand::Passable
        } else {
            ScoreBand::NeedsPractice
        }
    }

    /// One-line message shown on the completion screen.
    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent! You know this list cold.",
            ScoreBand::Good => "Good work. A few more rounds and you'll have it.",
            ScoreBand::Passable => "Not bad, but this list needs another pass.",
            ScoreBand::NeedsPractice => "Keep practicing. Try the same list again.",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "excellent"),
            ScoreBand::Good => write!(f, "good"),
            ScoreBand::Passable => write!(f, "passable"),
            ScoreBand::NeedsPractice => write!(f, "needs-practice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_basic() {
        assert!((percent(1, 1) - 100.0).abs() < f64::EPSILON);
        assert!((percent(0, 4) - 0.0).abs() < f64::EPSILON);
        assert!((percent(1, 3) - 33.333).abs() < 0.001);
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent(0, 0), 0.0);
    }

    #[test]
    fn one_decimal_display() {
        assert_eq!(format!("{:.1}%", percent(2, 3)), "66.7%");
        assert_eq!(format!("{:.1}%", percent(7, 8)), "87.5%");
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(ScoreBand::for_percent(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_percent(90.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_percent(89.9), ScoreBand::Good);
        assert_eq!(ScoreBand::for_percent(70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::for_percent(69.9), ScoreBand::Passable);
        assert_eq!(ScoreBand::for_percent(50.0), ScoreBand::Passable);
        assert_eq!(ScoreBand::for_percent(49.9), ScoreBand::NeedsPractice);
        assert_eq!(ScoreBand::for_percent(0.0), ScoreBand::NeedsPractice);
    }
}
