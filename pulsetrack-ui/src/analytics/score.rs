//! Overall sentiment score.

use crate::state::global::SentimentSummary;

/// Direction of the overall score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreLabel {
    Positive,
    Negative,
    Neutral,
}

impl ScoreLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            ScoreLabel::Positive
        } else if score < 0.0 {
            ScoreLabel::Negative
        } else {
            ScoreLabel::Neutral
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            ScoreLabel::Positive => "😊 Positive",
            ScoreLabel::Negative => "😞 Negative",
            ScoreLabel::Neutral => "😐 Neutral",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreLabel::Positive => "#4CAF50",
            ScoreLabel::Negative => "#F44336",
            ScoreLabel::Neutral => "#9E9E9E",
        }
    }
}

/// `(positive - negative) / total` in [-1, 1], 0 for an empty summary
pub fn overall_score(summary: &SentimentSummary) -> f64 {
    let total = summary.total();
    if total == 0 {
        return 0.0;
    }
    (summary.positive as f64 - summary.negative as f64) / total as f64
}

/// Bar width in percent for a score
pub fn bar_width_percent(score: f64) -> f64 {
    (score.clamp(-1.0, 1.0) + 1.0) * 50.0
}
