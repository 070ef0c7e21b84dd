//! Sentiment Scoring
//!
//! - **analyzer**: VADER scorer producing a compound score and label
//!
//! A batch of scored tweets is reduced to a [`SentimentSummary`] for the
//! search response.

pub mod analyzer;

pub use analyzer::{SentimentAnalyzer, SentimentLabel, SentimentScore};

use serde::{Deserialize, Serialize};

/// Count of tweets per sentiment label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentSummary {
    /// Count one labelled tweet
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }
}

impl FromIterator<SentimentLabel> for SentimentSummary {
    fn from_iter<I: IntoIterator<Item = SentimentLabel>>(iter: I) -> Self {
        let mut summary = SentimentSummary::default();
        for label in iter {
            summary.record(label);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary: SentimentSummary = [
            SentimentLabel::Positive,
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
        ]
        .into_iter()
        .collect();

        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_empty_summary_serializes_zeros() {
        let json = serde_json::to_value(SentimentSummary::default()).unwrap();
        assert_eq!(json, serde_json::json!({"positive": 0, "negative": 0, "neutral": 0}));
    }
}
