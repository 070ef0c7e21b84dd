//! Sentiment Analyzer
//!
//! VADER scoring through the `vader_sentiment` lexicon, including its emoji
//! and emoticon entries. The compound score in [-1, 1] decides the label.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound score at or above which text is positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which text is negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Sentiment label derived from the compound score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a compound score
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(format!("Unknown sentiment label: {}", other)),
        }
    }
}

/// Result of scoring one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    /// Normalised overall score in [-1, 1]
    pub compound: f64,
    /// Proportion of positive sentiment
    pub positive: f64,
    /// Proportion of negative sentiment
    pub negative: f64,
    /// Proportion of neutral tokens
    pub neutral: f64,
}

impl SentimentScore {
    fn empty() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 0.0,
        }
    }
}

/// VADER sentiment analyzer
///
/// The lexicons are parsed once on first use and shared by every instance.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score a piece of text
    pub fn analyze(&self, text: &str) -> SentimentScore {
        if text.trim().is_empty() {
            return SentimentScore::empty();
        }

        let vader = SentimentIntensityAnalyzer::new();
        let scores = vader.polarity_scores(text);
        let compound = round_to(score(&scores, "compound"), 4);

        SentimentScore {
            label: SentimentLabel::from_compound(compound),
            compound,
            positive: round_to(score(&scores, "pos"), 3),
            negative: round_to(score(&scores, "neg"), 3),
            neutral: round_to(score(&scores, "neu"), 3),
        }
    }
}

fn score(scores: &HashMap<&str, f64>, key: &str) -> f64 {
    scores.get(key).copied().unwrap_or(0.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
