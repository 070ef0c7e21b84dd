//! Stored tweet and keyword types
//!
//! `TweetRecord` is also the wire form of a tweet sent to dashboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::{SentimentScore, SentimentSummary};
use crate::twitter::RawTweet;

/// Engagement counters of a tweet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
}

impl Engagement {
    pub fn total(&self) -> u64 {
        self.likes + self.retweets + self.replies
    }
}

/// A scored tweet, stored per keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub tweet_id: String,
    pub text: String,
    /// Keyword the tweet was fetched for
    pub keyword: String,
    pub created_at: DateTime<Utc>,
    pub fetched_at: DateTime<Utc>,
    pub sentiment: SentimentScore,
    pub engagement: Engagement,
}

impl TweetRecord {
    /// Build a record from a fetched tweet and its score
    pub fn from_raw(
        raw: RawTweet,
        keyword: impl Into<String>,
        sentiment: SentimentScore,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tweet_id: raw.id,
            text: raw.text,
            keyword: keyword.into(),
            created_at: raw.created_at,
            fetched_at,
            sentiment,
            engagement: Engagement {
                likes: raw.likes,
                retweets: raw.retweets,
                replies: raw.replies,
            },
        }
    }
}

/// Last search summary of a tracked keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub keyword: String,
    pub last_updated: DateTime<Utc>,
    pub total_tweets: u32,
    pub sentiment_summary: SentimentSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentAnalyzer;
    use chrono::TimeZone;

    #[test]
    fn test_record_wire_form() {
        let raw = RawTweet {
            id: "1".into(),
            text: "great launch".into(),
            author_id: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 13, 9, 15, 0).unwrap(),
            likes: 4,
            retweets: 2,
            replies: 1,
        };
        let score = SentimentAnalyzer::new().analyze(&raw.text);
        let fetched = Utc.with_ymd_and_hms(2024, 5, 13, 10, 0, 0).unwrap();
        let record = TweetRecord::from_raw(raw, "launch", score, fetched);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tweet_id"], "1");
        assert_eq!(json["keyword"], "launch");
        assert_eq!(json["created_at"], "2024-05-13T09:15:00Z");
        assert_eq!(json["sentiment"]["label"], "positive");
        assert_eq!(json["engagement"]["likes"], 4);
        assert_eq!(record.engagement.total(), 7);
    }
}
