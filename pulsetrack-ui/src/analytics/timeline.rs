//! Sentiment by hour of day.

use chrono::{DateTime, TimeZone, Timelike};
use std::collections::BTreeMap;

use crate::state::global::{SentimentLabel, Tweet};

/// Label counts for one hour of the day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HourBucket {
    pub hour: u32,
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl HourBucket {
    fn new(hour: u32) -> Self {
        Self {
            hour,
            positive: 0,
            negative: 0,
            neutral: 0,
        }
    }

    pub fn label(&self) -> String {
        format!("{}:00", self.hour)
    }

    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }
}

/// Group tweets by the hour of `created_at` in `tz`, ordered by hour.
///
/// Tweets whose timestamp does not parse are skipped.
pub fn hourly_buckets<Tz: TimeZone>(tweets: &[Tweet], tz: &Tz) -> Vec<HourBucket> {
    let mut buckets: BTreeMap<u32, HourBucket> = BTreeMap::new();

    for tweet in tweets {
        let Ok(created) = DateTime::parse_from_rfc3339(&tweet.created_at) else {
            continue;
        };
        let hour = created.with_timezone(tz).hour();
        let bucket = buckets.entry(hour).or_insert_with(|| HourBucket::new(hour));

        match tweet.sentiment.label {
            SentimentLabel::Positive => bucket.positive += 1,
            SentimentLabel::Negative => bucket.negative += 1,
            SentimentLabel::Neutral => bucket.neutral += 1,
        }
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{Engagement, Sentiment};
    use chrono::{FixedOffset, Utc};

    fn tweet(created_at: &str, label: SentimentLabel) -> Tweet {
        Tweet {
            tweet_id: "1".to_string(),
            text: "text".to_string(),
            keyword: String::new(),
            created_at: created_at.to_string(),
            fetched_at: None,
            sentiment: Sentiment {
                label,
                compound: 0.0,
                positive: 0.0,
                negative: 0.0,
                neutral: 0.0,
            },
            engagement: Engagement::default(),
        }
    }

    #[test]
    fn test_buckets_ordered_by_hour() {
        let tweets = vec![
            tweet("2024-03-01T15:10:00Z", SentimentLabel::Positive),
            tweet("2024-03-01T09:59:59Z", SentimentLabel::Negative),
            tweet("2024-03-01T15:45:00.000Z", SentimentLabel::Neutral),
            tweet("2024-03-02T09:00:00Z", SentimentLabel::Negative),
        ];

        let buckets = hourly_buckets(&tweets, &Utc);
        assert_eq!(buckets.len(), 2);

        assert_eq!(buckets[0].label(), "9:00");
        assert_eq!(buckets[0].negative, 2);
        assert_eq!(buckets[0].total(), 2);

        assert_eq!(buckets[1].label(), "15:00");
        assert_eq!(buckets[1].positive, 1);
        assert_eq!(buckets[1].neutral, 1);
    }

    #[test]
    fn test_viewer_offset_applied() {
        let tweets = vec![tweet("2024-03-01T23:30:00Z", SentimentLabel::Positive)];
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let buckets = hourly_buckets(&tweets, &offset);
        assert_eq!(buckets[0].hour, 1);
    }

    #[test]
    fn test_unparseable_timestamps_skipped() {
        let tweets = vec![
            tweet("yesterday", SentimentLabel::Positive),
            tweet("", SentimentLabel::Negative),
            tweet("2024-03-01T08:00:00+00:00", SentimentLabel::Neutral),
        ];
        let buckets = hourly_buckets(&tweets, &Utc);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].neutral, 1);
    }
}
