//! Engagement totals and the most engaged tweet.

use crate::state::global::Tweet;

/// Characters of the top tweet shown in the preview
pub const PREVIEW_CHARS: usize = 100;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngagementStats {
    pub total_likes: u64,
    pub total_retweets: u64,
    pub total_replies: u64,
    /// Mean of likes + retweets + replies per tweet
    pub average: f64,
    /// Index of the first tweet with the greatest engagement
    pub top_index: Option<usize>,
}

impl EngagementStats {
    pub fn top<'a>(&self, tweets: &'a [Tweet]) -> Option<&'a Tweet> {
        self.top_index.and_then(|i| tweets.get(i))
    }
}

pub fn engagement_stats(tweets: &[Tweet]) -> EngagementStats {
    let mut stats = EngagementStats::default();
    let mut top_total = 0;

    for (i, tweet) in tweets.iter().enumerate() {
        let engagement = tweet.engagement;
        stats.total_likes += engagement.likes;
        stats.total_retweets += engagement.retweets;
        stats.total_replies += engagement.replies;

        if stats.top_index.is_none() || engagement.total() > top_total {
            stats.top_index = Some(i);
            top_total = engagement.total();
        }
    }

    if !tweets.is_empty() {
        let sum = stats.total_likes + stats.total_retweets + stats.total_replies;
        stats.average = sum as f64 / tweets.len() as f64;
    }

    stats
}

/// First `PREVIEW_CHARS` characters of a text
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{Engagement, Sentiment, SentimentLabel};

    fn tweet(id: &str, likes: u64, retweets: u64, replies: u64) -> Tweet {
        Tweet {
            tweet_id: id.to_string(),
            text: format!("tweet {}", id),
            keyword: String::new(),
            created_at: "2024-03-01T10:00:00Z".to_string(),
            fetched_at: None,
            sentiment: Sentiment {
                label: SentimentLabel::Neutral,
                compound: 0.0,
                positive: 0.0,
                negative: 0.0,
                neutral: 1.0,
            },
            engagement: Engagement { likes, retweets, replies },
        }
    }

    #[test]
    fn test_empty_input() {
        let stats = engagement_stats(&[]);
        assert_eq!(stats, EngagementStats::default());
        assert!(stats.top(&[]).is_none());
    }

    #[test]
    fn test_totals_and_average() {
        let tweets = vec![tweet("a", 10, 2, 1), tweet("b", 0, 4, 3)];
        let stats = engagement_stats(&tweets);
        assert_eq!(stats.total_likes, 10);
        assert_eq!(stats.total_retweets, 6);
        assert_eq!(stats.total_replies, 4);
        assert_eq!(stats.average, 10.0);
        assert_eq!(stats.top(&tweets).map(|t| t.tweet_id.as_str()), Some("a"));
    }

    #[test]
    fn test_first_of_equal_top_wins() {
        let tweets = vec![tweet("a", 1, 0, 0), tweet("b", 5, 0, 0), tweet("c", 0, 5, 0)];
        assert_eq!(engagement_stats(&tweets).top_index, Some(1));
    }

    #[test]
    fn test_all_zero_picks_first() {
        let tweets = vec![tweet("a", 0, 0, 0), tweet("b", 0, 0, 0)];
        assert_eq!(engagement_stats(&tweets).top_index, Some(0));
    }

    #[test]
    fn test_preview_counts_characters() {
        let text = "é".repeat(150);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}
