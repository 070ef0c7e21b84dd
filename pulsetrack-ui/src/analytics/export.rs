//! CSV export of the displayed tweets.

use crate::state::global::Tweet;

pub const CSV_HEADER: &str = "Tweet,Sentiment,Likes,Retweets,Replies,Created At";

/// Render tweets as CSV. Returns `None` when there is nothing to export.
pub fn tweets_to_csv(tweets: &[Tweet]) -> Option<String> {
    if tweets.is_empty() {
        return None;
    }

    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for tweet in tweets {
        csv.push_str(&format!(
            "\"{}\",{},{},{},{},{}\n",
            tweet.text.replace('"', "\"\""),
            tweet.sentiment.label.as_str(),
            tweet.engagement.likes,
            tweet.engagement.retweets,
            tweet.engagement.replies,
            tweet.created_at,
        ));
    }

    Some(csv)
}

/// `tweets_{keyword}_{epoch_millis}.csv`
pub fn export_file_name(keyword: &str, epoch_millis: i64) -> String {
    format!("tweets_{}_{}.csv", keyword, epoch_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{Engagement, Sentiment, SentimentLabel};

    fn tweet(text: &str, label: SentimentLabel) -> Tweet {
        Tweet {
            tweet_id: "1".to_string(),
            text: text.to_string(),
            keyword: "rust".to_string(),
            created_at: "2024-03-01T10:00:00.000Z".to_string(),
            fetched_at: None,
            sentiment: Sentiment {
                label,
                compound: 0.0,
                positive: 0.0,
                negative: 0.0,
                neutral: 0.0,
            },
            engagement: Engagement { likes: 4, retweets: 2, replies: 1 },
        }
    }

    #[test]
    fn test_empty_exports_nothing() {
        assert_eq!(tweets_to_csv(&[]), None);
    }

    #[test]
    fn test_header_and_rows() {
        let csv = tweets_to_csv(&[tweet("hello, world", SentimentLabel::Positive)]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "\"hello, world\",positive,4,2,1,2024-03-01T10:00:00.000Z");
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_quotes_doubled() {
        let csv = tweets_to_csv(&[tweet("she said \"wow\"", SentimentLabel::Neutral)]).unwrap();
        assert!(csv.contains("\"she said \"\"wow\"\"\",neutral,"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name("rust", 1709287200000), "tweets_rust_1709287200000.csv");
    }
}
