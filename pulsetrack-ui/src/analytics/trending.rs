//! Trending words across the displayed tweets.

use std::collections::HashMap;

use crate::state::global::Tweet;

/// Number of words shown
pub const TOP_WORDS: usize = 10;

/// Words shorter than this are ignored
const MIN_WORD_LEN: usize = 4;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "what", "which", "who", "when", "where", "why", "how", "rt",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendingWord {
    pub word: String,
    pub count: usize,
}

/// Most frequent words, highest count first. Ties keep first-seen order.
pub fn trending_words(tweets: &[Tweet]) -> Vec<TrendingWord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TrendingWord> = Vec::new();

    for tweet in tweets {
        let lowered = tweet.text.to_lowercase();
        for word in words(&lowered) {
            if word.len() < MIN_WORD_LEN || STOP_WORDS.contains(&word) {
                continue;
            }
            match index.get(word) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(word.to_string(), counts.len());
                    counts.push(TrendingWord { word: word.to_string(), count: 1 });
                }
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_WORDS);
    counts
}

/// Runs of ASCII word characters and apostrophes, apostrophes trimmed off the ends
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '\''))
        .map(|run| run.trim_matches('\''))
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{Engagement, Sentiment, SentimentLabel};

    fn tweet(text: &str) -> Tweet {
        Tweet {
            tweet_id: "1".to_string(),
            text: text.to_string(),
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
            engagement: Engagement::default(),
        }
    }

    fn words_of(result: &[TrendingWord]) -> Vec<&str> {
        result.iter().map(|w| w.word.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(trending_words(&[]).is_empty());
    }

    #[test]
    fn test_counts_across_tweets() {
        let tweets = vec![
            tweet("Rust release today"),
            tweet("the RUST compiler"),
            tweet("release notes for rust"),
        ];
        let result = trending_words(&tweets);
        assert_eq!(result[0], TrendingWord { word: "rust".to_string(), count: 3 });
        assert_eq!(result[1], TrendingWord { word: "release".to_string(), count: 2 });
    }

    #[test]
    fn test_short_and_stop_words_excluded() {
        let result = trending_words(&[tweet("RT this is how the new API should work, they said")]);
        assert_eq!(words_of(&result), vec!["work", "said"]);
    }

    #[test]
    fn test_apostrophes_trimmed() {
        let result = trending_words(&[tweet("'quoted' don't 'rustaceans'")]);
        assert_eq!(words_of(&result), vec!["quoted", "don't", "rustaceans"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let result = trending_words(&[tweet("zebra apple mango"), tweet("mango zebra apple")]);
        assert_eq!(words_of(&result), vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_top_ten_only() {
        let text = (0..15).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join(" ");
        let result = trending_words(&[tweet(&text)]);
        assert_eq!(result.len(), TOP_WORDS);
        assert_eq!(result[0].word, "word00");
    }
}
