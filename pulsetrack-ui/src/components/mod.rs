//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod engagement_metrics;
pub mod loading;
pub mod score_bar;
pub mod search_bar;
pub mod search_history;
pub mod sentiment_cards;
pub mod sentiment_chart;
pub mod sentiment_timeline;
pub mod toast;
pub mod trending_words;
pub mod tweet_list;

pub use engagement_metrics::EngagementMetrics;
pub use loading::Loading;
pub use score_bar::ScoreBar;
pub use search_bar::SearchBar;
pub use search_history::SearchHistoryChips;
pub use sentiment_cards::SentimentCards;
pub use sentiment_chart::SentimentChart;
pub use sentiment_timeline::SentimentTimeline;
pub use toast::Toast;
pub use trending_words::TrendingWords;
pub use tweet_list::TweetList;
