//! Twitter Integration
//!
//! Fetches recent tweets for a keyword from the Twitter API v2 and manages
//! the pool of bearer tokens used to authenticate:
//! - `client`: reqwest-based recent-search client
//! - `keys`: bearer token rotation on rate limits

mod client;
mod keys;

pub use client::TwitterClient;
pub use keys::{KeyRing, KeyStatus};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Lowest page size accepted by the recent-search endpoint
pub const MIN_RESULTS: u32 = 10;
/// Highest page size accepted by the recent-search endpoint
pub const MAX_RESULTS: u32 = 100;

/// Source of recent tweets for a keyword
#[async_trait]
pub trait TweetSource: Send + Sync {
    /// Human-readable name, used in logs
    fn name(&self) -> &str;

    /// Search tweets from the last seven days matching `query`
    async fn search_recent(
        &self,
        query: &str,
        bearer_token: &str,
        max_results: u32,
    ) -> Result<Vec<RawTweet>, TwitterError>;
}

/// A tweet as returned by the source, before sentiment scoring
#[derive(Debug, Clone, PartialEq)]
pub struct RawTweet {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
}

/// Clamp a requested page size to what the API accepts
pub fn clamp_max_results(max_results: u32) -> u32 {
    max_results.clamp(MIN_RESULTS, MAX_RESULTS)
}

/// Errors that can occur while fetching tweets
#[derive(Debug, thiserror::Error)]
pub enum TwitterError {
    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request failed: {0}")]
    Request(String),
}
