//! Twitter API v2 Client
//!
//! Calls `GET /tweets/search/recent` with bearer authentication and maps
//! the response into [`RawTweet`]s.

use super::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::config::TwitterConfig;

const TWEET_FIELDS: &str = "created_at,author_id,public_metrics";

/// Recent-search client
pub struct TwitterClient {
    client: Client,
    api_base: String,
}

impl TwitterClient {
    /// Create a client from configuration
    pub fn new(config: &TwitterConfig) -> Result<Self, TwitterError> {
        let client = Client::builder()
            .user_agent(concat!("PulseTrack/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| TwitterError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/tweets/search/recent", self.api_base)
    }
}

#[async_trait]
impl TweetSource for TwitterClient {
    fn name(&self) -> &str {
        "twitter"
    }

    async fn search_recent(
        &self,
        query: &str,
        bearer_token: &str,
        max_results: u32,
    ) -> Result<Vec<RawTweet>, TwitterError> {
        let max_results = clamp_max_results(max_results).to_string();

        let response = self
            .client
            .get(self.search_url())
            .bearer_auth(bearer_token)
            .query(&[
                ("query", query),
                ("max_results", max_results.as_str()),
                ("tweet.fields", TWEET_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| TwitterError::Request(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TwitterError::RateLimited);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(TwitterError::Unauthorized("Invalid bearer token".into()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| TwitterError::Parse(e.to_string()))?;

        Ok(body.into_tweets())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent when nothing matched
    #[serde(default)]
    data: Vec<ApiTweet>,
}

#[derive(Debug, Deserialize)]
struct ApiTweet {
    id: String,
    text: String,
    author_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    public_metrics: PublicMetrics,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    retweet_count: u64,
    #[serde(default)]
    reply_count: u64,
}

impl SearchResponse {
    fn into_tweets(self) -> Vec<RawTweet> {
        let now = Utc::now();
        self.data
            .into_iter()
            .map(|t| RawTweet {
                id: t.id,
                text: t.text,
                author_id: t.author_id,
                created_at: t.created_at.unwrap_or(now),
                likes: t.public_metrics.like_count,
                retweets: t.public_metrics.retweet_count,
                replies: t.public_metrics.reply_count,
            })
            .collect()
    }
}

/// Pull a readable message out of a Twitter error body
fn error_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        title: Option<String>,
        detail: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.detail.or(parsed.title)
}
