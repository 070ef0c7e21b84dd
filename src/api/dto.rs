//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentSummary;
use crate::storage::{KeywordStats, TweetRecord};
use crate::twitter::KeyStatus;

/// Message returned when a search matched nothing
pub const NO_TWEETS_MESSAGE: &str = "No tweets found";

// ============================================
// SEARCH DTOs
// ============================================

/// POST /api/search body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: String,
}

/// POST /api/search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub keyword: String,
    pub tweets: Vec<TweetRecord>,
    pub sentiment_summary: SentimentSummary,
    #[serde(flatten)]
    pub keys: KeyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================
// STORED DATA DTOs
// ============================================

/// GET /api/tweets/:keyword response
#[derive(Debug, Serialize, Deserialize)]
pub struct TweetsResponse {
    pub tweets: Vec<TweetRecord>,
    #[serde(flatten)]
    pub keys: KeyStatus,
}

/// GET /api/keywords response
#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<KeywordStats>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// GET /api/health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub websocket_connections: usize,
    #[serde(flatten)]
    pub keys: KeyStatus,
}
