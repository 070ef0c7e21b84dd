//! HTTP API Client
//!
//! Functions for communicating with the PulseTrack REST API.

use gloo_net::http::Request;

use crate::state::global::{KeyStatus, SentimentSummary, Tweet};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Local storage key overriding the API base URL
const API_URL_STORAGE_KEY: &str = "pulsetrack_api_url";

/// Alert shown when a search fails without a server message
pub const SEARCH_FAILED_MESSAGE: &str =
    "Failed to search tweets. Please try again or the API rate limit may have been hit.";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_STORAGE_KEY).ok().flatten());

    normalize_base(stored.as_deref().unwrap_or(DEFAULT_API_BASE))
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    pub keyword: String,
    #[serde(default)]
    pub tweets: Vec<Tweet>,
    #[serde(default)]
    pub sentiment_summary: SentimentSummary,
    #[serde(flatten)]
    pub keys: KeyStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub uptime_seconds: u64,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(flatten)]
    pub keys: KeyStatus,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Message to show for a failed search, given the error body if any
pub fn search_error_message(body: Option<&str>) -> String {
    body.and_then(|text| serde_json::from_str::<ApiError>(text).ok())
        .map(|e| e.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| SEARCH_FAILED_MESSAGE.to_string())
}

// ============ API Functions ============

/// Search recent tweets for a keyword.
///
/// The error is the text to alert: the server's message when it sent one.
pub async fn search_tweets(keyword: &str) -> Result<SearchResponse, String> {
    #[derive(serde::Serialize)]
    struct SearchRequest<'a> {
        keyword: &'a str,
    }

    let api_base = get_api_base();

    let request = Request::post(&format!("{}/search", api_base))
        .json(&SearchRequest { keyword })
        .map_err(|e| {
            web_sys::console::error_1(&format!("Request build error: {}", e).into());
            SEARCH_FAILED_MESSAGE.to_string()
        })?;

    let response = request.send().await.map_err(|e| {
        web_sys::console::error_1(&format!("Network error: {}", e).into());
        SEARCH_FAILED_MESSAGE.to_string()
    })?;

    if !response.ok() {
        let body = response.text().await.ok();
        return Err(search_error_message(body.as_deref()));
    }

    response.json().await.map_err(|e| {
        web_sys::console::error_1(&format!("Parse error: {}", e).into());
        SEARCH_FAILED_MESSAGE.to_string()
    })
}

/// Check API health
pub async fn check_health() -> Result<HealthResponse, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/health", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err("API is not healthy".to_string());
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}
