//! Search Routes
//!
//! - POST /api/search - Fetch, score, store and broadcast tweets for a keyword

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{SearchRequest, SearchResponse, NO_TWEETS_MESSAGE};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::sentiment::SentimentSummary;
use crate::storage::TweetRecord;
use crate::twitter::{KeyStatus, RawTweet, TwitterError};
use crate::websocket::ServerMessage;

/// POST /api/search
pub async fn search_tweets(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Json(req) = body?;
    let keyword = req.keyword.trim().to_string();
    if keyword.is_empty() {
        return Err(ApiError::Validation("Keyword is required".into()));
    }

    let (key_index, token) = state.keys.checkout();
    let key_number = key_index + 1;
    let raw = state
        .source
        .search_recent(&keyword, token, state.config.twitter.max_results)
        .await
        .map_err(|e| source_error(&state, key_index, e))?;

    tracing::info!(
        keyword = %keyword,
        source = state.source.name(),
        api_key = key_number,
        fetched = raw.len(),
        "Search completed"
    );

    let (tweets, summary) = score_tweets(&state, &keyword, raw);

    if tweets.is_empty() {
        return Ok(Json(SearchResponse {
            success: true,
            keyword,
            tweets,
            sentiment_summary: summary,
            keys: state.keys.status(),
            message: Some(NO_TWEETS_MESSAGE.to_string()),
        }));
    }

    state.store.insert_tweets(tweets.clone()).await?;
    state
        .store
        .upsert_keyword_stats(&keyword, summary.total(), summary)
        .await?;

    let keys = state.keys.status();
    let delivered = state
        .ws_hub
        .broadcast(&ServerMessage::new_tweets(&keyword, tweets.clone(), summary, keys))
        .await;

    tracing::debug!(keyword = %keyword, recipients = delivered, "Pushed new tweets");

    Ok(Json(SearchResponse {
        success: true,
        keyword,
        tweets,
        sentiment_summary: summary,
        keys,
        message: None,
    }))
}

/// Classify each tweet and tally the labels
fn score_tweets(
    state: &AppState,
    keyword: &str,
    raw: Vec<RawTweet>,
) -> (Vec<TweetRecord>, SentimentSummary) {
    let fetched_at = Utc::now();
    let mut summary = SentimentSummary::default();

    let tweets = raw
        .into_iter()
        .map(|tweet| {
            let score = state.analyzer.analyze(&tweet.text);
            summary.record(score.label);
            TweetRecord::from_raw(tweet, keyword, score, fetched_at)
        })
        .collect();

    (tweets, summary)
}

/// Map a source failure, rotating the bearer token on rate limits
fn source_error(state: &AppState, key_index: usize, error: TwitterError) -> ApiError {
    let key_number = key_index + 1;
    match error {
        TwitterError::RateLimited => {
            let next = state.keys.rotate_from(key_index);
            tracing::warn!(
                previous_key = key_number,
                next_key = next,
                total_keys = state.keys.len(),
                "Bearer token rate limited, rotated"
            );
            ApiError::RateLimited {
                previous: key_number,
                keys: KeyStatus {
                    current_api_key: next,
                    total_api_keys: state.keys.len(),
                },
            }
        }
        other => ApiError::Upstream {
            message: other.to_string(),
            keys: state.keys.status(),
        },
    }
}
