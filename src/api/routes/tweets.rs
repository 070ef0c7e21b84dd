//! Stored Tweet Routes
//!
//! - GET /api/tweets/:keyword - Most recent stored tweets for a keyword
//! - GET /api/keywords - Tracked keywords with their last summary

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{KeywordsResponse, TweetsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/tweets/:keyword
pub async fn get_tweets(
    State(state): State<Arc<AppState>>,
    Path(keyword): Path<String>,
) -> ApiResult<Json<TweetsResponse>> {
    let tweets = state
        .store
        .recent_tweets(keyword.trim(), state.config.storage.history_limit)
        .await?;

    Ok(Json(TweetsResponse {
        tweets,
        keys: state.keys.status(),
    }))
}

/// GET /api/keywords
pub async fn list_keywords(State(state): State<Arc<AppState>>) -> ApiResult<Json<KeywordsResponse>> {
    let keywords = state.store.list_keywords().await?;
    Ok(Json(KeywordsResponse { keywords }))
}
