//! PulseTrack REST API
//!
//! HTTP API layer for PulseTrack, built with Axum.
//!
//! # Endpoints
//!
//! ## Search
//! - `POST /api/search` - Fetch and score tweets for a keyword
//!
//! ## Stored data
//! - `GET /api/tweets/:keyword` - Recent stored tweets for a keyword
//! - `GET /api/keywords` - Tracked keywords
//!
//! ## Health
//! - `GET /api/health` - Status and active API key
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! ## WebSocket
//! - `GET /ws` - Real-time push connection

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.api.cors_origins);

    let api_routes = Router::new()
        .route("/search", post(routes::search::search_tweets))
        .route("/tweets/:keyword", get(routes::tweets::get_tweets))
        .route("/keywords", get(routes::tweets::list_keywords))
        .route("/health", get(routes::health::api_health));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Any origin when none are configured, otherwise the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.api.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("PulseTrack API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("PulseTrack API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::TweetStore;
    use crate::twitter::{KeyRing, RawTweet, TweetSource, TwitterError};
    use crate::websocket::ServerMessage;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tower::util::ServiceExt;

    enum Reply {
        Tweets(Vec<RawTweet>),
        RateLimited,
        Broken,
    }

    struct StubSource {
        reply: Reply,
        tokens_used: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                tokens_used: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TweetSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        async fn search_recent(
            &self,
            _query: &str,
            bearer_token: &str,
            _max_results: u32,
        ) -> Result<Vec<RawTweet>, TwitterError> {
            self.tokens_used.lock().unwrap().push(bearer_token.to_string());
            match &self.reply {
                Reply::Tweets(tweets) => Ok(tweets.clone()),
                Reply::RateLimited => Err(TwitterError::RateLimited),
                Reply::Broken => Err(TwitterError::Api {
                    status: 503,
                    message: "Service Unavailable".into(),
                }),
            }
        }
    }

    fn raw(id: &str, text: &str, hour: u32) -> RawTweet {
        RawTweet {
            id: id.to_string(),
            text: text.to_string(),
            author_id: Some("42".into()),
            created_at: Utc.with_ymd_and_hms(2024, 5, 13, hour, 0, 0).unwrap(),
            likes: 5,
            retweets: 2,
            replies: 1,
        }
    }

    /// Holds every caller until `parties` searches are in flight, then rate limits them all
    struct GatedRateLimit {
        gate: tokio::sync::Barrier,
    }

    #[async_trait]
    impl TweetSource for GatedRateLimit {
        fn name(&self) -> &str {
            "gated"
        }

        async fn search_recent(
            &self,
            _query: &str,
            _bearer_token: &str,
            _max_results: u32,
        ) -> Result<Vec<RawTweet>, TwitterError> {
            self.gate.wait().await;
            Err(TwitterError::RateLimited)
        }
    }

    fn app_with_source(source: Arc<dyn TweetSource>, tokens: &[&str]) -> (Router, AppState) {
        let keys = KeyRing::new(tokens.iter().map(|t| t.to_string()).collect()).unwrap();
        let state = AppState::new(
            Config::default(),
            TweetStore::in_memory().unwrap(),
            source,
            keys,
        );
        let router = build_router(state.clone());
        (router, state)
    }

    fn create_test_app(reply: Reply) -> (Router, AppState, Arc<StubSource>) {
        let source = Arc::new(StubSource::new(reply));
        let (router, state) = app_with_source(
            Arc::clone(&source) as Arc<dyn TweetSource>,
            &["key-one", "key-two"],
        );
        (router, state, source)
    }

    fn search_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/search")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_probes() {
        let (app, _state, _source) = create_test_app(Reply::Tweets(Vec::new()));

        let response = app.clone().oneshot(get_request("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_health_reports_keys() {
        let (app, _state, _source) = create_test_app(Reply::Tweets(Vec::new()));

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Server is running");
        assert_eq!(json["current_api_key"], 1);
        assert_eq!(json["total_api_keys"], 2);
    }

    #[tokio::test]
    async fn test_search_requires_keyword() {
        let (app, _state, source) = create_test_app(Reply::Tweets(Vec::new()));

        let response = app.clone().oneshot(search_request(r#"{"keyword": "   "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "Keyword is required");
        assert_eq!(json["code"], "VALIDATION_ERROR");

        let response = app.clone().oneshot(search_request("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(search_request("not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert!(source.tokens_used.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_scores_stores_and_broadcasts() {
        let (app, state, source) = create_test_app(Reply::Tweets(vec![
            raw("1", "I love this, it is great", 9),
            raw("2", "This is terrible", 10),
            raw("3", "Release notes are out", 11),
        ]));

        let (tx, mut rx) = mpsc::unbounded_channel();
        state.ws_hub.register(tx).await.unwrap();

        let response = app.oneshot(search_request(r#"{"keyword": "rust"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["keyword"], "rust");
        assert_eq!(json["tweets"].as_array().unwrap().len(), 3);
        assert_eq!(json["tweets"][0]["sentiment"]["label"], "positive");
        assert_eq!(json["sentiment_summary"]["positive"], 1);
        assert_eq!(json["sentiment_summary"]["negative"], 1);
        assert_eq!(json["sentiment_summary"]["neutral"], 1);
        assert_eq!(json["current_api_key"], 1);
        assert!(json.get("message").is_none());

        assert_eq!(source.tokens_used.lock().unwrap().as_slice(), ["key-one"]);

        match rx.try_recv() {
            Ok(ServerMessage::NewTweets { keyword, tweets, .. }) => {
                assert_eq!(keyword, "rust");
                assert_eq!(tweets.len(), 3);
            }
            other => panic!("Expected new_tweets, got {:?}", other),
        }

        let stored = state.store.recent_tweets("rust", 50).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].tweet_id, "3");

        let keywords = state.store.list_keywords().await.unwrap();
        assert_eq!(keywords[0].total_tweets, 3);
    }

    #[tokio::test]
    async fn test_search_without_results() {
        let (app, state, _source) = create_test_app(Reply::Tweets(Vec::new()));

        let (tx, mut rx) = mpsc::unbounded_channel();
        state.ws_hub.register(tx).await.unwrap();

        let response = app.oneshot(search_request(r#"{"keyword": "nothing"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["message"], "No tweets found");
        assert_eq!(json["tweets"], serde_json::json!([]));
        assert_eq!(json["sentiment_summary"]["positive"], 0);

        assert!(rx.try_recv().is_err());
        assert!(state.store.list_keywords().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_rotates_key() {
        let (app, state, source) = create_test_app(Reply::RateLimited);

        let response = app.clone().oneshot(search_request(r#"{"keyword": "rust"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let json = json_body(response).await;
        assert_eq!(
            json["error"],
            "Rate limit hit on API Key #1. Switched to API Key #2. Please try again."
        );
        assert_eq!(json["retry"], true);
        assert_eq!(json["current_api_key"], 2);
        assert_eq!(json["total_api_keys"], 2);
        assert_eq!(state.keys.current(), "key-two");

        // The retry uses the new key and wraps around on a second limit
        let response = app.oneshot(search_request(r#"{"keyword": "rust"}"#)).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(
            json["error"],
            "Rate limit hit on API Key #2. Switched to API Key #1. Please try again."
        );
        assert_eq!(source.tokens_used.lock().unwrap().as_slice(), ["key-one", "key-two"]);
    }

    #[tokio::test]
    async fn test_simultaneous_rate_limits_rotate_once() {
        let source = Arc::new(GatedRateLimit {
            gate: tokio::sync::Barrier::new(2),
        });
        let (app, state) = app_with_source(source, &["key-one", "key-two", "key-three"]);

        let (first, second) = tokio::join!(
            app.clone().oneshot(search_request(r#"{"keyword": "rust"}"#)),
            app.clone().oneshot(search_request(r#"{"keyword": "rust"}"#)),
        );

        for response in [first.unwrap(), second.unwrap()] {
            assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
            let json = json_body(response).await;
            assert_eq!(
                json["error"],
                "Rate limit hit on API Key #1. Switched to API Key #2. Please try again."
            );
            assert_eq!(json["current_api_key"], 2);
        }

        assert_eq!(state.keys.current_number(), 2);
        assert_eq!(state.keys.current(), "key-two");
    }

    #[tokio::test]
    async fn test_upstream_error() {
        let (app, state, _source) = create_test_app(Reply::Broken);

        let response = app.oneshot(search_request(r#"{"keyword": "rust"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = json_body(response).await;
        assert_eq!(json["error"], "Twitter API error: API returned 503: Service Unavailable");
        assert_eq!(json["current_api_key"], 1);
        assert!(json.get("retry").is_none());
        assert_eq!(state.keys.current(), "key-one");
    }

    #[tokio::test]
    async fn test_stored_tweets_and_keywords() {
        let (app, _state, _source) = create_test_app(Reply::Tweets(vec![
            raw("1", "great", 9),
            raw("2", "awful", 12),
        ]));

        let response = app.clone().oneshot(search_request(r#"{"keyword": "rust"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_request("/api/tweets/rust")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let ids: Vec<&str> = json["tweets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["tweet_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(json["total_api_keys"], 2);

        let response = app.clone().oneshot(get_request("/api/tweets/python")).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(json["tweets"], serde_json::json!([]));

        let response = app.oneshot(get_request("/api/keywords")).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(json["keywords"][0]["keyword"], "rust");
        assert_eq!(json["keywords"][0]["sentiment_summary"]["positive"], 1);
        assert_eq!(json["keywords"][0]["sentiment_summary"]["negative"], 1);
    }

    #[test]
    fn test_cors_layer_accepts_origin_list() {
        let _ = cors_layer(&["http://localhost:8080".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
