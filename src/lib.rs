//! # PulseTrack
//!
//! Real-time social media sentiment service. A dashboard submits a keyword,
//! the server fetches recent tweets from the Twitter API v2, scores each one,
//! stores the batch and pushes it to every connected dashboard.
//!
//! ## Modules
//!
//! - [`twitter`]: Recent-search client and bearer token rotation
//! - [`sentiment`]: VADER sentiment scoring
//! - [`storage`]: SQLite persistence for tweets and keyword statistics
//! - [`websocket`]: Push channel to dashboards
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulsetrack::sentiment::{SentimentAnalyzer, SentimentLabel};
//!
//! let analyzer = SentimentAnalyzer::new();
//! let score = analyzer.analyze("The new release is really great!");
//! assert_eq!(score.label, SentimentLabel::Positive);
//! ```

pub mod api;
pub mod config;
pub mod sentiment;
pub mod storage;
pub mod twitter;
pub mod websocket;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};

pub use sentiment::{SentimentAnalyzer, SentimentLabel, SentimentScore, SentimentSummary};

pub use storage::{Engagement, KeywordStats, StorageError, StorageResult, TweetRecord, TweetStore};

pub use twitter::{KeyRing, KeyStatus, RawTweet, TweetSource, TwitterClient, TwitterError};

pub use websocket::{ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage};
