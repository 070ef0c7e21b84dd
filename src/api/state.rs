//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::Config;
use crate::sentiment::SentimentAnalyzer;
use crate::storage::TweetStore;
use crate::twitter::{KeyRing, TweetSource};
use crate::websocket::{ConnectionHub, HubConfig};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Tweet and keyword persistence
    pub store: TweetStore,
    /// Where tweets are fetched from
    pub source: Arc<dyn TweetSource>,
    /// Bearer tokens for the source
    pub keys: Arc<KeyRing>,
    pub analyzer: Arc<SentimentAnalyzer>,
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Connected dashboards
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: TweetStore,
        source: Arc<dyn TweetSource>,
        keys: KeyRing,
    ) -> Self {
        let hub_config = HubConfig {
            max_connections: config.api.max_ws_connections,
        };

        Self {
            store,
            source,
            keys: Arc::new(keys),
            analyzer: Arc::new(SentimentAnalyzer::new()),
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}
