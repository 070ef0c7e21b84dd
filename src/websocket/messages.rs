//! WebSocket Message Types
//!
//! JSON messages exchanged between dashboards and the PulseTrack server,
//! tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentSummary;
use crate::storage::TweetRecord;
use crate::twitter::KeyStatus;

/// Greeting sent to every new connection
pub const CONNECTED_MESSAGE: &str = "Connected to PulseTrack server";

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        message: String,
        current_api_key: usize,
        total_api_keys: usize,
    },
    /// A search produced a fresh batch of scored tweets
    NewTweets {
        keyword: String,
        tweets: Vec<TweetRecord>,
        sentiment_summary: SentimentSummary,
        current_api_key: usize,
        total_api_keys: usize,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error { message: String },
}

impl ServerMessage {
    pub fn connected(keys: KeyStatus) -> Self {
        ServerMessage::Connected {
            message: CONNECTED_MESSAGE.to_string(),
            current_api_key: keys.current_api_key,
            total_api_keys: keys.total_api_keys,
        }
    }

    pub fn new_tweets(
        keyword: impl Into<String>,
        tweets: Vec<TweetRecord>,
        sentiment_summary: SentimentSummary,
        keys: KeyStatus,
    ) -> Self {
        ServerMessage::NewTweets {
            keyword: keyword.into(),
            tweets,
            sentiment_summary,
            current_api_key: keys.current_api_key,
            total_api_keys: keys.total_api_keys,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Wire text of this message
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
