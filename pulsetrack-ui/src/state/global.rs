//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::analytics::history::SearchHistory;
use crate::analytics::sequence::{push_applies, RequestSequencer};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Tweets of the result set currently displayed
    pub tweets: RwSignal<Vec<Tweet>>,
    /// Sentiment counts for the displayed tweets
    pub summary: RwSignal<SentimentSummary>,
    /// Keyword of the displayed results (empty before the first search)
    pub current_keyword: RwSignal<String>,
    /// Recent searches, most recent first
    pub history: RwSignal<SearchHistory>,
    /// Bearer token in use on the backend
    pub key_status: RwSignal<KeyStatus>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// A search is in flight
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    sequencer: StoredValue<RequestSequencer>,
}

/// Sentiment label assigned by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Display colour
    pub fn color(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "#4CAF50",
            SentimentLabel::Negative => "#F44336",
            SentimentLabel::Neutral => "#9E9E9E",
        }
    }
}

/// Sentiment scores of one tweet
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    #[serde(default)]
    pub compound: f64,
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub negative: f64,
    #[serde(default)]
    pub neutral: f64,
}

/// Public engagement counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Engagement {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub replies: u64,
}

impl Engagement {
    pub fn total(&self) -> u64 {
        self.likes + self.retweets + self.replies
    }
}

/// A scored tweet as sent by the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Tweet {
    pub tweet_id: String,
    pub text: String,
    #[serde(default)]
    pub keyword: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    #[serde(default)]
    pub fetched_at: Option<String>,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub engagement: Engagement,
}

/// Label counts over a result set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SentimentSummary {
    #[serde(default)]
    pub positive: u32,
    #[serde(default)]
    pub negative: u32,
    #[serde(default)]
    pub neutral: u32,
}

impl SentimentSummary {
    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }
}

/// Backend bearer token rotation status
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct KeyStatus {
    #[serde(default)]
    pub current_api_key: u32,
    #[serde(default)]
    pub total_api_keys: u32,
}

impl Default for KeyStatus {
    fn default() -> Self {
        Self {
            current_api_key: 1,
            total_api_keys: 0,
        }
    }
}

impl KeyStatus {
    /// Take the non-zero fields of an update
    pub fn merge(&mut self, update: KeyStatus) {
        if update.current_api_key > 0 {
            self.current_api_key = update.current_api_key;
        }
        if update.total_api_keys > 0 {
            self.total_api_keys = update.total_api_keys;
        }
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState::new());
}

impl GlobalState {
    fn new() -> Self {
        Self {
            tweets: create_rw_signal(Vec::new()),
            summary: create_rw_signal(SentimentSummary::default()),
            current_keyword: create_rw_signal(String::new()),
            history: create_rw_signal(SearchHistory::default()),
            key_status: create_rw_signal(KeyStatus::default()),
            ws_connected: create_rw_signal(false),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
            sequencer: store_value(RequestSequencer::default()),
        }
    }

    /// Whether a non-empty result set is displayed (tracked)
    pub fn has_results(&self) -> bool {
        self.tweets.with(|tweets| !tweets.is_empty())
    }

    /// Start a search: mark loading, record the keyword and issue a sequence number
    pub fn begin_search(&self, keyword: &str) -> u64 {
        self.loading.set(true);
        self.current_keyword.set(keyword.to_string());
        self.history.update(|history| history.record(keyword));

        let mut seq = 0;
        self.sequencer.update_value(|sequencer| seq = sequencer.issue());
        seq
    }

    /// Whether `seq` is still the latest search issued
    pub fn is_current(&self, seq: u64) -> bool {
        self.sequencer.with_value(|sequencer| sequencer.is_current(seq))
    }

    /// Replace the displayed result set
    pub fn apply_results(&self, tweets: Vec<Tweet>, summary: SentimentSummary, keys: KeyStatus) {
        self.tweets.set(tweets);
        self.summary.set(summary);
        self.apply_key_status(keys);
    }

    /// Apply a pushed result set if it belongs to the displayed keyword
    pub fn apply_push(
        &self,
        keyword: &str,
        tweets: Vec<Tweet>,
        summary: SentimentSummary,
        keys: KeyStatus,
    ) -> bool {
        let current = self.current_keyword.get_untracked();
        if !push_applies(&current, keyword) {
            return false;
        }

        if current.is_empty() {
            self.current_keyword.set(keyword.to_string());
        }
        self.apply_results(tweets, summary, keys);
        true
    }

    pub fn apply_key_status(&self, keys: KeyStatus) {
        self.key_status.update(|status| status.merge(keys));
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}
