//! Search flow
//!
//! Issues a search, applies the response only if it is still the latest one
//! and reports failures with a blocking alert.

use leptos::*;

use super::global::GlobalState;
use crate::api;

/// Run a search for `keyword` and update the dashboard with the result
pub fn run_search(state: GlobalState, keyword: &str) {
    let keyword = keyword.trim().to_string();
    if keyword.is_empty() {
        return;
    }

    let seq = state.begin_search(&keyword);

    spawn_local(async move {
        let result = api::search_tweets(&keyword).await;

        if !state.is_current(seq) {
            web_sys::console::log_1(&format!("Discarding stale response for '{}' (request {})", keyword, seq).into());
            return;
        }

        match result {
            Ok(response) => {
                web_sys::console::log_1(&format!("Search '{}' returned {} tweets", response.keyword, response.tweets.len()).into());
                if let Some(message) = response.message.as_deref() {
                    state.show_success(message);
                }
                state.apply_results(response.tweets, response.sentiment_summary, response.keys);
            }
            Err(message) => {
                web_sys::console::error_1(&format!("Search failed: {}", message).into());
                alert(&message);
            }
        }

        state.loading.set(false);
    });
}

/// Blocking browser alert
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
