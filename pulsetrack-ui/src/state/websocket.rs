//! WebSocket Client
//!
//! Push channel to the PulseTrack server. Receives result sets broadcast
//! after any dashboard's search and keeps the API key badge current.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::global::{GlobalState, KeyStatus, SentimentSummary, Tweet};

/// Reconnect attempts before giving up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Upper bound on the reconnect delay
const MAX_RECONNECT_DELAY_MS: u32 = 30_000;

/// Keepalive ping interval
const PING_INTERVAL_MS: u32 = 30_000;

/// WebSocket message types from server
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    Connected {
        message: String,
        #[serde(flatten)]
        keys: KeyStatus,
    },
    NewTweets {
        keyword: String,
        #[serde(default)]
        tweets: Vec<Tweet>,
        #[serde(default)]
        sentiment_summary: SentimentSummary,
        #[serde(flatten)]
        keys: KeyStatus,
    },
    Pong,
    Error {
        message: String,
    },
}

/// WebSocket client message types
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping,
}

/// Delay before reconnect attempt `attempt` (0-based), or `None` once attempts are exhausted
pub fn reconnect_delay_ms(attempt: u32) -> Option<u32> {
    if attempt >= MAX_RECONNECT_ATTEMPTS {
        return None;
    }
    Some(2_u32.saturating_pow(attempt).saturating_mul(1000).min(MAX_RECONNECT_DELAY_MS))
}

/// WebSocket client with exponential backoff reconnect
#[derive(Clone)]
pub struct WebSocketClient {
    ws: Rc<RefCell<Option<WebSocket>>>,
    url: String,
    reconnect_attempts: Rc<RefCell<u32>>,
}

impl WebSocketClient {
    /// Create a new WebSocket client
    pub fn new(url: &str) -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            url: url.to_string(),
            reconnect_attempts: Rc::new(RefCell::new(0)),
        }
    }

    /// Connect to the WebSocket server
    pub fn connect(&self, state: GlobalState) {
        match WebSocket::new(&self.url) {
            Ok(ws) => {
                self.setup_handlers(&ws, state);
                *self.ws.borrow_mut() = Some(ws);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
                self.schedule_reconnect(state);
            }
        }
    }

    /// Set up WebSocket event handlers
    fn setup_handlers(&self, ws: &WebSocket, state: GlobalState) {
        // On open
        let state_clone = state.clone();
        let reconnect_clone = Rc::clone(&self.reconnect_attempts);
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"WebSocket connected".into());
            state_clone.ws_connected.set(true);
            *reconnect_clone.borrow_mut() = 0;
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message
        let state_clone = state.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text_str: String = text.into();
                handle_message(&text_str, &state_clone);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        // On close
        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(&format!("WebSocket closed: code={}, reason={}", event.code(), event.reason()).into());
            state.ws_connected.set(false);
            client.schedule_reconnect(state.clone());
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        // On error
        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("WebSocket error: {:?}", e).into());
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    /// Schedule a reconnect attempt
    fn schedule_reconnect(&self, state: GlobalState) {
        let attempts = *self.reconnect_attempts.borrow();
        let Some(delay) = reconnect_delay_ms(attempts) else {
            web_sys::console::error_1(&"Max reconnect attempts reached".into());
            return;
        };
        *self.reconnect_attempts.borrow_mut() = attempts + 1;

        let client = self.clone();
        gloo_timers::callback::Timeout::new(delay, move || {
            web_sys::console::log_1(&format!("Attempting reconnect (attempt {})", attempts + 1).into());
            client.connect(state);
        }).forget();
    }

    /// Send a message to the server
    pub fn send(&self, message: &ClientMessage) -> Result<(), String> {
        let ws_guard = self.ws.borrow();
        let ws = ws_guard.as_ref().ok_or("WebSocket not connected")?;

        let json = serde_json::to_string(message).map_err(|e| e.to_string())?;
        ws.send_with_str(&json).map_err(|e| format!("{:?}", e))
    }

    /// Send a ping
    pub fn ping(&self) -> Result<(), String> {
        self.send(&ClientMessage::Ping)
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.ws.borrow()
            .as_ref()
            .map(|ws| ws.ready_state() == WebSocket::OPEN)
            .unwrap_or(false)
    }
}

/// Handle incoming WebSocket message
fn handle_message(text: &str, state: &GlobalState) {
    match serde_json::from_str::<WsMessage>(text) {
        Ok(msg) => match msg {
            WsMessage::Connected { message, keys } => {
                web_sys::console::log_1(&message.into());
                state.apply_key_status(keys);
            }
            WsMessage::NewTweets { keyword, tweets, sentiment_summary, keys } => {
                let count = tweets.len();
                if state.apply_push(&keyword, tweets, sentiment_summary, keys) {
                    web_sys::console::log_1(&format!("Received real-time update: {} tweets for '{}'", count, keyword).into());
                } else {
                    // Still track key rotation from other dashboards' searches
                    state.apply_key_status(keys);
                    web_sys::console::log_1(&format!("Ignored update for '{}'", keyword).into());
                }
            }
            WsMessage::Pong => {
                // Connection alive
            }
            WsMessage::Error { message } => {
                web_sys::console::error_1(&format!("Server error: {}", message).into());
                state.show_error(&message);
            }
        },
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to parse WebSocket message: {}", e).into());
        }
    }
}

/// Map the REST base URL to the push channel URL
pub fn websocket_url(api_base: &str) -> String {
    let base = api_base.trim_end_matches('/');
    let base = base.strip_suffix("/api").unwrap_or(base);
    let base = base.replacen("https://", "wss://", 1).replacen("http://", "ws://", 1);
    format!("{}/ws", base)
}

/// Initialize WebSocket connection (call from app root)
pub fn init_websocket(state: GlobalState, api_base: &str) {
    let client = WebSocketClient::new(&websocket_url(api_base));
    client.connect(state);

    gloo_timers::callback::Interval::new(PING_INTERVAL_MS, move || {
        if client.is_connected() {
            let _ = client.ping();
        }
    }).forget();
}
