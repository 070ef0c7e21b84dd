//! WebSocket Real-Time Push
//!
//! Pushes freshly scored tweets to every connected dashboard.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Tracks active connections and broadcasts to them
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:5000/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'new_tweets') console.log(msg.keyword, msg.tweets.length);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage, CONNECTED_MESSAGE};
