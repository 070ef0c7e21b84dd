//! State Management
//!
//! Global application state, the search flow and WebSocket connection management.

pub mod global;
pub mod search;
pub mod websocket;

pub use global::{provide_global_state, GlobalState};
pub use search::{alert, run_search};
