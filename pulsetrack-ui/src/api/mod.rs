//! API Client
//!
//! HTTP client for the PulseTrack REST API.

mod client;

pub use client::*;
