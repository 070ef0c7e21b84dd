//! PulseTrack Dashboard
//!
//! Real-time tweet sentiment dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Keyword search with sentiment breakdown
//! - Trending words, engagement and hourly timeline panels
//! - CSV export of the current result set
//! - WebSocket live updates
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the PulseTrack API via HTTP and WebSocket.

use leptos::*;

mod analytics;
mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
