//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::Toast;
use crate::pages::Dashboard;
use crate::state::{provide_global_state, GlobalState};
use crate::state::websocket::init_websocket;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");
    init_websocket(state.clone(), &api::get_api_base());

    // Seed the API key badge before the first push arrives
    let state_for_health = state.clone();
    spawn_local(async move {
        match api::check_health().await {
            Ok(health) => {
                web_sys::console::log_1(&format!(
                    "API {}: {} (v{}, up {}s)",
                    health.status,
                    health.message.as_deref().unwrap_or(""),
                    health.version.as_deref().unwrap_or("unknown"),
                    health.uptime_seconds
                ).into());
                state_for_health.apply_key_status(health.keys);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Health check failed: {}", e).into());
            }
        }
    });

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Header />

                <main class="flex-1 container mx-auto max-w-6xl px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/search/:keyword" view=Dashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />
                <Toast />
            </div>
        </Router>
    }
}

/// Title bar with connection and API key badges
#[component]
fn Header() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let ws_connected = state.ws_connected;
    let key_status = state.key_status;

    view! {
        <header class="bg-gradient-to-br from-cyan-400 to-cyan-700 py-8 px-4 text-center shadow-lg">
            <h1 class="text-4xl font-bold tracking-tight">"🔥 PulseTrack"</h1>
            <p class="mt-2 font-light">"Real-time Social Media Sentiment Dashboard"</p>

            <div class="mt-4 flex justify-center flex-wrap gap-4 text-sm">
                <span class="bg-white/20 px-3 py-2 rounded-md">
                    {move || if ws_connected.get() { "🟢 Connected" } else { "🔴 Disconnected" }}
                </span>
                <span class="bg-white/20 px-3 py-2 rounded-md">
                    {move || {
                        let keys = key_status.get();
                        format!("🔑 API Key: {}/{}", keys.current_api_key, keys.total_api_keys)
                    }}
                </span>
            </div>
        </header>
    }
}

/// Footer component showing connection status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let ws_connected = state.ws_connected;
    let loading = state.loading;
    let tweets = state.tweets;

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || {
                        if ws_connected.get() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                    <span>"Live updates on"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-red-400">
                                    <span class="w-2 h-2 bg-red-400 rounded-full" />
                                    <span>"Live updates off"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                <div class="text-gray-400">
                    {move || format!("{} tweets on screen", tweets.with(|t| t.len()))}
                </div>

                {move || {
                    if loading.get() {
                        view! {
                            <div class="flex items-center space-x-2 text-cyan-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Loading..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-cyan-600 hover:bg-cyan-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
