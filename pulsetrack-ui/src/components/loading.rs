//! Loading Component

use leptos::*;

/// Spinner shown while a search is in flight
#[component]
pub fn Loading(
    #[prop(default = "Loading...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center space-x-3 py-8 text-gray-400">
            <div class="loading-spinner w-8 h-8" />
            <span>{label}</span>
        </div>
    }
}
