//! Search Bar Component
//!
//! Keyword form. Disabled while a search is in flight.

use leptos::*;

use crate::state::{run_search, GlobalState};

#[component]
pub fn SearchBar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (keyword, set_keyword) = create_signal(String::new());
    let loading = state.loading;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let k = keyword.get_untracked();
        if k.trim().is_empty() {
            return;
        }
        run_search(state.clone(), &k);
    };

    view! {
        <form on:submit=on_submit class="flex gap-3 mb-6">
            <input
                type="text"
                placeholder="Enter a keyword, hashtag or @handle"
                class="flex-1 px-4 py-3 bg-gray-800 border border-gray-700 rounded-lg text-white \
                       focus:outline-none focus:border-cyan-400"
                prop:value=keyword
                on:input=move |ev| set_keyword.set(event_target_value(&ev))
                disabled=move || loading.get()
            />
            <button
                type="submit"
                class="px-6 py-3 bg-cyan-500 hover:bg-cyan-600 disabled:opacity-50 rounded-lg font-medium transition-colors"
                disabled=move || loading.get() || keyword.get().trim().is_empty()
            >
                {move || if loading.get() { "Searching..." } else { "Search" }}
            </button>
        </form>
    }
}
