//! Recent Searches Component
//!
//! History chips; clicking one runs that search again.

use leptos::*;

use crate::state::{run_search, GlobalState};

#[component]
pub fn SearchHistoryChips() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let history = state.history;

    view! {
        <Show when=move || history.with(|h| !h.is_empty())>
            <section class="bg-gray-800 rounded-xl p-4 mb-6">
                <h4 class="text-sm font-semibold text-gray-300 mb-3">"📋 Recent Searches:"</h4>
                <div class="flex flex-wrap gap-2">
                    {
                        let state = state.clone();
                        move || {
                            history.get()
                                .keywords()
                                .iter()
                                .cloned()
                                .map(|keyword| {
                                    let state = state.clone();
                                    let label = keyword.clone();
                                    view! {
                                        <button
                                            class="px-3 py-2 bg-cyan-500 hover:bg-cyan-600 rounded-full text-xs transition-colors"
                                            on:click=move |_| run_search(state.clone(), &keyword)
                                        >
                                            {label}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }
                    }
                </div>
            </section>
        </Show>
    }
}
