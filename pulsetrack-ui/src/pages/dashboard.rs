//! Dashboard Page
//!
//! Search form, history, score and the analytics panels for the current
//! result set. Mounted at `/` and at `/search/:keyword`, which runs a search
//! for the keyword on load.

use leptos::*;
use leptos_router::*;

use crate::components::{
    EngagementMetrics, Loading, ScoreBar, SearchBar, SearchHistoryChips, SentimentCards,
    SentimentChart, SentimentTimeline, TrendingWords, TweetList,
};
use crate::state::{run_search, GlobalState};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();

    let loading = state.loading;
    let current_keyword = state.current_keyword;
    let has_results = {
        let state = state.clone();
        move || state.has_results()
    };

    // Deep link: search the keyword from the URL
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let keyword = params.with(|p| p.get("keyword").cloned());
        if let Some(keyword) = keyword {
            let state = state_for_effect.clone();
            untrack(move || run_search(state, &keyword));
        }
    });

    view! {
        <div class="space-y-6">
            <SearchBar />
            <SearchHistoryChips />

            <Show when=move || current_keyword.with(|k| !k.is_empty())>
                <h2 class="text-2xl font-semibold text-center">
                    {move || format!("📊 Results for: \"{}\"", current_keyword.get())}
                </h2>
            </Show>

            <Show when=move || loading.get()>
                <Loading label="Fetching tweets..." />
            </Show>

            <ScoreBar />

            <div class="grid md:grid-cols-2 gap-6">
                <SentimentChart />
                <div class="space-y-6">
                    <SentimentCards />
                </div>
            </div>

            // Analytics panels only for a non-empty result set
            <Show when=has_results>
                <TrendingWords />
                <EngagementMetrics />
                <SentimentTimeline />
            </Show>

            <TweetList />
        </div>
    }
}
