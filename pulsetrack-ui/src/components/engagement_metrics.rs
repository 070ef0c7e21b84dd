//! Engagement Analytics Component

use leptos::*;

use crate::analytics::engagement::preview;
use crate::analytics::engagement_stats;
use crate::state::GlobalState;

#[component]
pub fn EngagementMetrics() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let tweets = state.tweets;

    let stats = create_memo(move |_| tweets.with(|t| engagement_stats(t)));

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-lg font-semibold mb-4">"📊 Engagement Analytics"</h3>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-4">
                <StatTile icon="❤️" label="Total Likes" color="#2196F3"
                    value=Signal::derive(move || stats.get().total_likes.to_string()) />
                <StatTile icon="🔄" label="Total Retweets" color="#4CAF50"
                    value=Signal::derive(move || stats.get().total_retweets.to_string()) />
                <StatTile icon="💬" label="Total Replies" color="#FF9800"
                    value=Signal::derive(move || stats.get().total_replies.to_string()) />
                <StatTile icon="📈" label="Avg Per Tweet" color="#9C27B0"
                    value=Signal::derive(move || format!("{:.0}", stats.get().average)) />
            </div>

            {move || {
                tweets.with(|t| {
                    stats.get().top(t).map(|top| {
                        let engagement = top.engagement;
                        view! {
                            <div class="p-4 rounded-lg bg-gray-700 border-l-4 border-yellow-400">
                                <h4 class="font-semibold text-yellow-300 mb-2">"🏆 Most Engaged Tweet"</h4>
                                <p class="text-sm mb-2">{format!("\"{}...\"", preview(&top.text))}</p>
                                <div class="text-xs text-gray-400">
                                    {format!(
                                        "❤️ {} | 🔄 {} | 💬 {}",
                                        engagement.likes, engagement.retweets, engagement.replies
                                    )}
                                </div>
                            </div>
                        }
                    })
                })
            }}
        </section>
    }
}

#[component]
fn StatTile(
    icon: &'static str,
    label: &'static str,
    color: &'static str,
    value: Signal<String>,
) -> impl IntoView {
    view! {
        <div
            class="p-4 rounded-lg bg-gray-700 text-center border-l-4"
            style=format!("border-color: {}", color)
        >
            <div class="text-2xl font-bold" style=format!("color: {}", color)>
                {icon} " " {move || value.get()}
            </div>
            <div class="text-xs text-gray-400">{label}</div>
        </div>
    }
}
