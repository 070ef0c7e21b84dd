//! Tweet List Component

use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn TweetList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let tweets = state.tweets;

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-lg font-semibold mb-4">
                {move || format!("Tweets ({})", tweets.with(|t| t.len()))}
            </h3>
            <div class="max-h-[500px] overflow-y-auto space-y-3">
                {move || {
                    let tweets = tweets.get();
                    if tweets.is_empty() {
                        return view! {
                            <p class="text-gray-400">"No tweets to display. Search for a keyword to get started."</p>
                        }.into_view();
                    }

                    tweets.into_iter().map(|tweet| {
                        let color = tweet.sentiment.label.color();
                        let engagement = tweet.engagement;
                        view! {
                            <article
                                class="p-4 rounded-lg border border-gray-700 border-l-4"
                                style=format!("border-left-color: {}", color)
                            >
                                <p class="text-sm mb-3">{tweet.text}</p>
                                <div class="flex items-center justify-between text-xs text-gray-400">
                                    <span
                                        class="px-2 py-1 rounded text-white font-bold"
                                        style=format!("background-color: {}", color)
                                    >
                                        {tweet.sentiment.label.as_str().to_uppercase()}
                                    </span>
                                    <span>
                                        {format!(
                                            "❤️ {} | 🔄 {} | 💬 {}",
                                            engagement.likes, engagement.retweets, engagement.replies
                                        )}
                                    </span>
                                </div>
                            </article>
                        }
                    }).collect_view()
                }}
            </div>
        </section>
    }
}
