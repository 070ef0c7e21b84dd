//! Trending Words Component

use leptos::*;

use crate::analytics::trending_words;
use crate::state::GlobalState;

#[component]
pub fn TrendingWords() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let tweets = state.tweets;

    let words = create_memo(move |_| tweets.with(|t| trending_words(t)));

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-lg font-semibold mb-4">"🔥 Trending Words"</h3>
            <div class="flex flex-wrap gap-2">
                {move || {
                    let words = words.get();
                    if words.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No trending words yet. Search for keywords first."</p>
                        }.into_view()
                    } else {
                        words.into_iter().enumerate().map(|(idx, item)| {
                            let hue = idx * 30;
                            view! {
                                <span
                                    class="px-3 py-2 rounded-full text-sm font-bold"
                                    style=format!(
                                        "background-color: hsla({hue}, 100%, 60%, 0.2); border: 2px solid hsl({hue}, 100%, 60%); color: hsl({hue}, 100%, 70%)"
                                    )
                                >
                                    {item.word}
                                    <span
                                        class="ml-2 px-2 rounded-full text-xs text-white"
                                        style=format!("background-color: hsl({hue}, 100%, 45%)")
                                    >
                                        {item.count}
                                    </span>
                                </span>
                            }
                        }).collect_view()
                    }
                }}
            </div>
        </section>
    }
}
