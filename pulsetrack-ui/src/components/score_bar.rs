//! Overall Sentiment Score Component

use leptos::*;

use crate::analytics::{bar_width_percent, overall_score, ScoreLabel};
use crate::state::GlobalState;

/// Bar from -1 (empty) to +1 (full), shown once there are tweets
#[component]
pub fn ScoreBar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let summary = state.summary;
    let tweets = state.tweets;

    let score = create_memo(move |_| overall_score(&summary.get()));

    view! {
        <Show when=move || tweets.with(|t| !t.is_empty())>
            <section class="bg-gray-800 rounded-xl p-4 mb-6">
                <h4 class="text-sm font-semibold text-gray-300 mb-3">"Overall Sentiment Score"</h4>
                <div class="w-full h-8 bg-gray-700 rounded-full overflow-hidden">
                    <div
                        class="h-full flex items-center justify-center text-xs font-bold text-white transition-all duration-300"
                        style=move || {
                            let value = score.get();
                            format!(
                                "width: {:.1}%; background-color: {}",
                                bar_width_percent(value),
                                ScoreLabel::from_score(value).color()
                            )
                        }
                    >
                        {move || ScoreLabel::from_score(score.get()).text()}
                    </div>
                </div>
                <p class="text-xs text-gray-400 mt-2 text-right">
                    {move || format!("Score: {:+.2}", score.get())}
                </p>
            </section>
        </Show>
    }
}
