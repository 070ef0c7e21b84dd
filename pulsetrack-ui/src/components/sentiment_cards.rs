//! Sentiment Count Cards
//!
//! Positive/negative/neutral totals and the CSV export button.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::analytics::{export_file_name, tweets_to_csv};
use crate::state::global::{GlobalState, SentimentLabel};
use crate::state::alert;

const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

#[component]
pub fn SentimentCards() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let summary = state.summary;
    let tweets = state.tweets;
    let keyword = state.current_keyword;

    let on_export = move |_| {
        let Some(csv) = tweets.with_untracked(|t| tweets_to_csv(t)) else {
            alert("No tweets to export");
            return;
        };
        let file_name = export_file_name(&keyword.get_untracked(), chrono::Utc::now().timestamp_millis());
        if let Err(e) = download(&csv, &file_name) {
            web_sys::console::error_1(&format!("Export failed: {}", e).into());
        }
    };

    view! {
        <section class="space-y-4">
            <div class="grid grid-cols-3 gap-3">
                <CountCard label=SentimentLabel::Positive icon="😊" count=Signal::derive(move || summary.get().positive) />
                <CountCard label=SentimentLabel::Negative icon="😞" count=Signal::derive(move || summary.get().negative) />
                <CountCard label=SentimentLabel::Neutral icon="😐" count=Signal::derive(move || summary.get().neutral) />
            </div>

            <Show when=move || tweets.with(|t| !t.is_empty())>
                <button
                    on:click=on_export
                    class="w-full px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                >
                    "📥 Export to CSV"
                </button>
            </Show>
        </section>
    }
}

#[component]
fn CountCard(label: SentimentLabel, icon: &'static str, count: Signal<u32>) -> impl IntoView {
    let title = match label {
        SentimentLabel::Positive => "Positive",
        SentimentLabel::Negative => "Negative",
        SentimentLabel::Neutral => "Neutral",
    };

    view! {
        <div
            class="p-5 rounded-lg text-center text-white shadow hover:-translate-y-0.5 transition-transform"
            style=format!("background-color: {}", label.color())
        >
            <div class="text-3xl font-bold">{move || count.get()}</div>
            <div class="text-xs mt-1">{format!("{} {}", icon, title)}</div>
        </div>
    }
}

/// Save `content` as a local file through a Blob object URL
fn download(content: &str, file_name: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let blob = csv_blob(content)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{:?}", e))?;

    let a = document.create_element("a").map_err(|e| format!("{:?}", e))?;
    let _ = a.set_attribute("href", &url);
    let _ = a.set_attribute("download", file_name);
    if let Some(anchor) = a.dyn_ref::<web_sys::HtmlElement>() {
        anchor.click();
    }

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

fn csv_blob(content: &str) -> Result<web_sys::Blob, String> {
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(CSV_MIME_TYPE);
    web_sys::Blob::new_with_str_sequence_and_options(&js_sys::Array::of1(&content.into()), &options)
        .map_err(|e| format!("{:?}", e))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_export_blob_is_csv() {
        let blob = csv_blob("tweet_id,text\n1,hello\n").unwrap();
        assert_eq!(blob.type_(), CSV_MIME_TYPE);
        assert!(blob.size() > 0.0);
    }
}
