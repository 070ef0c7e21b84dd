//! Sentiment Timeline Chart
//!
//! Stacked bars of label counts per hour of day, in the viewer's time zone.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::analytics::{hourly_buckets, HourBucket};
use crate::state::global::{GlobalState, SentimentLabel};

#[component]
pub fn SentimentTimeline() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let tweets = state.tweets;

    let buckets = create_memo(move |_| tweets.with(|t| hourly_buckets(t, &chrono::Local)));

    create_effect(move |_| {
        let buckets = buckets.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_timeline(&canvas, &buckets);
        }
    });

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-lg font-semibold mb-4">"⏱️ Sentiment Timeline"</h3>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full h-64 rounded-lg"
            />
        </section>
    }
}

fn draw_timeline(canvas: &HtmlCanvasElement, buckets: &[HourBucket]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 40.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if buckets.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No timeline data yet", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    let max_total = buckets.iter().map(HourBucket::total).max().unwrap_or(1).max(1) as f64;

    // Grid and y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = max_total * (1.0 - i as f64 / 4.0);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let slot = chart_width / buckets.len() as f64;
    let bar_width = (slot * 0.6).min(40.0);

    for (i, bucket) in buckets.iter().enumerate() {
        let x = margin_left + slot * i as f64 + (slot - bar_width) / 2.0;
        let mut y = margin_top + chart_height;

        let segments = [
            (SentimentLabel::Positive, bucket.positive),
            (SentimentLabel::Negative, bucket.negative),
            (SentimentLabel::Neutral, bucket.neutral),
        ];
        for (label, count) in segments {
            if count == 0 {
                continue;
            }
            let h = count as f64 / max_total * chart_height;
            y -= h;
            ctx.set_fill_style(&label.color().into());
            ctx.fill_rect(x, y, bar_width, h);
        }

        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(&bucket.label(), x, height - 15.0);
    }
}
