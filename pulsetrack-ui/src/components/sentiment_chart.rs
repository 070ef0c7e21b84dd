//! Sentiment Distribution Chart
//!
//! Pie chart of the label counts using HTML5 Canvas.

use leptos::*;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::{GlobalState, SentimentLabel, SentimentSummary};

#[component]
pub fn SentimentChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let summary = state.summary;

    // Redraw when the counts change
    create_effect(move |_| {
        let summary = summary.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_pie(&canvas, &summary);
        }
    });

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h3 class="text-lg font-semibold mb-4">"Sentiment Distribution"</h3>
            <canvas
                node_ref=canvas_ref
                width="400"
                height="300"
                class="w-full h-64 rounded-lg"
            />
        </section>
    }
}

fn draw_pie(canvas: &HtmlCanvasElement, summary: &SentimentSummary) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let total = summary.total();
    if total == 0 {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No sentiment data yet", width / 2.0 - 80.0, height / 2.0);
        return;
    }

    let slices = [
        (SentimentLabel::Positive, summary.positive),
        (SentimentLabel::Negative, summary.negative),
        (SentimentLabel::Neutral, summary.neutral),
    ];

    let cx = width / 2.0 - 60.0;
    let cy = height / 2.0;
    let radius = (height / 2.0 - 20.0).min(cx - 10.0);

    let mut start = -PI / 2.0;
    for (label, count) in slices {
        if count == 0 {
            continue;
        }
        let sweep = count as f64 / total as f64 * PI * 2.0;

        ctx.set_fill_style(&label.color().into());
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, start, start + sweep);
        ctx.close_path();
        ctx.fill();

        start += sweep;
    }

    // Legend
    ctx.set_font("13px sans-serif");
    let legend_x = width - 120.0;
    for (i, (label, count)) in slices.iter().enumerate() {
        let y = cy - 30.0 + i as f64 * 24.0;
        ctx.set_fill_style(&label.color().into());
        ctx.fill_rect(legend_x, y - 10.0, 12.0, 12.0);

        let percent = *count as f64 / total as f64 * 100.0;
        ctx.set_fill_style(&"#d1d5db".into()); // gray-300
        let _ = ctx.fill_text(&format!("{} {:.0}%", label.as_str(), percent), legend_x + 18.0, y);
    }
}
