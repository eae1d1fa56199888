use leptos::prelude::*;

use crate::app::AppContext;
use crate::models::{Frame, HistoryData, HistoryEntry, RunId, Tone};

stylance::import_crate_style!(css, "src/components/terminal/output.module.css");

/// CSS class for a frame line tone.
fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Normal => css::textFg,
        Tone::Bright => css::textBright,
        Tone::Dim => css::textDim,
        Tone::Accent => css::textAccent,
        Tone::Alert => css::textAlert,
    }
}

#[component]
pub fn Output(entry: HistoryEntry) -> impl IntoView {
    match entry.data {
        HistoryData::Command { prompt, input } => view! {
            <div class=css::command>
                <span class=css::textBright>{prompt}</span>
                <span class=css::textFg>{input}</span>
            </div>
        }
        .into_any(),
        HistoryData::Output(text) => view! {
            <div class=format!("{} {}", css::line, css::textFg)>{text}</div>
        }
        .into_any(),
        HistoryData::Error(text) => view! {
            <div class=format!("{} {}", css::line, css::textRed)>{text}</div>
        }
        .into_any(),
        HistoryData::Component { run, .. } => view! { <ModeFrame run=run /> }.into_any(),
    }
}

/// Live or frozen frame of a special mode run.
#[component]
fn ModeFrame(run: RunId) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let term = ctx.terminal;

    let frame = Memo::new(move |_| {
        term.frame_clock.track();
        term.with(|s| s.frame_for(run))
    });

    view! {
        <div class=css::frame>
            {move || frame.get().map(render_frame)}
        </div>
    }
}

fn render_frame(frame: Frame) -> impl IntoView {
    frame
        .lines
        .into_iter()
        .map(|line| {
            let class = tone_class(line.tone);
            if line.text.is_empty() {
                view! { <div class=css::lineEmpty></div> }.into_any()
            } else {
                view! { <pre class=class>{line.text}</pre> }.into_any()
            }
        })
        .collect_view()
}
