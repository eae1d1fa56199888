//! Terminal view component.
//!
//! Scrollback, the input line, and the glitch overlay. Keys are read from a
//! window listener so special modes receive them even when the input field
//! is hidden.

use leptos::{ev, prelude::*};

use super::hooks::{use_autoscroll, use_mode_driver};
use crate::app::AppContext;
use crate::components::terminal::{Input, Output};
use crate::core::Key;
use crate::models::{CorruptionBlock, VisualEffect};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/terminal/terminal.module.css");

fn container_style(color: &str, effect: Option<&VisualEffect>) -> String {
    let mut style = format!("--term-color: {};", color);
    if let Some(effect) = effect {
        style.push_str(&format!(
            " filter: {}; text-shadow: {};",
            effect.filter_css(),
            effect.text_shadow_css()
        ));
    }
    style
}

fn corruption_style(block: &CorruptionBlock) -> String {
    let color = if block.red {
        "rgba(255,0,0,0.5)"
    } else {
        "rgba(0,255,255,0.5)"
    };
    format!(
        "left: {:.1}%; top: {:.1}%; width: {size:.0}px; height: {size:.0}px; \
         transform: rotate({:.0}deg); opacity: {:.2}; background: {};",
        block.left_pct,
        block.top_pct,
        block.rotate_deg,
        block.opacity,
        color,
        size = block.size_px,
    )
}

#[component]
pub fn Terminal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let term = ctx.terminal;
    let output_ref = NodeRef::<leptos::html::Div>::new();

    use_mode_driver(term);
    use_autoscroll(term, output_ref);

    let handle = window_event_listener(ev::keydown, move |ev| {
        let key = Key::from_dom(&ev.key(), ev.ctrl_key(), ev.meta_key());
        if term.update(|s| s.handle_key(key)).unwrap_or(false) {
            ev.prevent_default();
        }
    });
    on_cleanup(move || handle.remove());

    let style = move || {
        let color = term.theme.get().color();
        term.effect
            .with(|effect| container_style(color, effect.as_ref()))
    };

    let overlay = move || {
        term.effect.get().map(|effect| {
            let blocks = effect
                .corruption
                .iter()
                .map(|block| view! { <div class=css::corruption style=corruption_style(block)></div> })
                .collect_view();
            let scanlines = effect
                .scanlines
                .then(|| view! { <div class=css::scanlines></div> });
            view! { {scanlines} {blocks} }
        })
    };

    view! {
        <div
            class=css::container
            style=style
            on:click=move |_| {
                dom::focus_element("input");
            }
        >
            <div node_ref=output_ref class=css::output>
                <For
                    each=move || term.entries.get()
                    key=|entry| entry.id
                    children=|entry| view! { <Output entry=entry /> }
                />
            </div>

            <Show
                when=move || term.active.with(|a| a.is_none())
                fallback=|| ()
            >
                <div class=css::inputArea>
                    <Input />
                </div>
            </Show>

            {overlay}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_style_without_effect() {
        assert_eq!(container_style("#33ff33", None), "--term-color: #33ff33;");
    }

    #[test]
    fn test_container_style_with_effect() {
        let effect = VisualEffect {
            hue_rotate_deg: Some(90.0),
            shadow_offsets_px: Some((2.0, -2.0)),
            ..VisualEffect::default()
        };
        let style = container_style("#ffb000", Some(&effect));
        assert!(style.starts_with("--term-color: #ffb000;"));
        assert!(style.contains("filter: hue-rotate(90deg);"));
        assert!(style.contains("text-shadow: 2.0px 0 rgba(255,0,0,0.5), -2.0px 0"));
    }

    #[test]
    fn test_corruption_style() {
        let block = CorruptionBlock {
            left_pct: 12.5,
            top_pct: 40.0,
            size_px: 30.0,
            rotate_deg: 45.0,
            opacity: 0.35,
            red: true,
        };
        let style = corruption_style(&block);
        assert!(style.contains("left: 12.5%;"));
        assert!(style.contains("width: 30px; height: 30px;"));
        assert!(style.contains("rotate(45deg)"));
        assert!(style.contains("rgba(255,0,0,0.5)"));
    }
}
