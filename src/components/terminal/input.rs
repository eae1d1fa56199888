//! Terminal input line with its completion list.
//!
//! Keys are handled by the terminal's window listener; this component only
//! mirrors typed text into the session and renders the candidates.

use leptos::{ev, prelude::*};
use wasm_bindgen::JsCast;

use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/terminal/input.module.css");

#[component]
pub fn Input() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let term = ctx.terminal;
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // Focus on mount, and again whenever the line is replaced.
    Effect::new(move || {
        term.input.track();
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            let len = input.value().len() as u32;
            let _ = input.set_selection_range(len, len);
        }
    });

    let handle_input = move |ev: ev::Event| {
        let Some(target) = ev.target() else { return };
        let value = target.unchecked_into::<web_sys::HtmlInputElement>().value();
        term.update(|s| s.set_input(value));
    };

    let suggestions_view = move || {
        let candidates = term.completions.get();
        if candidates.is_empty() {
            return None;
        }
        let selected = term.selected.get();
        Some(view! {
            <div class=css::suggestions>
                {candidates.into_iter().enumerate().map(|(i, candidate)| {
                    let class_name = if i == selected {
                        format!("{} {}", css::suggestion, css::suggestionActive)
                    } else {
                        css::suggestion.to_string()
                    };
                    view! {
                        <span
                            class=class_name
                            on:click=move |ev| {
                                ev.stop_propagation();
                                term.update(|s| s.choose_completion(i));
                            }
                        >
                            {candidate}
                        </span>
                    }
                }).collect_view()}
            </div>
        })
    };

    view! {
        <div class=css::inputWrapper>
            <div class=css::line>
                <span class=css::prompt>{move || term.prompt.get()}</span>
                <input
                    node_ref=input_ref
                    type="text"
                    class=css::input
                    autocomplete="off"
                    spellcheck="false"
                    prop:value=move || term.input.get()
                    on:input=handle_input
                />
            </div>
            {suggestions_view}
        </div>
    }
}
