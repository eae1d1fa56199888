//! Custom hooks for terminal components.

use leptos::prelude::*;

use crate::app::TerminalState;
use crate::utils::RepeatingTask;

/// Drive the running special mode with a repeating timer.
///
/// The timer restarts whenever the run or its tick period changes (the snake
/// speeds up as it eats) and stops when no mode is active. The task lives in
/// the hook's owner, so unmounting cancels it.
pub fn use_mode_driver(term: TerminalState) {
    let task = StoredValue::new_local(None::<RepeatingTask>);

    Effect::new(move || {
        let active = term.active.get();
        task.set_value(None);

        if let Some((_, tick_ms)) = active {
            let ticker = RepeatingTask::start(tick_ms, move || {
                term.update(|s| s.advance(tick_ms));
            });
            task.set_value(Some(ticker));
        }
    });
}

/// Keep the scrollback pinned to its newest entry.
///
/// Tracks both new entries and frame updates, since a growing mode frame
/// (the hack log, the rolling credits) also changes the scroll height.
pub fn use_autoscroll(term: TerminalState, output_ref: NodeRef<leptos::html::Div>) {
    Effect::new(move || {
        term.entries.track();
        term.frame_clock.track();

        if let Some(el) = output_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });
}
