//! Root application module.
//!
//! Contains the main App component, AppContext definition and TerminalState,
//! which mirrors the plain-Rust [`TerminalSession`] into Leptos signals.

use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::components::terminal::{BrowserHost, Terminal};
use crate::core::TerminalSession;
use crate::models::{HistoryEntry, RunId, Theme, VisualEffect};

// ============================================================================
// TerminalState
// ============================================================================

/// Signals rendered by the view, plus the session they are read from.
///
/// The session is the single source of truth. Every handler mutates it and
/// then calls [`TerminalState::sync`], which copies whatever changed into the
/// signals.
///
/// # Note
///
/// This struct is `Copy` because every field is an arena handle, including
/// the locally stored session.
#[derive(Clone, Copy)]
pub struct TerminalState {
    /// Scrollback entries, oldest first.
    pub entries: RwSignal<Vec<HistoryEntry>>,
    /// Prompt for the current working directory.
    pub prompt: RwSignal<String>,
    /// Contents of the input line.
    pub input: RwSignal<String>,
    /// Open completion candidates (empty when closed).
    pub completions: RwSignal<Vec<String>>,
    /// Highlighted completion.
    pub selected: RwSignal<usize>,
    pub theme: RwSignal<Theme>,
    /// Distortion from the glitch mode.
    pub effect: RwSignal<Option<VisualEffect>>,
    /// Running mode and its tick period.
    pub active: RwSignal<Option<(RunId, u32)>>,
    /// Bumped whenever mode frames may have changed.
    pub frame_clock: RwSignal<u64>,
    session: StoredValue<TerminalSession, LocalStorage>,
    synced_revision: StoredValue<Option<u64>>,
}

impl TerminalState {
    pub fn new() -> Self {
        let session = TerminalSession::new(Box::new(BrowserHost), SmallRng::from_entropy());
        let state = Self {
            entries: RwSignal::new(Vec::new()),
            prompt: RwSignal::new(String::new()),
            input: RwSignal::new(String::new()),
            completions: RwSignal::new(Vec::new()),
            selected: RwSignal::new(0),
            theme: RwSignal::new(Theme::default()),
            effect: RwSignal::new(None),
            active: RwSignal::new(None),
            frame_clock: RwSignal::new(0),
            session: StoredValue::new_local(session),
            synced_revision: StoredValue::new(None),
        };
        state.sync();
        state
    }

    /// Run `f` against the session, then sync the signals.
    ///
    /// Returns `None` once the owning component has been disposed.
    pub fn update<R>(&self, f: impl FnOnce(&mut TerminalSession) -> R) -> Option<R> {
        let result = self.session.try_update_value(f)?;
        self.sync();
        Some(result)
    }

    /// Read from the session without changing it.
    pub fn with<R>(&self, f: impl FnOnce(&TerminalSession) -> R) -> R {
        self.session.with_value(f)
    }

    /// Copy the session's observable state into the signals.
    pub fn sync(&self) {
        self.session.with_value(|s| {
            let revision = s.revision();
            if self.synced_revision.get_value() != Some(revision) {
                self.synced_revision.set_value(Some(revision));
                self.entries.set(s.scrollback().to_vec());
            }

            set_if_changed(self.prompt, s.prompt());
            set_if_changed(self.input, s.input().to_string());
            set_if_changed(self.completions, s.completion().candidates().to_vec());
            set_if_changed(self.selected, s.completion().selected());
            set_if_changed(self.theme, s.theme());
            set_if_changed(self.effect, s.visual_effect());

            let active = s.active_run().zip(s.mode_tick_ms());
            let was_active = self.active.get_untracked().is_some();
            set_if_changed(self.active, active);
            if active.is_some() || was_active {
                self.frame_clock.update(|n| *n += 1);
            }
        });
    }
}

impl Default for TerminalState {
    fn default() -> Self {
        Self::new()
    }
}

fn set_if_changed<T>(signal: RwSignal<T>, value: T)
where
    T: PartialEq + Send + Sync + 'static,
{
    signal.maybe_update(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and read with
/// `use_context::<AppContext>()`.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub terminal: TerminalState,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            terminal: TerminalState::new(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #000;
                    color: #33ff33;
                    font-family: 'Courier New', monospace;
                ">
                    <h1 style="color: #ff3333; margin-bottom: 1rem;">
                        "Terminal failure"
                    </h1>
                    <ul style="margin: 0 0 2rem 0; color: #ff3333;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| crate::utils::dom::reload_page()
                        style="
                            background: transparent;
                            color: #33ff33;
                            border: 1px solid #33ff33;
                            padding: 0.5rem 1.5rem;
                            cursor: pointer;
                            font-family: 'Courier New', monospace;
                        "
                    >
                        "Reboot"
                    </button>
                </div>
            }
        >
            <Terminal />
        </ErrorBoundary>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Key;

    #[test]
    fn test_update_forwards_result_and_syncs() {
        let owner = Owner::new();
        owner.set();
        let term = TerminalState::new();

        let consumed = term.update(|s| {
            s.set_input("pwd");
            s.handle_key(Key::Enter)
        });

        assert_eq!(consumed, Some(true));
        assert_eq!(term.input.get_untracked(), "");
        assert!(
            term.entries
                .with_untracked(|entries| entries.iter().any(|e| e.text() == Some("/home/user")))
        );
    }

    #[test]
    fn test_update_after_disposal_is_none() {
        let owner = Owner::new();
        owner.set();
        let term = TerminalState::new();
        owner.cleanup();

        assert_eq!(term.update(|s| s.handle_key(Key::Enter)), None);
    }
}
