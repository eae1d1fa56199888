//! The terminal session: input line, history browsing, completion and
//! routing of keys to either the shell or the running special mode.

use rand::rngs::SmallRng;

use super::autocomplete::{CompletionState, generate_completions, replace_last_token};
use super::commands::{CommandContext, Dispatcher};
use super::host::TerminalHost;
use super::keys::Key;
use super::state::ShellState;
use crate::config::{APP_VERSION, HOSTNAME, USERNAME};
use crate::models::{Frame, HistoryEntry, RunId, Theme, VisualEffect};
use crate::utils::RingBuffer;

/// Root of the terminal core. The view holds one of these and renders from it.
pub struct TerminalSession {
    state: ShellState,
    dispatcher: Dispatcher,
    input: String,
    /// Steps back from the newest history line; `None` when not browsing.
    history_cursor: Option<usize>,
    completion: CompletionState,
}

impl TerminalSession {
    pub fn new(host: Box<dyn TerminalHost>, rng: SmallRng) -> Self {
        let dispatcher = Dispatcher::new();
        let mut state = ShellState::new(host, dispatcher.catalog(), rng);
        state.output(&format!(
            "NuCaloric Terminal v{} - Type \"help\" for available commands",
            APP_VERSION
        ));
        state.output(&format!("Welcome, {}@{}!", USERNAME, HOSTNAME));

        Self {
            state,
            dispatcher,
            input: String::new(),
            history_cursor: None,
            completion: CompletionState::default(),
        }
    }

    // =========================================================================
    // Read access for the view
    // =========================================================================

    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", USERNAME, HOSTNAME, self.state.current_dir())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn current_dir(&self) -> &str {
        self.state.current_dir()
    }

    pub fn scrollback(&self) -> &RingBuffer<HistoryEntry> {
        self.state.scrollback()
    }

    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    pub fn theme(&self) -> Theme {
        self.state.theme()
    }

    pub fn completion(&self) -> &CompletionState {
        &self.completion
    }

    pub fn is_mode_active(&self) -> bool {
        self.state.is_mode_active()
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.state.modes().active_run()
    }

    /// Tick period of the running mode, if any.
    pub fn mode_tick_ms(&self) -> Option<u32> {
        self.state.modes().tick_ms()
    }

    pub fn frame_for(&self, run: RunId) -> Option<Frame> {
        self.state.frame_for(run)
    }

    pub fn visual_effect(&self) -> Option<VisualEffect> {
        self.state.visual_effect()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Replace the input line, as typed into the text field.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.state.is_mode_active() {
            return;
        }
        self.input = text.into();
        self.completion.close();
    }

    /// Handle one key press. Returns `true` if the key was consumed and its
    /// default browser action should be suppressed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if key == Key::ClearScreen {
            self.clear_screen();
            return true;
        }

        if self.state.is_mode_active() {
            match key {
                Key::Interrupt => self.state.cancel_mode(),
                other => self.state.mode_key(other),
            }
            return true;
        }

        match key {
            Key::Tab => {
                self.tab();
                true
            }
            Key::Enter => {
                if self.completion.is_open() {
                    if let Some(choice) = self.completion.take_selected() {
                        self.input = replace_last_token(&self.input, &choice);
                    }
                } else {
                    let line = std::mem::take(&mut self.input);
                    self.execute(&line);
                }
                true
            }
            Key::Escape => {
                self.completion.close();
                true
            }
            Key::Up => {
                self.history_up();
                true
            }
            Key::Down => {
                self.history_down();
                true
            }
            Key::Interrupt => {
                self.input.clear();
                self.history_cursor = None;
                self.completion.close();
                true
            }
            _ => {
                self.completion.close();
                false
            }
        }
    }

    /// Accept candidate `index` from the open completion list (mouse click).
    pub fn choose_completion(&mut self, index: usize) {
        if let Some(choice) = self.completion.take(index) {
            self.input = replace_last_token(&self.input, &choice);
        }
    }

    /// Echo `line` with the prompt, record it and run it.
    ///
    /// While a mode owns the terminal only `clear` is accepted; anything else
    /// is dropped without an echo.
    pub fn execute(&mut self, line: &str) {
        if self.state.is_mode_active() && !line.trim().eq_ignore_ascii_case("clear") {
            return;
        }
        let prompt = self.prompt();
        self.state.append(HistoryEntry::command(prompt, line));
        if !line.trim().is_empty() {
            self.state.record_command(line);
        }
        self.history_cursor = None;
        self.completion.close();

        self.dispatcher.dispatch(line, &mut self.state);
    }

    /// Advance the running mode by `ms` of wall-clock time.
    pub fn advance(&mut self, ms: u32) {
        self.state.advance_mode(ms);
    }

    fn clear_screen(&mut self) {
        self.state.clear_scrollback();
        self.completion.close();
    }

    fn tab(&mut self) {
        if self.completion.is_open() {
            self.completion.cycle();
            return;
        }

        let names: Vec<&str> = self
            .state
            .available_commands()
            .iter()
            .map(|c| c.name)
            .collect();
        let candidates = generate_completions(
            &self.input,
            self.state.current_dir(),
            self.state.filesystem(),
            &names,
        );

        match candidates.len() {
            0 => {}
            1 => self.input = replace_last_token(&self.input, &candidates[0]),
            _ => self.completion.open(candidates),
        }
    }

    fn history_up(&mut self) {
        let history = self.state.command_history();
        if history.is_empty() {
            return;
        }
        let next = match self.history_cursor {
            None => 0,
            Some(i) if i + 1 < history.len() => i + 1,
            Some(i) => i,
        };
        self.input = history[history.len() - 1 - next].clone();
        self.history_cursor = Some(next);
        self.completion.close();
    }

    fn history_down(&mut self) {
        match self.history_cursor {
            Some(0) => {
                self.history_cursor = None;
                self.input.clear();
            }
            Some(i) => {
                let history = self.state.command_history();
                self.input = history[history.len() - i].clone();
                self.history_cursor = Some(i - 1);
            }
            None => {}
        }
        self.completion.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::NullHost;
    use rand::SeedableRng;

    fn session() -> TerminalSession {
        TerminalSession::new(Box::new(NullHost::default()), SmallRng::seed_from_u64(7))
    }

    fn type_line(s: &mut TerminalSession, line: &str) {
        s.set_input(line);
        s.handle_key(Key::Enter);
    }

    #[test]
    fn test_welcome_banner_and_prompt() {
        let s = session();
        let lines: Vec<_> = s.scrollback().iter().filter_map(|e| e.text()).collect();
        assert_eq!(
            lines,
            vec![
                "NuCaloric Terminal v3.2.1 - Type \"help\" for available commands",
                "Welcome, admin@nucaloric!",
            ]
        );
        assert_eq!(s.prompt(), "admin@nucaloric:/home/user$ ");
    }

    #[test]
    fn test_history_browsing() {
        let mut s = session();
        type_line(&mut s, "pwd");
        type_line(&mut s, "whoami");

        s.handle_key(Key::Up);
        assert_eq!(s.input(), "whoami");
        s.handle_key(Key::Up);
        assert_eq!(s.input(), "pwd");
        s.handle_key(Key::Up);
        assert_eq!(s.input(), "pwd");
        s.handle_key(Key::Down);
        assert_eq!(s.input(), "whoami");
        s.handle_key(Key::Down);
        assert_eq!(s.input(), "");
        s.handle_key(Key::Down);
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_single_completion_applies_immediately() {
        let mut s = session();
        s.set_input("who");
        assert!(s.handle_key(Key::Tab));
        assert_eq!(s.input(), "whoami");
        assert!(!s.completion().is_open());
    }

    #[test]
    fn test_multiple_completions_cycle_and_enter_accepts() {
        let mut s = session();
        s.set_input("cd s");
        s.handle_key(Key::Tab);
        assert_eq!(s.completion().candidates(), ["sites/", "system/"]);
        s.handle_key(Key::Tab);
        s.handle_key(Key::Enter);
        assert_eq!(s.input(), "cd system/");
        assert!(!s.completion().is_open());
    }

    #[test]
    fn test_typing_closes_completion() {
        let mut s = session();
        s.set_input("h");
        s.handle_key(Key::Tab);
        assert!(s.completion().is_open());
        assert!(!s.handle_key(Key::Char('e')));
        assert!(!s.completion().is_open());
    }

    #[test]
    fn test_interrupt_without_mode_discards_input() {
        let mut s = session();
        s.set_input("echo half typed");
        s.handle_key(Key::Interrupt);
        assert_eq!(s.input(), "");
        assert_eq!(s.scrollback().len(), 2);
    }

    #[test]
    fn test_mode_swallows_keys_and_input() {
        let mut s = session();
        type_line(&mut s, "matrix");
        assert!(s.is_mode_active());
        s.set_input("ls");
        assert_eq!(s.input(), "");
        assert!(s.handle_key(Key::Char('q')));
        assert!(s.is_mode_active());
        s.handle_key(Key::Interrupt);
        assert!(!s.is_mode_active());
    }

    #[test]
    fn test_execute_during_mode_only_accepts_clear() {
        let mut s = session();
        type_line(&mut s, "matrix");
        let before = s.scrollback().len();

        s.execute("cd /bin");
        assert_eq!(s.current_dir(), "/home/user");
        assert_eq!(s.scrollback().len(), before);
        assert!(s.is_mode_active());

        s.execute("clear");
        assert!(!s.is_mode_active());
        assert!(s.scrollback().is_empty());
    }

    #[test]
    fn test_ctrl_l_clears_and_exits_mode() {
        let mut s = session();
        type_line(&mut s, "glitch");
        s.handle_key(Key::ClearScreen);
        assert!(!s.is_mode_active());
        assert!(s.scrollback().is_empty());
        assert!(s.visual_effect().is_none());
    }
}
