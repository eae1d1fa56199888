//! Session state shared with command modules through [`CommandContext`].

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Local};
use rand::rngs::SmallRng;

use super::commands::{CommandContext, CommandInfo};
use super::error::{HostError, ModeError};
use super::filesystem::VirtualFs;
use super::host::TerminalHost;
use super::modes::{ModeController, ModeExit, SpecialMode};
use crate::config::{HOME_DIR, MAX_COMMAND_HISTORY, MAX_SCROLLBACK};
use crate::models::{AppLink, Frame, HistoryData, HistoryEntry, RunId, Theme, VisualEffect};
use crate::utils::{RingBuffer, console};

/// Everything a command can read or change.
pub struct ShellState {
    fs: VirtualFs,
    host: Box<dyn TerminalHost>,
    scrollback: RingBuffer<HistoryEntry>,
    /// Bumped on every scrollback change so views can skip redundant syncs.
    revision: u64,
    cwd: String,
    command_history: Vec<String>,
    aliases: BTreeMap<String, String>,
    theme: Theme,
    modes: ModeController,
    /// Last frame of each finished run still visible in the scrollback.
    frozen: HashMap<RunId, Frame>,
    catalog: Vec<CommandInfo>,
    rng: SmallRng,
}

impl ShellState {
    pub fn new(host: Box<dyn TerminalHost>, catalog: Vec<CommandInfo>, rng: SmallRng) -> Self {
        Self {
            fs: VirtualFs::nucaloric(),
            host,
            scrollback: RingBuffer::new(MAX_SCROLLBACK),
            revision: 0,
            cwd: HOME_DIR.to_string(),
            command_history: Vec::new(),
            aliases: BTreeMap::new(),
            theme: Theme::default(),
            modes: ModeController::new(),
            frozen: HashMap::new(),
            catalog,
            rng,
        }
    }

    pub fn scrollback(&self) -> &RingBuffer<HistoryEntry> {
        &self.scrollback
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record an executed line for history navigation.
    pub fn record_command(&mut self, line: &str) {
        if self.command_history.len() == MAX_COMMAND_HISTORY {
            self.command_history.remove(0);
        }
        self.command_history.push(line.to_string());
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    pub fn is_mode_active(&self) -> bool {
        self.modes.is_active()
    }

    /// Frame for a run: live if it is running, frozen if it has ended.
    pub fn frame_for(&self, run: RunId) -> Option<Frame> {
        match self.modes.frame() {
            Some((active, frame)) if active == run => Some(frame),
            _ => self.frozen.get(&run).cloned(),
        }
    }

    pub fn visual_effect(&self) -> Option<VisualEffect> {
        self.modes.effect()
    }

    /// Advance the active mode by `ms` of simulated time.
    pub fn advance_mode(&mut self, ms: u32) {
        if let Some(exit) = self.modes.advance(ms, &mut self.rng) {
            self.finish_run(exit);
        }
    }

    /// Forward a key to the active mode.
    pub fn mode_key(&mut self, key: super::keys::Key) {
        if let Some(exit) = self.modes.handle_key(key, &mut self.rng) {
            self.finish_run(exit);
        }
    }

    /// Ctrl+C while a mode runs.
    pub fn cancel_mode(&mut self) {
        if let Some(exit) = self.modes.cancel() {
            self.finish_run(exit);
        }
    }

    fn finish_run(&mut self, exit: ModeExit) {
        console::info(&format!("{} exited: {:?}", exit.kind, exit.reason));
        if let Some(message) = exit.message {
            self.frozen.insert(exit.run, exit.final_frame);
            self.append(HistoryEntry::output(message));
        }
    }

    fn forget_entry(&mut self, entry: &HistoryEntry) {
        if let HistoryData::Component { run, .. } = entry.data {
            self.frozen.remove(&run);
        }
    }
}

impl CommandContext for ShellState {
    fn append(&mut self, entry: HistoryEntry) {
        if let Some(evicted) = self.scrollback.push(entry) {
            self.forget_entry(&evicted);
        }
        self.revision += 1;
    }

    fn clear_scrollback(&mut self) {
        if let Some(exit) = self.modes.force_exit() {
            console::info(&format!("{} exited: {:?}", exit.kind, exit.reason));
        }
        self.scrollback.clear();
        self.frozen.clear();
        self.revision += 1;
    }

    fn current_dir(&self) -> &str {
        &self.cwd
    }

    fn set_current_dir(&mut self, path: String) {
        self.cwd = path;
    }

    fn filesystem(&self) -> &VirtualFs {
        &self.fs
    }

    fn command_history(&self) -> &[String] {
        &self.command_history
    }

    fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    fn define_alias(&mut self, name: String, expansion: String) {
        self.aliases.insert(name, expansion);
    }

    fn theme(&self) -> Theme {
        self.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn available_commands(&self) -> Vec<CommandInfo> {
        self.catalog.clone()
    }

    fn navigate(&mut self, link: &AppLink) -> bool {
        self.host.navigate(link)
    }

    fn start_mode(
        &mut self,
        mode: Box<dyn SpecialMode>,
        intro: Option<&str>,
    ) -> Result<RunId, ModeError> {
        let kind = mode.kind();
        let run = self.modes.start(mode)?;
        console::info(&format!("{} started", kind));
        if let Some(text) = intro {
            self.append(HistoryEntry::output(text));
        }
        self.append(HistoryEntry::component(run, kind));
        Ok(run)
    }

    fn persist_flag(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        self.host.persist_flag(key, value)
    }

    fn schedule_reload(&mut self, delay_ms: u32) {
        self.host.schedule_reload(delay_ms);
    }

    fn now(&self) -> DateTime<Local> {
        self.host.now()
    }

    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::NullHost;
    use crate::core::modes::Countdown;
    use crate::models::ModeKind;
    use rand::SeedableRng;

    fn state() -> ShellState {
        ShellState::new(
            Box::new(NullHost::default()),
            Vec::new(),
            SmallRng::seed_from_u64(1),
        )
    }

    #[test]
    fn test_command_history_is_capped() {
        let mut state = state();
        for i in 0..MAX_COMMAND_HISTORY + 5 {
            state.record_command(&format!("echo {}", i));
        }
        let history = state.command_history();
        assert_eq!(history.len(), MAX_COMMAND_HISTORY);
        assert_eq!(history[0], "echo 5");
    }

    #[test]
    fn test_scrollback_is_capped() {
        let mut state = state();
        for i in 0..MAX_SCROLLBACK + 1 {
            state.output(&i.to_string());
        }
        assert_eq!(state.scrollback().len(), MAX_SCROLLBACK);
        assert_eq!(state.scrollback().get(0).and_then(|e| e.text()), Some("1"));
    }

    #[test]
    fn test_start_mode_appends_intro_then_component() {
        let mut state = state();
        let run = state
            .start_mode(Box::new(Countdown::new(2)), Some("intro"))
            .expect("idle controller accepts a mode");
        let entries = state.scrollback().to_vec();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text(), Some("intro"));
        assert_eq!(
            entries[1].data,
            HistoryData::Component {
                run,
                kind: ModeKind::Timer
            }
        );
        assert!(state.frame_for(run).is_some());
    }

    #[test]
    fn test_rejected_start_appends_nothing() {
        let mut state = state();
        state
            .start_mode(Box::new(Countdown::new(2)), None)
            .expect("first start");
        let before = state.scrollback().len();
        let err = state.start_mode(Box::new(Countdown::new(3)), Some("intro"));
        assert!(err.is_err());
        assert_eq!(state.scrollback().len(), before);
    }

    #[test]
    fn test_finished_run_keeps_frozen_frame() {
        let mut state = state();
        let run = state
            .start_mode(Box::new(Countdown::new(1)), None)
            .expect("start");
        state.advance_mode(1000);
        assert!(!state.is_mode_active());
        let frame = state.frame_for(run).expect("frozen frame");
        assert!(frame.text().contains("Timer complete!"));
        assert_eq!(
            state.scrollback().last().and_then(|e| e.text()),
            Some("Timer completed!")
        );
    }

    #[test]
    fn test_clear_force_exits_silently() {
        let mut state = state();
        state
            .start_mode(Box::new(Countdown::new(10)), None)
            .expect("start");
        state.clear_scrollback();
        assert!(!state.is_mode_active());
        assert!(state.scrollback().is_empty());
        state.cancel_mode();
        assert!(state.scrollback().is_empty());
    }
}
