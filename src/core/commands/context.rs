use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use rand::rngs::SmallRng;

use super::CommandInfo;
use crate::core::error::{HostError, ModeError};
use crate::core::filesystem::VirtualFs;
use crate::core::modes::SpecialMode;
use crate::models::{AppLink, HistoryEntry, RunId, Theme};

/// Capabilities a command module may use while it runs.
///
/// Modules only ever see this trait, never the session that implements it,
/// so each module can be exercised against any implementation.
pub trait CommandContext {
    /// Append one scrollback entry.
    fn append(&mut self, entry: HistoryEntry);

    fn output(&mut self, text: &str) {
        self.append(HistoryEntry::output(text));
    }

    fn error(&mut self, text: &str) {
        self.append(HistoryEntry::error(text));
    }

    /// Wipe the scrollback, force-exiting any running special mode.
    fn clear_scrollback(&mut self);

    fn current_dir(&self) -> &str;

    fn set_current_dir(&mut self, path: String);

    fn filesystem(&self) -> &VirtualFs;

    /// Raw command lines entered so far, oldest first.
    fn command_history(&self) -> &[String];

    fn aliases(&self) -> &BTreeMap<String, String>;

    fn define_alias(&mut self, name: String, expansion: String);

    fn theme(&self) -> Theme;

    fn set_theme(&mut self, theme: Theme);

    /// Visible commands of every module, in dispatch order.
    fn available_commands(&self) -> Vec<CommandInfo>;

    /// Forward an app node to the host. `false` if the host can't navigate.
    fn navigate(&mut self, link: &AppLink) -> bool;

    /// Start a special mode, printing `intro` first.
    ///
    /// Nothing is appended when another mode is already running.
    fn start_mode(
        &mut self,
        mode: Box<dyn SpecialMode>,
        intro: Option<&str>,
    ) -> Result<RunId, ModeError>;

    fn persist_flag(&mut self, key: &str, value: &str) -> Result<(), HostError>;

    fn schedule_reload(&mut self, delay_ms: u32);

    fn now(&self) -> DateTime<Local>;

    fn rng(&mut self) -> &mut SmallRng;
}
