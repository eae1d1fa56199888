//! Boundary between the terminal core and whatever embeds it.

use std::collections::HashMap;

use chrono::{DateTime, Local};

use super::error::HostError;
use crate::models::AppLink;

/// Side effects the terminal needs from its host page.
pub trait TerminalHost {
    /// Ask the host to show an app scene.
    ///
    /// Returns `false` when no navigation callback is wired up.
    fn navigate(&mut self, link: &AppLink) -> bool;

    /// Persist a flag across page loads.
    fn persist_flag(&mut self, key: &str, value: &str) -> Result<(), HostError>;

    /// Reload the whole page after `delay_ms`.
    fn schedule_reload(&mut self, delay_ms: u32);

    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Host with no navigation and in-memory flags.
///
/// Useful when the terminal runs outside the dashboard page.
#[derive(Debug, Default)]
pub struct NullHost {
    pub flags: HashMap<String, String>,
}

impl TerminalHost for NullHost {
    fn navigate(&mut self, _link: &AppLink) -> bool {
        false
    }

    fn persist_flag(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        self.flags.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn schedule_reload(&mut self, _delay_ms: u32) {}

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
