//! Terminal scrollback and theme types.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ModeKind, RunId};

/// A single scrollback entry with a unique ID.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Unique, monotonically assigned ID used to key the rendered list.
    pub id: usize,
    pub data: HistoryData,
}

/// The content of a scrollback entry.
#[derive(Clone, Debug, PartialEq)]
pub enum HistoryData {
    /// Echo of an executed line with the prompt it was typed at.
    Command { prompt: String, input: String },
    /// Plain output text (may span several lines).
    Output(String),
    /// Error text (red).
    Error(String),
    /// Embedded view of a special mode run.
    Component { run: RunId, kind: ModeKind },
}

// Global counter for generating unique IDs
static HISTORY_ENTRY_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl HistoryEntry {
    fn new(data: HistoryData) -> Self {
        Self {
            id: HISTORY_ENTRY_COUNTER.fetch_add(1, Ordering::Relaxed),
            data,
        }
    }

    pub fn command(prompt: impl Into<String>, input: impl Into<String>) -> Self {
        Self::new(HistoryData::Command {
            prompt: prompt.into(),
            input: input.into(),
        })
    }

    pub fn output(s: impl Into<String>) -> Self {
        Self::new(HistoryData::Output(s.into()))
    }

    pub fn error(s: impl Into<String>) -> Self {
        Self::new(HistoryData::Error(s.into()))
    }

    pub fn component(run: RunId, kind: ModeKind) -> Self {
        Self::new(HistoryData::Component { run, kind })
    }

    /// Text of an output or error entry.
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            HistoryData::Output(s) | HistoryData::Error(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.data, HistoryData::Error(_))
    }
}

impl PartialEq for HistoryEntry {
    fn eq(&self, other: &Self) -> bool {
        // Only compare data, not ID
        self.data == other.data
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Named color themes selectable with `theme`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Green,
    Amber,
    Blue,
    Purple,
    White,
    Red,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Green,
        Theme::Amber,
        Theme::Blue,
        Theme::Purple,
        Theme::White,
        Theme::Red,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::White => "white",
            Self::Red => "red",
        }
    }

    /// Foreground color as a CSS hex value.
    pub fn color(self) -> &'static str {
        match self {
            Self::Green => "#33ff33",
            Self::Amber => "#ffb000",
            Self::Blue => "#00aaff",
            Self::Purple => "#aa00ff",
            Self::White => "#ffffff",
            Self::Red => "#ff3333",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Comma-separated list of every theme name.
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        assert_eq!(
            HistoryEntry::output("hello").data,
            HistoryData::Output("hello".to_string())
        );
        assert_eq!(
            HistoryEntry::error("bad").data,
            HistoryData::Error("bad".to_string())
        );
        assert!(HistoryEntry::error("bad").is_error());
        assert_eq!(HistoryEntry::output("x").text(), Some("x"));
        assert_eq!(HistoryEntry::command("p", "ls").text(), None);
    }

    #[test]
    fn test_component_entry() {
        let entry = HistoryEntry::component(RunId(7), ModeKind::Snake);
        match entry.data {
            HistoryData::Component { run, kind } => {
                assert_eq!(run, RunId(7));
                assert_eq!(kind, ModeKind::Snake);
            }
            _ => panic!("Expected Component variant"),
        }
    }

    #[test]
    fn test_unique_ids() {
        let a = HistoryEntry::output("same");
        let b = HistoryEntry::output("same");
        assert!(b.id > a.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(Theme::from_name("Amber"), Some(Theme::Amber));
        assert_eq!(Theme::from_name("pink"), None);
        assert_eq!(Theme::Blue.color(), "#00aaff");
        assert_eq!(Theme::names(), "green, amber, blue, purple, white, red");
    }
}
