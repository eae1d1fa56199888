//! Data models and types for the terminal.
//!
//! Contains plain data shared by the core and the view layer:
//! - [`FsNode`], [`AppLink`] - Virtual filesystem representation
//! - [`HistoryEntry`], [`HistoryData`], [`Theme`] - Scrollback and appearance
//! - [`ModeKind`], [`Frame`], [`VisualEffect`] - Special mode output

mod filesystem;
mod mode;
mod terminal;

pub use filesystem::{AppLink, FsNode};
pub use mode::{CorruptionBlock, Frame, FrameLine, ModeKind, RunId, Tone, VisualEffect};
pub use terminal::{HistoryData, HistoryEntry, Theme};
