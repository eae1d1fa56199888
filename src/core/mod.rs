//! Core business logic for the terminal.
//!
//! This module provides:
//! - [`TerminalSession`], the root that turns key presses into scrollback
//! - [`Dispatcher`] and the command modules it routes to
//! - [`VirtualFs`] with its path resolver
//! - [`ModeController`] for special modes, plus the animations and games
//! - [`autocomplete`] for tab completion
//!
//! Nothing in here touches the DOM; side effects go through [`TerminalHost`].

pub mod autocomplete;
pub mod commands;
pub mod error;
mod filesystem;
pub mod games;
mod host;
pub mod keys;
pub mod modes;
pub mod reports;
mod session;
mod state;

pub use commands::{CommandContext, CommandInfo, CommandModule, Dispatcher};
pub use filesystem::{DirEntry, VirtualFs};
pub use host::{NullHost, TerminalHost};
pub use keys::Key;
pub use modes::{ExitReason, ModeController, SpecialMode};
pub use session::TerminalSession;
pub use state::ShellState;
