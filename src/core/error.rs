//! Error types for the terminal core.
//!
//! Every error here ends up as a red scrollback line; none is fatal.
//!
//! - [`InputError`] - Unknown commands and malformed arguments
//! - [`FsError`] - Filesystem lookups on missing or wrong-kind paths
//! - [`NavigationError`] - App nodes opened without a navigation callback
//! - [`ModeError`] - Special mode start conflicts
//! - [`HostError`] - Browser storage failures

use thiserror::Error;

use crate::models::ModeKind;

/// Problems with what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("Invalid alias format\nUsage: alias [name]=\"[command]\"")]
    InvalidAlias,

    #[error("alias: expansion loop detected for '{0}'")]
    AliasLoop(String),

    #[error("Unknown theme: {name}\nAvailable themes: {available}")]
    UnknownTheme { name: String, available: String },

    #[error("Usage: timer [seconds]")]
    TimerUsage,

    #[error("Invalid time. Please provide a positive number of seconds.")]
    InvalidDuration,

    #[error("Time out of range. The largest timer is 18446744073709551615 seconds.")]
    DurationOutOfRange,
}

/// Filesystem errors, tagged with the command that hit them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{cmd}: missing file operand")]
    MissingOperand { cmd: &'static str },

    #[error("{cmd}: no such directory: {path}")]
    NoSuchDirectory { cmd: &'static str, path: String },

    #[error("{cmd}: not a directory: {path}")]
    NotADirectory { cmd: &'static str, path: String },

    #[error("{cmd}: cannot access '{path}': No such directory")]
    CannotAccess { cmd: &'static str, path: String },

    #[error("{cmd}: {path}: No such file or directory")]
    NotFound { cmd: &'static str, path: String },

    #[error("{cmd}: {path}: Is a directory")]
    IsADirectory { cmd: &'static str, path: String },

    #[error("{cmd}: {path}: Unknown file type")]
    UnknownFileType { cmd: &'static str, path: String },
}

/// Raised when an app node is opened but the host gave no navigation callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{cmd}: {path}: Cannot {verb} {target}")]
pub struct NavigationError {
    pub cmd: &'static str,
    pub path: String,
    /// `display` for `cat`, `edit` for `nano`.
    pub verb: &'static str,
    /// `component` or `application`.
    pub target: &'static str,
}

/// Special mode lifecycle conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("{requested}: cannot start while {active} is running")]
    AlreadyActive {
        requested: ModeKind,
        active: ModeKind,
    },
}

/// Failures talking to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("localStorage not available")]
    StorageUnavailable,

    #[error("failed to save '{0}' to localStorage")]
    SaveFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages() {
        assert_eq!(
            InputError::CommandNotFound("foo".into()).to_string(),
            "foo: command not found"
        );
        assert_eq!(
            InputError::InvalidAlias.to_string(),
            "Invalid alias format\nUsage: alias [name]=\"[command]\""
        );
        assert_eq!(
            InputError::DurationOutOfRange.to_string(),
            format!("Time out of range. The largest timer is {} seconds.", u64::MAX)
        );
    }

    #[test]
    fn test_fs_error_messages() {
        let err = FsError::NoSuchDirectory {
            cmd: "cd",
            path: "nonexistent".into(),
        };
        assert_eq!(err.to_string(), "cd: no such directory: nonexistent");

        let err = FsError::CannotAccess {
            cmd: "ls",
            path: "nope".into(),
        };
        assert_eq!(err.to_string(), "ls: cannot access 'nope': No such directory");
    }

    #[test]
    fn test_navigation_error_message() {
        let err = NavigationError {
            cmd: "nano",
            path: "login".into(),
            verb: "edit",
            target: "application",
        };
        assert_eq!(err.to_string(), "nano: login: Cannot edit application");
    }

    #[test]
    fn test_mode_error_message() {
        let err = ModeError::AlreadyActive {
            requested: ModeKind::Snake,
            active: ModeKind::Matrix,
        };
        assert_eq!(err.to_string(), "snake: cannot start while matrix is running");
    }
}
