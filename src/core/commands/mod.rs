//! Command modules and dispatch.
//!
//! This module provides:
//! - [`CommandModule`], implemented once per command family
//! - [`CommandContext`], the capabilities a module can use
//! - [`Dispatcher`], which expands aliases and routes a line to its module
//!
//! # Architecture
//!
//! A raw line is split on whitespace and its first token lowercased. Aliases
//! are expanded first (except for `alias` itself), then the modules are probed
//! in a fixed order: System, Filesystem, Animation, Game, Utility. The first
//! module that claims the name runs it. Modules report everything through the
//! context; nothing is returned to the dispatcher.

mod animation;
mod context;
mod filesystem;
mod game;
mod system;
mod utility;

pub use animation::AnimationCommands;
pub use context::CommandContext;
pub use filesystem::FilesystemCommands;
pub use game::GameCommands;
pub use system::SystemCommands;
pub use utility::UtilityCommands;

use std::collections::{BTreeMap, HashSet};

use super::error::InputError;

/// A command name with its `help` description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl CommandInfo {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

/// A family of related commands.
pub trait CommandModule {
    /// Commands listed by `help`.
    fn commands(&self) -> &'static [CommandInfo];

    /// Whether this module runs `name`. Hidden commands answer `true` here
    /// without appearing in [`CommandModule::commands`].
    fn has_command(&self, name: &str) -> bool {
        self.commands().iter().any(|c| c.name == name)
    }

    /// Run `name`, which [`CommandModule::has_command`] has accepted.
    fn execute(&self, name: &str, args: &[&str], ctx: &mut dyn CommandContext);
}

/// Ordered set of command modules.
pub struct Dispatcher {
    modules: Vec<Box<dyn CommandModule>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            modules: vec![
                Box::new(SystemCommands),
                Box::new(FilesystemCommands),
                Box::new(AnimationCommands),
                Box::new(GameCommands),
                Box::new(UtilityCommands),
            ],
        }
    }

    /// Every visible command, in probe order.
    pub fn catalog(&self) -> Vec<CommandInfo> {
        self.modules
            .iter()
            .flat_map(|m| m.commands().iter().copied())
            .collect()
    }

    /// Run one input line.
    pub fn dispatch(&self, line: &str, ctx: &mut dyn CommandContext) {
        let line = match expand_aliases(line, ctx.aliases()) {
            Ok(line) => line,
            Err(e) => {
                ctx.error(&e.to_string());
                return;
            }
        };

        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return;
        };
        let name = head.to_lowercase();
        let args: Vec<&str> = tokens.collect();

        match self.modules.iter().find(|m| m.has_command(&name)) {
            Some(module) => module.execute(&name, &args, ctx),
            None => ctx.error(&InputError::CommandNotFound(name).to_string()),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace a leading alias with its expansion until the head is not an alias.
///
/// Trailing arguments are carried over. Seeing the same alias twice in one
/// expansion is an error.
fn expand_aliases(line: &str, aliases: &BTreeMap<String, String>) -> Result<String, InputError> {
    let mut line = line.to_string();
    let mut seen = HashSet::new();

    loop {
        let next = {
            let mut tokens = line.split_whitespace();
            let Some(head) = tokens.next() else {
                return Ok(line);
            };
            let name = head.to_lowercase();
            if name == "alias" {
                return Ok(line);
            }
            let Some(expansion) = aliases.get(&name) else {
                return Ok(line);
            };
            if !seen.insert(name.clone()) {
                return Err(InputError::AliasLoop(name));
            }

            let rest: Vec<&str> = tokens.collect();
            if rest.is_empty() {
                expansion.clone()
            } else {
                format!("{} {}", expansion, rest.join(" "))
            }
        };
        line = next;
    }
}
