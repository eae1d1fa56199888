use chrono::Duration;
use regex::Regex;

use super::{CommandContext, CommandInfo, CommandModule};
use crate::config::USERNAME;
use crate::core::error::InputError;
use crate::models::Theme;

const COMMANDS: &[CommandInfo] = &[
    CommandInfo::new("help", "Display available commands"),
    CommandInfo::new("clear", "Clear terminal screen"),
    CommandInfo::new("echo", "Display a message"),
    CommandInfo::new("date", "Display current date and time"),
    CommandInfo::new("whoami", "Display current user"),
    CommandInfo::new("exit", "Close the terminal"),
    CommandInfo::new("history", "Show command history"),
    CommandInfo::new("alias", "Create command aliases"),
    CommandInfo::new("theme", "Change terminal color theme"),
];

const ALIAS_USAGE: &str = "Usage: alias [name]=\"[command]\"";

/// Shell built-ins: help, screen, identity, history, aliases and themes.
pub struct SystemCommands;

impl CommandModule for SystemCommands {
    fn commands(&self) -> &'static [CommandInfo] {
        COMMANDS
    }

    fn execute(&self, name: &str, args: &[&str], ctx: &mut dyn CommandContext) {
        match name {
            "help" => help(ctx),
            "clear" => ctx.clear_scrollback(),
            "echo" => ctx.output(&args.join(" ")),
            "date" => {
                let now = ctx.now();
                ctx.output(&now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string());
            }
            "whoami" => ctx.output(USERNAME),
            "exit" => ctx.output("Terminal session closed"),
            "history" => history(ctx),
            "alias" => alias(args, ctx),
            "theme" => theme(args, ctx),
            _ => {}
        }
    }
}

fn help(ctx: &mut dyn CommandContext) {
    let mut text = String::from("Available commands:");
    for cmd in ctx.available_commands() {
        text.push_str(&format!("\n  {:<20} - {}", cmd.name, cmd.description));
    }
    ctx.output(&text);
}

/// Numbered history with timestamps one minute apart, newest a minute ago.
fn history(ctx: &mut dyn CommandContext) {
    let entries = ctx.command_history();
    if entries.is_empty() {
        ctx.output("No command history");
        return;
    }

    let now = ctx.now();
    let total = entries.len();
    let text = entries
        .iter()
        .enumerate()
        .map(|(i, cmd)| {
            let at = now - Duration::minutes((total - i) as i64);
            format!("{}  {}  {}", i + 1, at.format("%-I:%M:%S %p"), cmd)
        })
        .collect::<Vec<_>>()
        .join("\n");
    ctx.output(&text);
}

/// Parse `name="command"`, tolerating spaces inside the quotes.
pub(crate) fn parse_alias(def: &str) -> Option<(String, String)> {
    let re = Regex::new(r#"^([A-Za-z0-9_]+)="(.+)"$"#).ok()?;
    let caps = re.captures(def)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

fn alias(args: &[&str], ctx: &mut dyn CommandContext) {
    if args.is_empty() {
        let aliases = ctx.aliases();
        let text = if aliases.is_empty() {
            format!("No aliases defined\n{}", ALIAS_USAGE)
        } else {
            let list: Vec<String> = aliases
                .iter()
                .map(|(name, cmd)| format!("{}=\"{}\"", name, cmd))
                .collect();
            format!("Defined aliases:\n{}", list.join("\n"))
        };
        ctx.output(&text);
        return;
    }

    match parse_alias(&args.join(" ")) {
        Some((name, cmd)) => {
            ctx.output(&format!("Alias created: {}=\"{}\"", name, cmd));
            ctx.define_alias(name, cmd);
        }
        None => ctx.error(&InputError::InvalidAlias.to_string()),
    }
}

fn theme(args: &[&str], ctx: &mut dyn CommandContext) {
    let Some(requested) = args.first() else {
        ctx.output(&format!(
            "Available themes: {}\nUsage: theme [color]",
            Theme::names()
        ));
        return;
    };

    match Theme::from_name(requested) {
        Some(theme) => {
            ctx.set_theme(theme);
            ctx.output(&format!("Terminal theme changed to {}", theme.name()));
        }
        None => {
            let err = InputError::UnknownTheme {
                name: requested.to_string(),
                available: Theme::names(),
            };
            ctx.error(&err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alias() {
        assert_eq!(
            parse_alias(r#"gs="ls /home/user""#),
            Some(("gs".to_string(), "ls /home/user".to_string()))
        );
        assert_eq!(parse_alias("gs=ls"), None);
        assert_eq!(parse_alias(r#"g s="ls""#), None);
        assert_eq!(parse_alias(r#"gs="""#), None);
    }

    #[test]
    fn test_descriptions_fit_help_column() {
        assert!(COMMANDS.iter().all(|c| c.name.len() < 20));
    }
}
