use super::{CommandContext, CommandInfo, CommandModule};
use crate::core::modes::{Burger, Countdown, Credits, Glitch, Hack, Matrix, SpecialMode};

const COMMANDS: &[CommandInfo] = &[
    CommandInfo::new("matrix", "Display Matrix-style digital rain animation"),
    CommandInfo::new("glitch", "Apply visual glitch effects to the terminal"),
    CommandInfo::new("credits", "Show a scrolling credits screen"),
    CommandInfo::new("hack", "Show a fake hacking animation"),
    CommandInfo::new("timer", "Set a countdown timer"),
];

/// Hidden from `help`, still runnable.
const HIDDEN: &[&str] = &["burger"];

/// Full-screen animations.
pub struct AnimationCommands;

impl CommandModule for AnimationCommands {
    fn commands(&self) -> &'static [CommandInfo] {
        COMMANDS
    }

    fn has_command(&self, name: &str) -> bool {
        HIDDEN.contains(&name) || COMMANDS.iter().any(|c| c.name == name)
    }

    fn execute(&self, name: &str, args: &[&str], ctx: &mut dyn CommandContext) {
        let (mode, intro): (Box<dyn SpecialMode>, Option<String>) = match name {
            "burger" => (Box::new(Burger::new()), None),
            "matrix" => {
                let matrix = Matrix::new(ctx.rng());
                (
                    Box::new(matrix),
                    Some("Starting Matrix digital rain...\n\nPress Ctrl+C to exit".into()),
                )
            }
            "glitch" => (
                Box::new(Glitch::new()),
                Some("Initiating terminal glitch...\n\nPress Ctrl+C to normalize".into()),
            ),
            "credits" => (
                Box::new(Credits::new()),
                Some("NuCaloric System Credits\n\nPress Ctrl+C to exit".into()),
            ),
            "hack" => {
                let target = if args.is_empty() {
                    "system".to_string()
                } else {
                    args.join(" ")
                };
                let intro = format!("Initiating hack on {}...\n\nPress Ctrl+C to abort", target);
                (Box::new(Hack::new(target)), Some(intro))
            }
            "timer" => match Countdown::parse_seconds(args.first().copied()) {
                Ok(secs) => (
                    Box::new(Countdown::new(secs)),
                    Some(format!("Timer set for {} seconds\nPress Ctrl+C to cancel", secs)),
                ),
                Err(e) => {
                    ctx.error(&e.to_string());
                    return;
                }
            },
            _ => return,
        };

        if let Err(e) = ctx.start_mode(mode, intro.as_deref()) {
            ctx.error(&e.to_string());
        }
    }
}
