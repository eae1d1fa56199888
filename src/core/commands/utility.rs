use super::{CommandContext, CommandInfo, CommandModule};
use crate::core::reports;

const COMMANDS: &[CommandInfo] = &[
    CommandInfo::new("status", "Show system resource usage with ASCII bars"),
    CommandInfo::new("fortune", "Display random quotes"),
    CommandInfo::new("weather", "Show ASCII art weather forecast"),
    CommandInfo::new("calendar", "Display an ASCII calendar"),
];

/// Synthetic reports.
pub struct UtilityCommands;

impl CommandModule for UtilityCommands {
    fn commands(&self) -> &'static [CommandInfo] {
        COMMANDS
    }

    fn execute(&self, name: &str, args: &[&str], ctx: &mut dyn CommandContext) {
        let now = ctx.now();
        let text = match name {
            "status" => reports::system_status(now, ctx.rng()),
            "fortune" => reports::fortune(ctx.rng()),
            "weather" => {
                let location = if args.is_empty() {
                    "current location".to_string()
                } else {
                    args.join(" ")
                };
                reports::weather(&location, ctx.rng())
            }
            "calendar" => reports::calendar(now, ctx.rng()),
            _ => return,
        };
        ctx.output(&text);
    }
}
