use super::{CommandContext, CommandInfo, CommandModule};
use crate::core::games::{Snake, Tetris};
use crate::core::modes::SpecialMode;

const COMMANDS: &[CommandInfo] = &[
    CommandInfo::new("snake", "Play Snake game"),
    CommandInfo::new("tetris", "Play Tetris game"),
];

const INTRO_TAIL: &str = "Use arrow keys to control\nPress Ctrl+C to exit";

/// Real-time games.
pub struct GameCommands;

impl CommandModule for GameCommands {
    fn commands(&self) -> &'static [CommandInfo] {
        COMMANDS
    }

    fn execute(&self, name: &str, _args: &[&str], ctx: &mut dyn CommandContext) {
        let (game, title): (Box<dyn SpecialMode>, &str) = match name {
            "snake" => (Box::new(Snake::new()), "Snake"),
            "tetris" => (Box::new(Tetris::new(ctx.rng())), "Tetris"),
            _ => return,
        };

        let intro = format!("Starting {} game...\n{}", title, INTRO_TAIL);
        if let Err(e) = ctx.start_mode(game, Some(&intro)) {
            ctx.error(&e.to_string());
        }
    }
}
