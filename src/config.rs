//! Application configuration.
//!
//! Centralizes the constants used by the terminal core and the view layer.
//! Text assets are loaded at compile time using `include_str!`.

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Scrolling credits, one entry per line.
pub const CREDITS_TEXT: &str = include_str!("../assets/text/credits.txt");

/// Burger animation frames separated by [`FRAME_SEPARATOR`] lines.
pub const BURGER_FRAMES_TEXT: &str = include_str!("../assets/text/burger.txt");

/// Fortune quotes, one per line.
pub const FORTUNES_TEXT: &str = include_str!("../assets/text/fortunes.txt");

/// Line that separates frames in multi-frame text assets.
pub const FRAME_SEPARATOR: &str = "%%";

// =============================================================================
// Session Identity
// =============================================================================

/// User name shown in the prompt and by `whoami`.
pub const USERNAME: &str = "admin";

/// Host name shown in the prompt.
pub const HOSTNAME: &str = "nucaloric";

/// Terminal version shown in the welcome banner.
pub const APP_VERSION: &str = "3.2.1";

/// Home directory; also the initial working directory.
pub const HOME_DIR: &str = "/home/user";

// =============================================================================
// History Limits
// =============================================================================

/// Maximum number of scrollback entries kept in memory.
pub const MAX_SCROLLBACK: usize = 1000;

/// Maximum number of command lines kept for up/down navigation.
pub const MAX_COMMAND_HISTORY: usize = 100;

// =============================================================================
// Easter Eggs
// =============================================================================

/// localStorage key written by `cat burger_is_cool`.
pub const BURGER_FLAG_KEY: &str = "burger_mode_active";

/// Delay before the page reload triggered by `cat burger_is_cool`.
pub const RELOAD_DELAY_MS: u32 = 1000;

// =============================================================================
// Special Mode Timing (milliseconds)
// =============================================================================

pub mod mode_timing {
    pub const BURGER_FRAME: u32 = 200;
    pub const BURGER_LIMIT: u64 = 30_000;

    pub const MATRIX_FRAME: u32 = 100;
    pub const MATRIX_LIMIT: u64 = 20_000;

    pub const GLITCH_TICK: u32 = 500;
    pub const GLITCH_LIMIT: u64 = 15_000;

    pub const CREDITS_TICK: u32 = 100;

    pub const HACK_TICK: u32 = 300;
    /// How long the finished hack screen stays up before exiting.
    pub const HACK_LINGER: u32 = 2_000;

    pub const TIMER_TICK: u32 = 1_000;

    /// Wall-clock ceiling shared by both games.
    pub const GAME_LIMIT: u64 = 120_000;
}

// =============================================================================
// Game Tuning
// =============================================================================

pub mod snake {
    pub const WIDTH: usize = 20;
    pub const HEIGHT: usize = 10;
    pub const START_TICK_MS: u32 = 200;
    pub const MIN_TICK_MS: u32 = 50;
    pub const SPEEDUP_MS: u32 = 10;
    /// The tick shortens every time the score reaches a multiple of this.
    pub const SPEEDUP_EVERY: u32 = 5;
}

pub mod tetris {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 16;
    pub const BASE_GRAVITY_MS: u32 = 1_000;
    pub const MIN_GRAVITY_MS: u32 = 100;
    pub const GRAVITY_STEP_MS: u32 = 100;
    pub const POINTS_PER_LEVEL: u32 = 1_000;
    /// Points for clearing 0..=4 rows at once, multiplied by the level.
    pub const LINE_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];
}
