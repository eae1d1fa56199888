use rand::Rng;
use rand::rngs::SmallRng;

use super::{Phase, bordered_grid, push_rows, title_box};
use crate::config::{mode_timing, tetris};
use crate::core::keys::Key;
use crate::core::modes::{SpecialMode, Step};
use crate::models::{Frame, ModeKind, Tone};

type Shape = &'static [&'static [u8]];

struct PieceDef {
    symbol: char,
    rotations: &'static [Shape],
}

const PIECES: [PieceDef; 5] = [
    PieceDef {
        symbol: 'I',
        rotations: &[
            &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            &[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]],
        ],
    },
    PieceDef {
        symbol: 'J',
        rotations: &[
            &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
            &[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]],
            &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
            &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
        ],
    },
    PieceDef {
        symbol: 'L',
        rotations: &[
            &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
            &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
            &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
            &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]],
        ],
    },
    PieceDef {
        symbol: 'O',
        rotations: &[&[&[1, 1], &[1, 1]]],
    },
    PieceDef {
        symbol: 'T',
        rotations: &[
            &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
            &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]],
            &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
            &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
        ],
    },
];

/// Occupied cells of a shape placed at `(x, y)`.
fn cells(shape: Shape, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> {
    shape.iter().enumerate().flat_map(move |(row, cols)| {
        cols.iter()
            .enumerate()
            .filter(|(_, filled)| **filled != 0)
            .map(move |(col, _)| (x + col as i32, y + row as i32))
    })
}

fn spawn_x(piece: usize) -> i32 {
    let width = PIECES[piece].rotations[0][0].len() as i32;
    tetris::WIDTH as i32 / 2 - width / 2
}

type Board = Vec<Vec<Option<char>>>;

/// Falling-block game.
pub struct Tetris {
    board: Board,
    piece: usize,
    next: usize,
    rotation: usize,
    x: i32,
    y: i32,
    score: u32,
    level: u32,
    phase: Phase,
}

impl Tetris {
    pub fn new(rng: &mut SmallRng) -> Self {
        let piece = rng.gen_range(0..PIECES.len());
        Self {
            board: vec![vec![None; tetris::WIDTH]; tetris::HEIGHT],
            piece,
            next: rng.gen_range(0..PIECES.len()),
            rotation: 0,
            x: spawn_x(piece),
            y: 0,
            score: 0,
            level: 1,
            phase: Phase::Waiting,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Gravity period for the current level.
    pub fn gravity_ms(&self) -> u32 {
        tetris::BASE_GRAVITY_MS
            .saturating_sub((self.level - 1) * tetris::GRAVITY_STEP_MS)
            .max(tetris::MIN_GRAVITY_MS)
    }

    fn shape(&self) -> Shape {
        PIECES[self.piece].rotations[self.rotation]
    }

    fn collides(&self, shape: Shape, x: i32, y: i32) -> bool {
        cells(shape, x, y).any(|(cx, cy)| {
            if cx < 0 || cx >= tetris::WIDTH as i32 || cy >= tetris::HEIGHT as i32 {
                return true;
            }
            cy >= 0 && self.board[cy as usize][cx as usize].is_some()
        })
    }

    /// Try to shift the active piece. Moving down into an obstacle locks it.
    fn shift(&mut self, dx: i32, dy: i32, rng: &mut SmallRng) -> bool {
        if !self.collides(self.shape(), self.x + dx, self.y + dy) {
            self.x += dx;
            self.y += dy;
            return true;
        }
        if dy > 0 {
            self.lock(rng);
        }
        false
    }

    /// Rotate in place, then try one cell left, then one cell right.
    fn rotate(&mut self) {
        let rotations = PIECES[self.piece].rotations;
        let next = (self.rotation + 1) % rotations.len();
        let shape = rotations[next];
        for dx in [0, -1, 1] {
            if !self.collides(shape, self.x + dx, self.y) {
                self.x += dx;
                self.rotation = next;
                return;
            }
        }
    }

    fn hard_drop(&mut self, rng: &mut SmallRng) {
        while !self.collides(self.shape(), self.x, self.y + 1) {
            self.y += 1;
        }
        self.lock(rng);
    }

    fn lock(&mut self, rng: &mut SmallRng) {
        let symbol = PIECES[self.piece].symbol;
        for (cx, cy) in cells(self.shape(), self.x, self.y) {
            if (0..tetris::HEIGHT as i32).contains(&cy) && (0..tetris::WIDTH as i32).contains(&cx) {
                self.board[cy as usize][cx as usize] = Some(symbol);
            }
        }
        self.clear_lines();
        self.spawn(rng);
    }

    /// Remove full rows, shifting everything above down, and score them.
    fn clear_lines(&mut self) -> usize {
        let before = self.board.len();
        self.board.retain(|row| row.iter().any(Option::is_none));
        let cleared = before - self.board.len();
        for _ in 0..cleared {
            self.board.insert(0, vec![None; tetris::WIDTH]);
        }

        if cleared > 0 {
            let points = tetris::LINE_POINTS[cleared.min(4)] * self.level;
            self.score += points;
            self.level = self.level.max(self.score / tetris::POINTS_PER_LEVEL + 1);
        }
        cleared
    }

    fn spawn(&mut self, rng: &mut SmallRng) {
        self.piece = self.next;
        self.next = rng.gen_range(0..PIECES.len());
        self.rotation = 0;
        self.x = spawn_x(self.piece);
        self.y = 0;
        if self.collides(self.shape(), self.x, self.y) {
            self.phase = Phase::Over;
        }
    }

    fn step_result(&self) -> Step {
        if self.phase == Phase::Over {
            Step::Finished
        } else {
            Step::Continue
        }
    }

    fn board_rows(&self) -> Vec<String> {
        let mut display = self.board.clone();
        if self.phase != Phase::Over {
            let symbol = PIECES[self.piece].symbol;
            for (cx, cy) in cells(self.shape(), self.x, self.y) {
                if let Some(cell) = display
                    .get_mut(cy as usize)
                    .and_then(|row| row.get_mut(cx as usize))
                    && cy >= 0
                    && cx >= 0
                {
                    *cell = Some(symbol);
                }
            }
        }
        display
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .flat_map(|cell| [cell.unwrap_or(' '), ' '])
                    .collect()
            })
            .collect()
    }

    fn preview_rows(&self) -> Vec<String> {
        let def = &PIECES[self.next];
        def.rotations[0]
            .iter()
            .map(|cols| {
                cols.iter()
                    .flat_map(|c| if *c != 0 { [def.symbol, ' '] } else { [' ', ' '] })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .filter(|row| !row.is_empty())
            .collect()
    }
}

impl SpecialMode for Tetris {
    fn kind(&self) -> ModeKind {
        ModeKind::Tetris
    }

    fn tick_ms(&self) -> u32 {
        self.gravity_ms()
    }

    fn time_limit_ms(&self) -> Option<u64> {
        Some(mode_timing::GAME_LIMIT)
    }

    fn tick(&mut self, rng: &mut SmallRng) -> Step {
        if self.phase == Phase::Playing {
            self.shift(0, 1, rng);
        }
        self.step_result()
    }

    fn handle_key(&mut self, key: Key, rng: &mut SmallRng) -> Step {
        match self.phase {
            Phase::Waiting => {
                self.phase = Phase::Playing;
                return Step::Continue;
            }
            Phase::Over => return Step::Finished,
            Phase::Playing => {}
        }

        match key {
            Key::Left => {
                self.shift(-1, 0, rng);
            }
            Key::Right => {
                self.shift(1, 0, rng);
            }
            Key::Down => {
                self.shift(0, 1, rng);
            }
            Key::Up => self.rotate(),
            Key::Space => self.hard_drop(rng),
            _ => {}
        }
        self.step_result()
    }

    fn frame(&self) -> Frame {
        match self.phase {
            Phase::Waiting => push_rows(
                Frame::new(),
                title_box(&[
                    "           TETRIS",
                    "",
                    "       Press any key to start",
                    "",
                    "  ←/→     : Move left/right",
                    "  ↑       : Rotate",
                    "  ↓       : Soft drop",
                    "  Space   : Hard drop",
                    "  Ctrl+C  : Exit game",
                ]),
                Tone::Bright,
            ),
            Phase::Over => {
                let score = format!("         Your Score: {:>6}", self.score);
                let level = format!("         Level: {:>2}", self.level);
                push_rows(
                    Frame::new(),
                    title_box(&["          GAME OVER!", "", score.as_str(), level.as_str(), ""]),
                    Tone::Alert,
                )
            }
            Phase::Playing => {
                let speed = (10_000 / self.gravity_ms()) as f32 / 10.0;
                let frame = push_rows(
                    Frame::new(),
                    bordered_grid(self.board_rows(), tetris::WIDTH),
                    Tone::Normal,
                )
                .blank()
                .line(format!("Score: {}", self.score), Tone::Bright)
                .line(format!("Level: {}", self.level), Tone::Normal)
                .line(format!("Speed: {}x", speed), Tone::Normal)
                .blank()
                .line("Next piece:", Tone::Dim);
                push_rows(frame, self.preview_rows(), Tone::Normal)
                    .blank()
                    .line("←/→: Move  ↑: Rotate  ↓: Soft Drop  Space: Hard Drop", Tone::Dim)
            }
        }
    }

    fn completion_message(&self) -> String {
        "Game over! Thanks for playing Tetris.".to_string()
    }

    fn cancel_message(&self) -> String {
        "Tetris game exited.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const I: usize = 0;
    const O: usize = 3;

    fn playing(piece: usize) -> (Tetris, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut game = Tetris::new(&mut rng);
        game.piece = piece;
        game.next = O;
        game.x = spawn_x(piece);
        game.handle_key(Key::Char('a'), &mut rng);
        (game, rng)
    }

    fn filled(row: &[Option<char>]) -> usize {
        row.iter().filter(|c| c.is_some()).count()
    }

    #[test]
    fn test_spawn_position() {
        assert_eq!(spawn_x(I), 3);
        assert_eq!(spawn_x(O), 4);
        assert_eq!(spawn_x(1), 4);
    }

    #[test]
    fn test_gravity_locks_piece() {
        let (mut game, mut rng) = playing(O);
        for _ in 0..tetris::HEIGHT {
            game.tick(&mut rng);
        }
        let bottom = &game.board[tetris::HEIGHT - 1];
        assert_eq!(bottom[4], Some('O'));
        assert_eq!(bottom[5], Some('O'));
        assert_eq!(filled(bottom), 2);
    }

    #[test]
    fn test_single_line_clear() {
        let (mut game, mut rng) = playing(I);
        let last = tetris::HEIGHT - 1;
        for x in 0..6 {
            game.board[last][x] = Some('J');
        }
        game.board[last - 1][0] = Some('T');

        // Horizontal I occupies row y + 1, columns x..x + 4.
        game.x = 6;
        game.hard_drop(&mut rng);

        assert_eq!(game.score(), 40);
        assert_eq!(game.board[last][0], Some('T'));
        assert_eq!(filled(&game.board[last]), 1);
        assert_eq!(filled(&game.board[0]), 0);
        assert_eq!(game.board.len(), tetris::HEIGHT);
    }

    #[test]
    fn test_line_points_scale_with_level() {
        let (mut game, _) = playing(I);
        game.level = 3;
        let last = tetris::HEIGHT - 1;
        for row in [last - 1, last] {
            for x in 0..tetris::WIDTH {
                game.board[row][x] = Some('L');
            }
        }
        assert_eq!(game.clear_lines(), 2);
        assert_eq!(game.score(), 100 * 3);
    }

    #[test]
    fn test_level_and_gravity() {
        let (mut game, _) = playing(I);
        assert_eq!(game.gravity_ms(), 1000);
        game.score = 1150;
        let last = tetris::HEIGHT - 1;
        for x in 0..tetris::WIDTH {
            game.board[last][x] = Some('L');
        }
        game.clear_lines();
        assert_eq!(game.level(), 2);
        assert_eq!(game.tick_ms(), 900);
    }

    #[test]
    fn test_rotation_wall_kick() {
        let (mut game, mut rng) = playing(I);
        // Vertical I hugging the right wall: column x + 2 == 9.
        game.rotation = 1;
        game.x = 7;
        game.handle_key(Key::Up, &mut rng);
        assert_eq!(game.rotation, 0);
        assert_eq!(game.x, 6);
    }

    #[test]
    fn test_rotation_rejected_when_blocked() {
        let (mut game, mut rng) = playing(I);
        game.rotation = 1;
        game.x = 0;
        game.y = 0;
        // Fill everything the horizontal I could use in row 1.
        for x in 0..tetris::WIDTH {
            if x != 2 {
                game.board[1][x] = Some('L');
            }
        }
        game.handle_key(Key::Up, &mut rng);
        assert_eq!(game.rotation, 1);
        assert_eq!(game.x, 0);
    }

    #[test]
    fn test_spawn_collision_is_game_over() {
        let (mut game, mut rng) = playing(O);
        for x in 0..tetris::WIDTH {
            if x != 0 {
                game.board[1][x] = Some('L');
            }
        }
        game.board[0][4] = Some('L');
        assert_eq!(game.handle_key(Key::Space, &mut rng), Step::Finished);
        assert_eq!(game.phase(), Phase::Over);
        assert!(game.frame().text().contains("GAME OVER!"));
    }

    #[test]
    fn test_waits_for_first_key() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut game = Tetris::new(&mut rng);
        let y = game.y;
        game.tick(&mut rng);
        assert_eq!(game.y, y);
        assert!(game.frame().text().contains("TETRIS"));
    }
}
