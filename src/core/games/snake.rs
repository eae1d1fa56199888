use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::{Phase, bordered_grid, push_rows, title_box};
use crate::config::{mode_timing, snake};
use crate::core::keys::Key;
use crate::core::modes::{SpecialMode, Step};
use crate::models::{Frame, ModeKind, Tone};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Self::Up),
            Key::Down => Some(Self::Down),
            Key::Left => Some(Self::Left),
            Key::Right => Some(Self::Right),
            _ => None,
        }
    }

    /// Step one cell on the torus.
    fn advance(self, p: Point) -> Point {
        let (w, h) = (snake::WIDTH, snake::HEIGHT);
        match self {
            Self::Up => Point::new(p.x, (p.y + h - 1) % h),
            Self::Down => Point::new(p.x, (p.y + 1) % h),
            Self::Left => Point::new((p.x + w - 1) % w, p.y),
            Self::Right => Point::new((p.x + 1) % w, p.y),
        }
    }
}

/// Snake on a wrapping board.
pub struct Snake {
    /// Head first.
    body: VecDeque<Point>,
    /// Direction of the last move.
    direction: Direction,
    /// Direction requested for the next move.
    pending: Direction,
    food: Point,
    score: u32,
    tick_ms: u32,
    phase: Phase,
}

impl Snake {
    pub fn new() -> Self {
        Self {
            body: VecDeque::from([Point::new(5, 5)]),
            direction: Direction::Right,
            pending: Direction::Right,
            food: Point::new(10, 5),
            score: 0,
            tick_ms: snake::START_TICK_MS,
            phase: Phase::Waiting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn place_food(&mut self, at: Point) {
        self.food = at;
    }

    /// Advance the simulation by one move.
    pub fn step(&mut self, rng: &mut SmallRng) -> Phase {
        if self.phase != Phase::Playing {
            return self.phase;
        }

        self.direction = self.pending;
        let head = self.direction.advance(self.head());

        // The tail moves out of the way this tick, so it can't be hit.
        let tail = self.body.len() - 1;
        if self.body.iter().take(tail).any(|&seg| seg == head) {
            self.phase = Phase::Over;
            return self.phase;
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += 1;
            self.relocate_food(rng);
            if self.score % snake::SPEEDUP_EVERY == 0 {
                self.tick_ms = self
                    .tick_ms
                    .saturating_sub(snake::SPEEDUP_MS)
                    .max(snake::MIN_TICK_MS);
            }
        } else {
            self.body.pop_back();
        }
        self.phase
    }

    fn relocate_food(&mut self, rng: &mut SmallRng) {
        let free: Vec<Point> = (0..snake::HEIGHT)
            .flat_map(|y| (0..snake::WIDTH).map(move |x| Point::new(x, y)))
            .filter(|p| !self.body.contains(p))
            .collect();
        match free.choose(rng) {
            Some(&p) => self.food = p,
            // Board is full: nowhere left to go.
            None => self.phase = Phase::Over,
        }
    }

    fn board_rows(&self) -> Vec<String> {
        let mut grid = vec![vec![' '; snake::WIDTH]; snake::HEIGHT];
        grid[self.food.y][self.food.x] = '*';
        for (i, seg) in self.body.iter().enumerate() {
            grid[seg.y][seg.x] = if i == 0 { 'X' } else { 'o' };
        }
        grid.into_iter()
            .map(|row| row.into_iter().flat_map(|c| [c, ' ']).collect())
            .collect()
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialMode for Snake {
    fn kind(&self) -> ModeKind {
        ModeKind::Snake
    }

    fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    fn time_limit_ms(&self) -> Option<u64> {
        Some(mode_timing::GAME_LIMIT)
    }

    fn tick(&mut self, rng: &mut SmallRng) -> Step {
        match self.step(rng) {
            Phase::Over => Step::Finished,
            _ => Step::Continue,
        }
    }

    fn handle_key(&mut self, key: Key, _rng: &mut SmallRng) -> Step {
        match self.phase {
            Phase::Waiting => self.phase = Phase::Playing,
            Phase::Playing => {
                if let Some(dir) = Direction::from_key(key)
                    && dir != self.direction.opposite()
                {
                    self.pending = dir;
                }
            }
            Phase::Over => return Step::Finished,
        }
        Step::Continue
    }

    fn frame(&self) -> Frame {
        match self.phase {
            Phase::Waiting => push_rows(
                Frame::new(),
                title_box(&[
                    "           SNAKE GAME",
                    "",
                    "       Press any key to start",
                    "",
                    "      Arrow keys to move",
                    "      Ctrl+C to exit",
                ]),
                Tone::Bright,
            ),
            Phase::Over => {
                let score = format!("         Your Score: {:>2}", self.score);
                push_rows(
                    Frame::new(),
                    title_box(&["          GAME OVER!", "", score.as_str(), ""]),
                    Tone::Alert,
                )
            }
            Phase::Playing => {
                let frame = push_rows(
                    Frame::new(),
                    bordered_grid(self.board_rows(), snake::WIDTH),
                    Tone::Normal,
                );
                frame
                    .blank()
                    .line("Controls:", Tone::Dim)
                    .line("↑/↓/←/→ : Move snake", Tone::Dim)
                    .line("Ctrl+C  : Exit game", Tone::Dim)
                    .blank()
                    .line("Goal: Eat * to grow", Tone::Dim)
                    .line(format!("Score: {}", self.score), Tone::Bright)
            }
        }
    }

    fn completion_message(&self) -> String {
        "Game over! Thanks for playing Snake.".to_string()
    }

    fn cancel_message(&self) -> String {
        "Snake game exited.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn started() -> (Snake, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut game = Snake::new();
        game.handle_key(Key::Char('x'), &mut rng);
        (game, rng)
    }

    #[test]
    fn test_waits_for_first_key() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut game = Snake::new();
        assert_eq!(game.tick(&mut rng), Step::Continue);
        assert_eq!(game.head(), Point::new(5, 5));
        assert!(game.frame().text().contains("Press any key to start"));

        game.handle_key(Key::Enter, &mut rng);
        assert_eq!(game.phase(), Phase::Playing);
        game.tick(&mut rng);
        assert_eq!(game.head(), Point::new(6, 5));
    }

    #[test]
    fn test_eating_grows_by_one() {
        let (mut game, mut rng) = started();
        game.place_food(Point::new(6, 5));

        game.step(&mut rng);
        assert_eq!(game.score(), 1);
        assert_eq!(game.len(), 2);
        assert_ne!(game.food(), Point::new(6, 5));

        game.place_food(Point::new(0, 0));
        game.step(&mut rng);
        assert_eq!(game.len(), 2);
    }

    #[test]
    fn test_wraps_around_edges() {
        let (mut game, mut rng) = started();
        game.place_food(Point::new(0, 0));
        game.handle_key(Key::Up, &mut rng);
        for _ in 0..6 {
            game.step(&mut rng);
        }
        assert_eq!(game.head(), Point::new(5, snake::HEIGHT - 1));
    }

    #[test]
    fn test_cannot_reverse() {
        let (mut game, mut rng) = started();
        game.handle_key(Key::Left, &mut rng);
        game.step(&mut rng);
        assert_eq!(game.head(), Point::new(6, 5));
    }

    #[test]
    fn test_self_collision_ends_game() {
        let (mut game, mut rng) = started();
        game.body = VecDeque::from([
            Point::new(5, 5),
            Point::new(6, 5),
            Point::new(6, 6),
            Point::new(5, 6),
            Point::new(4, 6),
        ]);
        game.direction = Direction::Down;
        game.pending = Direction::Down;
        assert_eq!(game.tick(&mut rng), Step::Finished);
        assert!(game.frame().text().contains("GAME OVER!"));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_allowed() {
        let (mut game, mut rng) = started();
        game.body = VecDeque::from([
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(6, 5),
        ]);
        game.direction = Direction::Right;
        game.pending = Direction::Right;
        assert_eq!(game.step(&mut rng), Phase::Playing);
        assert_eq!(game.head(), Point::new(6, 5));
    }

    #[test]
    fn test_speeds_up_every_five_points() {
        let (mut game, mut rng) = started();
        for i in 0..5 {
            let next = Point::new(6 + i, 5);
            game.place_food(next);
            game.step(&mut rng);
        }
        assert_eq!(game.score(), 5);
        assert_eq!(game.tick_ms(), snake::START_TICK_MS - snake::SPEEDUP_MS);
    }
}
