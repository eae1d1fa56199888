use rand::Rng;
use rand::rngs::SmallRng;

use super::{SpecialMode, Step};
use crate::config::mode_timing;
use crate::models::{Frame, ModeKind, Tone};

const ROWS: usize = 15;
const COLS: usize = 60;
const GLYPHS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz$+-=*/()[]{}<>!?";

/// Chance per tick that an idle column starts a new drop.
const SPAWN_CHANCE: f64 = 0.06;

#[derive(Clone, Debug)]
struct Raindrop {
    head: f32,
    speed: f32,
    length: usize,
}

impl Raindrop {
    fn covers(&self, row: usize) -> bool {
        let head = self.head.floor() as isize;
        let row = row as isize;
        row <= head && row > head - self.length as isize
    }
}

/// Digital rain. Each column runs its own drop with random speed and length.
pub struct Matrix {
    columns: Vec<Option<Raindrop>>,
    glyphs: Vec<Vec<char>>,
}

impl Matrix {
    pub fn new(rng: &mut SmallRng) -> Self {
        let glyphs = (0..ROWS)
            .map(|_| (0..COLS).map(|_| random_glyph(rng)).collect())
            .collect();
        let columns = (0..COLS)
            .map(|_| rng.gen_bool(0.3).then(|| new_drop(rng, true)))
            .collect();
        Self { columns, glyphs }
    }

    fn render_row(&self, row: usize) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(col, drop)| match drop {
                Some(d) if d.covers(row) => self.glyphs[row][col],
                _ => ' ',
            })
            .collect()
    }
}

fn random_glyph(rng: &mut SmallRng) -> char {
    GLYPHS[rng.gen_range(0..GLYPHS.len())] as char
}

fn new_drop(rng: &mut SmallRng, anywhere: bool) -> Raindrop {
    Raindrop {
        head: if anywhere {
            rng.gen_range(0..ROWS) as f32
        } else {
            0.0
        },
        speed: rng.gen_range(0.3..1.2),
        length: rng.gen_range(4..12),
    }
}

impl SpecialMode for Matrix {
    fn kind(&self) -> ModeKind {
        ModeKind::Matrix
    }

    fn tick_ms(&self) -> u32 {
        mode_timing::MATRIX_FRAME
    }

    fn time_limit_ms(&self) -> Option<u64> {
        Some(mode_timing::MATRIX_LIMIT)
    }

    fn tick(&mut self, rng: &mut SmallRng) -> Step {
        for column in &mut self.columns {
            *column = match column.take() {
                Some(mut drop) => {
                    drop.head += drop.speed;
                    let head = drop.head as usize;
                    (head < ROWS + drop.length).then_some(drop)
                }
                None => rng.gen_bool(SPAWN_CHANCE).then(|| new_drop(rng, false)),
            };
        }
        for row in &mut self.glyphs {
            for glyph in row.iter_mut() {
                if rng.gen_bool(0.1) {
                    *glyph = random_glyph(rng);
                }
            }
        }
        Step::Continue
    }

    fn frame(&self) -> Frame {
        let mut frame = Frame::new();
        for row in 0..ROWS {
            frame = frame.line(self.render_row(row), Tone::Bright);
        }
        frame
            .blank()
            .line("THE MATRIX HAS YOU - PRESS CTRL+C TO EXIT", Tone::Normal)
    }

    fn completion_message(&self) -> String {
        "Connection to the Matrix closed.".to_string()
    }

    fn cancel_message(&self) -> String {
        "Matrix animation stopped.".to_string()
    }
}
