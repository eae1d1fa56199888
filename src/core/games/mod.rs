//! Real-time games hosted as special modes.
//!
//! Both games start paused behind a title box, begin on the first key press,
//! and end (as a completed run) on game over.

mod snake;
mod tetris;

pub use snake::{Direction, Point, Snake};
pub use tetris::Tetris;

use crate::models::{Frame, Tone};

/// Lifecycle inside a single game run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Title box shown, waiting for any key.
    Waiting,
    Playing,
    Over,
}

const BOX_INNER: usize = 32;

/// Draw `lines` inside a double-line box.
pub(crate) fn title_box(lines: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("╔{}╗", "═".repeat(BOX_INNER)));
    for line in lines {
        let pad = BOX_INNER.saturating_sub(line.chars().count());
        out.push(format!("║{}{}║", line, " ".repeat(pad)));
    }
    out.push(format!("╚{}╝", "═".repeat(BOX_INNER)));
    out
}

/// Draw a grid with a `+--+` border; each cell is two characters wide.
pub(crate) fn bordered_grid(rows: impl IntoIterator<Item = String>, width: usize) -> Vec<String> {
    let edge = format!("+{}+", "-".repeat(width * 2));
    let mut out = vec![edge.clone()];
    out.extend(rows.into_iter().map(|row| format!("|{}|", row)));
    out.push(edge);
    out
}

/// Append rendered rows to a frame with one tone.
pub(crate) fn push_rows(frame: Frame, rows: Vec<String>, tone: Tone) -> Frame {
    rows.into_iter().fold(frame, |f, row| f.line(row, tone))
}
