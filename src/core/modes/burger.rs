use rand::rngs::SmallRng;

use super::{SpecialMode, Step};
use crate::config::{BURGER_FRAMES_TEXT, FRAME_SEPARATOR, mode_timing};
use crate::models::{Frame, ModeKind, Tone};

/// Dancing cat chasing a burger. Purely decorative; ends on its time limit.
pub struct Burger {
    frames: Vec<&'static str>,
    index: usize,
}

impl Burger {
    pub fn new() -> Self {
        let frames = BURGER_FRAMES_TEXT
            .split(FRAME_SEPARATOR)
            .map(|f| f.trim_matches('\n'))
            .filter(|f| !f.trim().is_empty())
            .collect();
        Self { frames, index: 0 }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Default for Burger {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialMode for Burger {
    fn kind(&self) -> ModeKind {
        ModeKind::Burger
    }

    fn tick_ms(&self) -> u32 {
        mode_timing::BURGER_FRAME
    }

    fn time_limit_ms(&self) -> Option<u64> {
        Some(mode_timing::BURGER_LIMIT)
    }

    fn tick(&mut self, _rng: &mut SmallRng) -> Step {
        if !self.frames.is_empty() {
            self.index = (self.index + 1) % self.frames.len();
        }
        Step::Continue
    }

    fn frame(&self) -> Frame {
        let art = self.frames.get(self.index).copied().unwrap_or_default();
        Frame::new()
            .block(art, Tone::Accent)
            .line("  Hold Ctrl + C to quit", Tone::Dim)
    }

    fn completion_message(&self) -> String {
        "Burger animation complete.".to_string()
    }

    fn cancel_message(&self) -> String {
        "Animation stopped.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_frames_cycle() {
        let mut burger = Burger::new();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(burger.frame_count(), 8);

        let first = burger.frame();
        assert!(first.text().contains('🍔'));
        for _ in 0..burger.frame_count() {
            burger.tick(&mut rng);
        }
        assert_eq!(burger.frame(), first);
    }
}
