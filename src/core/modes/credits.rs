use rand::rngs::SmallRng;

use super::{SpecialMode, Step};
use crate::config::{CREDITS_TEXT, mode_timing};
use crate::models::{Frame, ModeKind, Tone};

/// Lines visible at once.
const WINDOW: usize = 15;

/// The scroll advances a tenth of a line per tick.
const STEPS_PER_LINE: usize = 10;

const HEADINGS: &[&str] = &[
    "DEVELOPED BY",
    "LEAD DEVELOPER",
    "AI ARCHITECTURE",
    "QUANTUM ALGORITHMS",
    "UI/UX DESIGN",
    "SECURITY PROTOCOLS",
    "NEURAL NETWORK",
    "DATA INFRASTRUCTURE",
    "SPECIAL THANKS",
];

/// Slowly scrolling credits; completes once the last line has scrolled past.
pub struct Credits {
    lines: Vec<&'static str>,
    position: usize,
}

impl Credits {
    pub fn new() -> Self {
        Self {
            lines: CREDITS_TEXT.lines().collect(),
            position: 0,
        }
    }

    /// Index of the first visible line.
    pub fn top_line(&self) -> usize {
        self.position / STEPS_PER_LINE
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl Default for Credits {
    fn default() -> Self {
        Self::new()
    }
}

fn tone_for(line: &str) -> Tone {
    if HEADINGS.iter().any(|h| line.starts_with(h)) {
        Tone::Bright
    } else {
        Tone::Normal
    }
}

impl SpecialMode for Credits {
    fn kind(&self) -> ModeKind {
        ModeKind::Credits
    }

    fn tick_ms(&self) -> u32 {
        mode_timing::CREDITS_TICK
    }

    fn tick(&mut self, _rng: &mut SmallRng) -> Step {
        if self.position >= self.lines.len() * STEPS_PER_LINE {
            return Step::Finished;
        }
        self.position += 1;
        Step::Continue
    }

    fn frame(&self) -> Frame {
        let mut frame = Frame::new();
        for line in self.lines.iter().skip(self.top_line()).take(WINDOW) {
            frame = frame.line(*line, tone_for(line));
        }
        frame.blank().line("PRESS CTRL+C TO EXIT", Tone::Dim)
    }

    fn completion_message(&self) -> String {
        "Credits complete.".to_string()
    }

    fn cancel_message(&self) -> String {
        "Credits stopped.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_scrolls_to_the_end() {
        let mut credits = Credits::new();
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(credits.frame().lines[0].text, "NuCaloric System");

        let steps = credits.line_count() * STEPS_PER_LINE;
        for _ in 0..steps {
            assert_eq!(credits.tick(&mut rng), Step::Continue);
        }
        assert_eq!(credits.tick(&mut rng), Step::Finished);
    }

    #[test]
    fn test_one_line_per_ten_ticks() {
        let mut credits = Credits::new();
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..9 {
            credits.tick(&mut rng);
        }
        assert_eq!(credits.top_line(), 0);
        credits.tick(&mut rng);
        assert_eq!(credits.top_line(), 1);
    }

    #[test]
    fn test_headings_are_highlighted() {
        assert_eq!(tone_for("DEVELOPED BY"), Tone::Bright);
        assert_eq!(tone_for("Cotton Le Sergal"), Tone::Normal);
    }
}
