use rand::Rng;
use rand::rngs::SmallRng;

use super::{SpecialMode, Step, progress_bar, ticks_for};
use crate::config::mode_timing;
use crate::models::{Frame, ModeKind, Tone};

/// Named stages and their length in ticks.
const STAGES: &[(&str, u32)] = &[
    ("Initializing exploit vectors", 10),
    ("Bypassing firewall", 15),
    ("Injecting payload", 20),
    ("Elevating privileges", 15),
    ("Accessing mainframe", 10),
    ("Extracting data", 20),
    ("Covering tracks", 10),
];

const BAR_WIDTH: usize = 50;
const NOISE_ROWS: usize = 5;
const NOISE_GROUPS: usize = 8;
const HEX: &[u8] = b"0123456789ABCDEF";

/// Fake intrusion against a named target.
pub struct Hack {
    target: String,
    stage: usize,
    stage_ticks: u32,
    /// Ticks left on the completion screen; `Some` once every stage is done.
    linger: Option<u32>,
    noise: Vec<String>,
}

impl Hack {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            stage: 0,
            stage_ticks: 0,
            linger: None,
            noise: vec![String::new(); NOISE_ROWS],
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_complete(&self) -> bool {
        self.linger.is_some()
    }

    /// Overall progress across all stages, 0..=100.
    pub fn percent(&self) -> u32 {
        let total: u32 = STAGES.iter().map(|(_, d)| d).sum();
        let done: u32 = STAGES[..self.stage].iter().map(|(_, d)| d).sum::<u32>() + self.stage_ticks;
        done * 100 / total
    }

    fn status(&self) -> String {
        if self.is_complete() {
            format!("Hack complete! Access to {} granted.", self.target)
        } else {
            format!("{}...", STAGES[self.stage].0)
        }
    }
}

fn noise_row(rng: &mut SmallRng) -> String {
    (0..NOISE_GROUPS)
        .map(|_| {
            (0..4)
                .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl SpecialMode for Hack {
    fn kind(&self) -> ModeKind {
        ModeKind::Hack
    }

    fn tick_ms(&self) -> u32 {
        mode_timing::HACK_TICK
    }

    fn tick(&mut self, rng: &mut SmallRng) -> Step {
        for row in &mut self.noise {
            *row = noise_row(rng);
        }

        if let Some(left) = self.linger.as_mut() {
            *left = left.saturating_sub(1);
            return if *left == 0 {
                Step::Finished
            } else {
                Step::Continue
            };
        }

        self.stage_ticks += 1;
        if self.stage_ticks >= STAGES[self.stage].1 {
            if self.stage + 1 < STAGES.len() {
                self.stage += 1;
                self.stage_ticks = 0;
            } else {
                self.linger = Some(ticks_for(mode_timing::HACK_LINGER, mode_timing::HACK_TICK));
            }
        }
        Step::Continue
    }

    fn frame(&self) -> Frame {
        let percent = self.percent();
        let filled = percent as usize * BAR_WIDTH / 100;
        let mut frame = Frame::new()
            .line(format!("Target: {}", self.target), Tone::Normal)
            .line(format!("Status: {}", self.status()), Tone::Normal)
            .line(
                format!("{} {}%", progress_bar(filled, BAR_WIDTH), percent),
                Tone::Normal,
            )
            .blank();
        for row in &self.noise {
            frame = frame.line(row.clone(), Tone::Dim);
        }
        let banner = if percent == 100 {
            ("HACK COMPLETE - SYSTEM COMPROMISED", Tone::Bright)
        } else {
            ("HACKING IN PROGRESS - PRESS CTRL+C TO ABORT", Tone::Alert)
        };
        frame.blank().line(banner.0, banner.1)
    }

    fn completion_message(&self) -> String {
        format!("Target {} successfully compromised.", self.target)
    }

    fn cancel_message(&self) -> String {
        "System penetration aborted with exit code 1.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_progress_across_stages() {
        let mut hack = Hack::new("pentagon");
        let mut rng = SmallRng::seed_from_u64(9);
        assert_eq!(hack.percent(), 0);

        for _ in 0..10 {
            hack.tick(&mut rng);
        }
        assert_eq!(hack.stage, 1);
        assert_eq!(hack.percent(), 10);
        assert!(hack.frame().text().contains("Bypassing firewall..."));
    }

    #[test]
    fn test_completes_after_linger() {
        let mut hack = Hack::new("system");
        let mut rng = SmallRng::seed_from_u64(9);

        for _ in 0..100 {
            assert_eq!(hack.tick(&mut rng), Step::Continue);
        }
        assert!(hack.is_complete());
        assert_eq!(hack.percent(), 100);
        assert!(hack.frame().text().contains("Access to system granted."));

        for _ in 0..6 {
            assert_eq!(hack.tick(&mut rng), Step::Continue);
        }
        assert_eq!(hack.tick(&mut rng), Step::Finished);
        assert_eq!(
            hack.completion_message(),
            "Target system successfully compromised."
        );
    }

    #[test]
    fn test_noise_rows() {
        let mut rng = SmallRng::seed_from_u64(1);
        let row = noise_row(&mut rng);
        assert_eq!(row.split(' ').count(), NOISE_GROUPS);
        assert!(row.chars().all(|c| c == ' ' || c.is_ascii_hexdigit()));
    }
}
