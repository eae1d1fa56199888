use std::num::IntErrorKind;

use rand::rngs::SmallRng;

use super::{SpecialMode, Step, progress_bar};
use crate::config::mode_timing;
use crate::core::error::InputError;
use crate::models::{Frame, ModeKind, Tone};

const BAR_WIDTH: usize = 40;

/// Countdown started by `timer <seconds>`.
pub struct Countdown {
    total: u64,
    remaining: u64,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self {
            total: seconds,
            remaining: seconds,
        }
    }

    /// Parse the `timer` argument. Only positive whole seconds are accepted.
    pub fn parse_seconds(arg: Option<&str>) -> Result<u64, InputError> {
        let arg = arg.ok_or(InputError::TimerUsage)?;
        match arg.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                Err(InputError::DurationOutOfRange)
            }
            _ => Err(InputError::InvalidDuration),
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    fn clock(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    fn clock_tone(&self) -> Tone {
        let left_pct = scaled(self.remaining, self.total, 100);
        match left_pct {
            67.. => Tone::Bright,
            34..=66 => Tone::Normal,
            _ => Tone::Alert,
        }
    }
}

/// `part / whole` mapped onto `0..=range`, widened so long timers cannot overflow.
fn scaled(part: u64, whole: u64, range: u64) -> u64 {
    let value = u128::from(part) * u128::from(range) / u128::from(whole.max(1));
    value as u64
}

impl SpecialMode for Countdown {
    fn kind(&self) -> ModeKind {
        ModeKind::Timer
    }

    fn tick_ms(&self) -> u32 {
        mode_timing::TIMER_TICK
    }

    fn tick(&mut self, _rng: &mut SmallRng) -> Step {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            Step::Finished
        } else {
            Step::Continue
        }
    }

    fn frame(&self) -> Frame {
        let elapsed = self.total - self.remaining;
        let percent = scaled(elapsed, self.total, 100);
        let filled = scaled(elapsed, self.total, BAR_WIDTH as u64) as usize;
        let footer = if self.remaining > 0 {
            "Press Ctrl+C to cancel"
        } else {
            "Timer complete!"
        };
        Frame::new()
            .line(self.clock(), self.clock_tone())
            .line(
                format!("{} {}%", progress_bar(filled, BAR_WIDTH), percent),
                Tone::Normal,
            )
            .line(footer, Tone::Dim)
    }

    fn completion_message(&self) -> String {
        "Timer completed!".to_string()
    }

    fn cancel_message(&self) -> String {
        "Timer canceled.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(Countdown::parse_seconds(Some("5")), Ok(5));
        assert_eq!(Countdown::parse_seconds(None), Err(InputError::TimerUsage));
        assert_eq!(
            Countdown::parse_seconds(Some("0")),
            Err(InputError::InvalidDuration)
        );
        assert_eq!(
            Countdown::parse_seconds(Some("-5")),
            Err(InputError::InvalidDuration)
        );
        assert_eq!(
            Countdown::parse_seconds(Some("soon")),
            Err(InputError::InvalidDuration)
        );
    }

    #[test]
    fn test_counts_down_to_zero() {
        let mut timer = Countdown::new(3);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(timer.frame().text().starts_with("00:03"));
        assert_eq!(timer.tick(&mut rng), Step::Continue);
        assert_eq!(timer.tick(&mut rng), Step::Continue);
        assert_eq!(timer.tick(&mut rng), Step::Finished);
        assert_eq!(timer.remaining(), 0);
        assert!(timer.frame().text().contains("100%"));
    }

    #[test]
    fn test_parse_seconds_beyond_u32() {
        assert_eq!(
            Countdown::parse_seconds(Some("5000000000")),
            Ok(5_000_000_000)
        );
        assert_eq!(
            Countdown::parse_seconds(Some("99999999999999999999999")),
            Err(InputError::DurationOutOfRange)
        );
    }

    #[test]
    fn test_long_timer_renders_without_overflow() {
        let mut timer = Countdown::new(50_000_000);
        let mut rng = SmallRng::seed_from_u64(0);
        timer.tick(&mut rng);
        let text = timer.frame().text();
        assert!(text.contains(" 0%"));
        assert_eq!(timer.clock_tone(), Tone::Bright);

        let mut huge = Countdown::new(u64::MAX);
        huge.tick(&mut rng);
        assert!(huge.frame().text().contains(" 0%"));
    }

    #[test]
    fn test_clock_format() {
        let timer = Countdown::new(125);
        assert_eq!(timer.clock(), "02:05");
    }
}
