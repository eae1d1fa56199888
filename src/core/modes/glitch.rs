use rand::Rng;
use rand::rngs::SmallRng;

use super::{SpecialMode, Step};
use crate::config::mode_timing;
use crate::models::{CorruptionBlock, Frame, ModeKind, Tone, VisualEffect};

/// Chance per tick that a new distortion is rolled instead of settling.
const GLITCH_CHANCE: f64 = 0.4;

/// Randomly distorts the terminal container until its time limit.
pub struct Glitch {
    effect: VisualEffect,
}

impl Glitch {
    pub fn new() -> Self {
        Self {
            effect: VisualEffect::default(),
        }
    }
}

impl Default for Glitch {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the distortion for an intensity in `0.0..10.0`.
fn roll_effect(intensity: f32, rng: &mut SmallRng) -> VisualEffect {
    let mut effect = VisualEffect::default();

    if intensity > 7.0 {
        effect.hue_rotate_deg = Some(rng.gen_range(0.0..360.0));
        effect.contrast = Some(1.0 + rng.gen_range(0.0..1.0));
    } else if intensity > 5.0 {
        effect.brightness = Some(1.0 + rng.gen_range(0.0..0.5));
        effect.contrast = Some(1.0 + rng.gen_range(0.0..0.3));
    }

    if intensity > 6.0 {
        effect.shadow_offsets_px = Some((rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)));
    }

    effect.scanlines = intensity > 5.0;

    if intensity > 8.0 {
        let count = rng.gen_range(1..=5);
        effect.corruption = (0..count)
            .map(|_| CorruptionBlock {
                left_pct: rng.gen_range(0.0..100.0),
                top_pct: rng.gen_range(0.0..100.0),
                size_px: rng.gen_range(10.0..60.0),
                rotate_deg: rng.gen_range(-15.0..15.0),
                opacity: rng.gen_range(0.3..1.0),
                red: rng.gen_bool(0.5),
            })
            .collect();
    }

    effect
}

impl SpecialMode for Glitch {
    fn kind(&self) -> ModeKind {
        ModeKind::Glitch
    }

    fn tick_ms(&self) -> u32 {
        mode_timing::GLITCH_TICK
    }

    fn time_limit_ms(&self) -> Option<u64> {
        Some(mode_timing::GLITCH_LIMIT)
    }

    fn tick(&mut self, rng: &mut SmallRng) -> Step {
        self.effect = if rng.gen_bool(GLITCH_CHANCE) {
            let intensity = rng.gen_range(0.0..10.0);
            roll_effect(intensity, rng)
        } else {
            VisualEffect::default()
        };
        Step::Continue
    }

    fn frame(&self) -> Frame {
        Frame::new().line(
            "GLITCH MODE ACTIVE - PRESS CTRL+C TO NORMALIZE",
            Tone::Alert,
        )
    }

    fn effect(&self) -> Option<VisualEffect> {
        (!self.effect.is_none()).then(|| self.effect.clone())
    }

    fn completion_message(&self) -> String {
        "Terminal glitch sequence complete.".to_string()
    }

    fn cancel_message(&self) -> String {
        "Terminal normalized.".to_string()
    }
}
