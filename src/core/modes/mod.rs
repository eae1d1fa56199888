//! Special modes: full-screen animations and games that own terminal input.
//!
//! A [`ModeController`] holds at most one running [`SpecialMode`]. The view
//! drives it with a single repeating task at the mode's tick period and
//! forwards keys while it is active. Each run leaves the controller exactly
//! once, through [`ModeController::cancel`], [`ModeController::advance`]
//! (completion or timeout) or [`ModeController::force_exit`].

mod burger;
mod credits;
mod glitch;
mod hack;
mod matrix;
mod timer;

pub use burger::Burger;
pub use credits::Credits;
pub use glitch::Glitch;
pub use hack::Hack;
pub use matrix::Matrix;
pub use timer::Countdown;

use rand::rngs::SmallRng;

use super::error::ModeError;
use super::keys::Key;
use crate::models::{Frame, ModeKind, RunId, VisualEffect};

/// Result of one simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The mode reached its own success condition.
    Finished,
}

/// Behaviour shared by every animation and game.
pub trait SpecialMode {
    fn kind(&self) -> ModeKind;

    /// Period of [`SpecialMode::tick`]. May change while running.
    fn tick_ms(&self) -> u32;

    /// Wall-clock ceiling after which the run ends as if completed.
    fn time_limit_ms(&self) -> Option<u64> {
        None
    }

    fn tick(&mut self, rng: &mut SmallRng) -> Step;

    /// Keys other than Ctrl+C while the mode is active.
    fn handle_key(&mut self, _key: Key, _rng: &mut SmallRng) -> Step {
        Step::Continue
    }

    fn frame(&self) -> Frame;

    /// Distortion applied to the terminal container, if any.
    fn effect(&self) -> Option<VisualEffect> {
        None
    }

    fn completion_message(&self) -> String;

    fn cancel_message(&self) -> String;
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// Ctrl+C / Cmd+C.
    Cancelled,
    /// The mode finished on its own.
    Completed,
    /// The wall-clock ceiling was reached.
    TimedOut,
    /// `clear` wiped the terminal mid-run.
    Cleared,
}

impl ExitReason {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Completed | Self::TimedOut)
    }
}

/// Everything the session needs to report a finished run.
#[derive(Clone, Debug)]
pub struct ModeExit {
    pub run: RunId,
    pub kind: ModeKind,
    pub reason: ExitReason,
    /// Completion or cancel text; `None` when cleared.
    pub message: Option<String>,
    /// Last rendered frame, kept so the scrollback entry stays readable.
    pub final_frame: Frame,
}

struct ActiveRun {
    run: RunId,
    mode: Box<dyn SpecialMode>,
    elapsed_ms: u64,
    pending_ms: u64,
}

impl ActiveRun {
    fn finish(self, reason: ExitReason) -> ModeExit {
        let message = match reason {
            ExitReason::Completed | ExitReason::TimedOut => Some(self.mode.completion_message()),
            ExitReason::Cancelled => Some(self.mode.cancel_message()),
            ExitReason::Cleared => None,
        };
        ModeExit {
            run: self.run,
            kind: self.mode.kind(),
            reason,
            message,
            final_frame: self.mode.frame(),
        }
    }
}

/// Controller state. A run can only leave `Active` by being moved out.
enum ModeState {
    Idle,
    Active(ActiveRun),
}

/// Mutual-exclusion gate for special modes.
pub struct ModeController {
    state: ModeState,
    next_run: u64,
}

impl ModeController {
    pub fn new() -> Self {
        Self {
            state: ModeState::Idle,
            next_run: 1,
        }
    }

    /// Start `mode`, rejecting it if another run is active.
    pub fn start(&mut self, mode: Box<dyn SpecialMode>) -> Result<RunId, ModeError> {
        if let ModeState::Active(active) = &self.state {
            return Err(ModeError::AlreadyActive {
                requested: mode.kind(),
                active: active.mode.kind(),
            });
        }

        let run = RunId(self.next_run);
        self.next_run += 1;
        self.state = ModeState::Active(ActiveRun {
            run,
            mode,
            elapsed_ms: 0,
            pending_ms: 0,
        });
        Ok(run)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ModeState::Active(_))
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.active().map(|a| a.run)
    }

    /// Current tick period, used to (re)start the driving task.
    pub fn tick_ms(&self) -> Option<u32> {
        self.active().map(|a| a.mode.tick_ms())
    }

    pub fn frame(&self) -> Option<(RunId, Frame)> {
        self.active().map(|a| (a.run, a.mode.frame()))
    }

    pub fn effect(&self) -> Option<VisualEffect> {
        self.active().and_then(|a| a.mode.effect())
    }

    /// Advance simulated time by `ms`, ticking as many times as it covers.
    pub fn advance(&mut self, ms: u32, rng: &mut SmallRng) -> Option<ModeExit> {
        let ModeState::Active(active) = &mut self.state else {
            return None;
        };

        active.elapsed_ms += u64::from(ms);
        active.pending_ms += u64::from(ms);

        let mut finished = false;
        loop {
            let period = u64::from(active.mode.tick_ms().max(1));
            if active.pending_ms < period {
                break;
            }
            active.pending_ms -= period;
            if active.mode.tick(rng) == Step::Finished {
                finished = true;
                break;
            }
        }

        if finished {
            return self.exit(ExitReason::Completed);
        }
        let timed_out = active
            .mode
            .time_limit_ms()
            .is_some_and(|limit| active.elapsed_ms >= limit);
        if timed_out {
            return self.exit(ExitReason::TimedOut);
        }
        None
    }

    /// Forward a key to the active mode.
    pub fn handle_key(&mut self, key: Key, rng: &mut SmallRng) -> Option<ModeExit> {
        let ModeState::Active(active) = &mut self.state else {
            return None;
        };
        match active.mode.handle_key(key, rng) {
            Step::Finished => self.exit(ExitReason::Completed),
            Step::Continue => None,
        }
    }

    /// User cancel. A second call (or a call after completion) is a no-op.
    pub fn cancel(&mut self) -> Option<ModeExit> {
        self.exit(ExitReason::Cancelled)
    }

    /// End the run without a message (used by `clear`).
    pub fn force_exit(&mut self) -> Option<ModeExit> {
        self.exit(ExitReason::Cleared)
    }

    fn active(&self) -> Option<&ActiveRun> {
        match &self.state {
            ModeState::Active(active) => Some(active),
            ModeState::Idle => None,
        }
    }

    fn exit(&mut self, reason: ExitReason) -> Option<ModeExit> {
        match std::mem::replace(&mut self.state, ModeState::Idle) {
            ModeState::Active(active) => Some(active.finish(reason)),
            ModeState::Idle => None,
        }
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Shared rendering helpers
// =============================================================================

/// `[=====     ]` bar of `width` cells, `filled` of them set.
pub(crate) fn progress_bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(width - filled))
}

/// Number of ticks of length `tick_ms` needed to cover `ms`, rounded up.
pub(crate) fn ticks_for(ms: u32, tick_ms: u32) -> u32 {
    ms.div_ceil(tick_ms.max(1))
}
