//! Press-and-hold buttons: a tap performs one big step, a hold repeats small steps.

use std::time::{Duration, Instant};

/// Holds shorter than this count as a tap.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(220);
/// Interval between repeat steps once a hold is recognized.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(80);
/// Scale delta applied by a tap.
pub const TAP_SCALE_STEP: f64 = 0.15;
/// Scale delta applied per repeat tick.
pub const REPEAT_SCALE_STEP: f64 = 0.02;

/// What a release resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldRelease {
    /// Button was not pressed.
    Ignored,
    /// Released before the hold threshold: apply one big step.
    Tap,
    /// Released after repeating; `pending` repeat ticks were still due at release time.
    Held { pending: u32 },
}

/// Timer-free model of a press-and-hold button.
///
/// The owner polls with the current time; the button reports how many repeat ticks came due since
/// the previous poll.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldButton {
    pressed_at: Option<Instant>,
    ticks_emitted: u32,
}

impl HoldButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Start a press. A press while already pressed restarts the timers.
    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
        self.ticks_emitted = 0;
    }

    /// Repeat ticks that came due since the last poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(pressed_at) = self.pressed_at else {
            return 0;
        };
        let due = ticks_due(now.saturating_duration_since(pressed_at));
        let fresh = due.saturating_sub(self.ticks_emitted);
        self.ticks_emitted = due;
        fresh
    }

    /// Forget the press without resolving it to a tap or a hold.
    pub fn cancel(&mut self) {
        self.pressed_at = None;
        self.ticks_emitted = 0;
    }

    pub fn release(&mut self, now: Instant) -> HoldRelease {
        if self.pressed_at.is_none() {
            return HoldRelease::Ignored;
        }
        let pending = self.poll(now);
        let held = self.ticks_emitted > 0;
        self.pressed_at = None;
        self.ticks_emitted = 0;
        if held {
            HoldRelease::Held { pending }
        } else {
            HoldRelease::Tap
        }
    }
}

/// Total repeat ticks due after holding for `elapsed`: one at the threshold, then one per interval.
fn ticks_due(elapsed: Duration) -> u32 {
    if elapsed < HOLD_THRESHOLD {
        return 0;
    }
    let since = elapsed - HOLD_THRESHOLD;
    let extra = since.as_millis() / REPEAT_INTERVAL.as_millis();
    u32::try_from(extra).unwrap_or(u32::MAX).saturating_add(1)
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/hold.rs"]
mod tests;
