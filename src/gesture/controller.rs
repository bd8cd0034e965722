//! Pointer-driven state machine that turns touch and mouse streams into transform updates.
//!
//! Every touch event carries the full list of active contacts, mirroring how browsers deliver
//! touch lists. Contact-count changes re-base the gesture so the overlay never jumps.

use tracing::debug;

use crate::foundation::core::{Point, Vec2};
use crate::transform::state::TransformState;

/// Construction-time gesture options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// When false, two-contact input never scales or rotates the overlay.
    pub multi_pointer_gesture_enabled: bool,
}

/// Current phase of the touch state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePhase {
    Idle,
    SingleDrag {
        start: Point,
        base: Vec2,
    },
    MultiGesture {
        start_distance: f64,
        start_angle_deg: f64,
        base_scale: f64,
        base_rotation_deg: f64,
    },
    /// Contacts are down but none of them drive the transform.
    Tracking {
        contacts: usize,
    },
}

impl GesturePhase {
    pub fn contacts(&self) -> usize {
        match self {
            GesturePhase::Idle => 0,
            GesturePhase::SingleDrag { .. } => 1,
            GesturePhase::MultiGesture { .. } => 2,
            GesturePhase::Tracking { contacts } => *contacts,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct MouseDrag {
    start: Point,
    base: Vec2,
}

pub struct GestureController {
    config: GestureConfig,
    phase: GesturePhase,
    mouse: Option<MouseDrag>,
}

impl GestureController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            mouse: None,
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Drop any in-flight gesture without touching the transform.
    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
        self.mouse = None;
    }

    pub fn touch_start(&mut self, contacts: &[Point], state: &TransformState) {
        self.rebase(contacts, state);
    }

    /// Returns true when the transform changed.
    pub fn touch_move(&mut self, contacts: &[Point], state: &mut TransformState) -> bool {
        if contacts.len() != self.phase.contacts() {
            self.rebase(contacts, state);
            return false;
        }

        match self.phase {
            GesturePhase::SingleDrag { start, base } => {
                let delta = contacts[0] - start;
                let next = base + delta;
                state.set_translation(next.x, next.y);
                true
            }
            GesturePhase::MultiGesture {
                start_distance,
                start_angle_deg,
                base_scale,
                base_rotation_deg,
            } => {
                let (distance, angle) = pair_geometry(contacts[0], contacts[1]);
                if start_distance > 0.0 {
                    state.set_gesture_scale(base_scale * (distance / start_distance));
                }
                state.set_rotation(base_rotation_deg + (angle - start_angle_deg));
                true
            }
            GesturePhase::Idle | GesturePhase::Tracking { .. } => false,
        }
    }

    pub fn touch_end(&mut self, remaining: &[Point], state: &TransformState) {
        if remaining.len() != self.phase.contacts() {
            self.rebase(remaining, state);
        }
    }

    pub fn mouse_down(&mut self, at: Point, state: &TransformState) {
        self.mouse = Some(MouseDrag {
            start: at,
            base: state.translation(),
        });
    }

    pub fn mouse_move(&mut self, at: Point, state: &mut TransformState) -> bool {
        let Some(drag) = self.mouse else {
            return false;
        };
        let next = drag.base + (at - drag.start);
        state.set_translation(next.x, next.y);
        true
    }

    pub fn mouse_up(&mut self) {
        self.mouse = None;
    }

    fn rebase(&mut self, contacts: &[Point], state: &TransformState) {
        let next = match contacts {
            [] => GesturePhase::Idle,
            [p] => GesturePhase::SingleDrag {
                start: *p,
                base: state.translation(),
            },
            [a, b] if self.config.multi_pointer_gesture_enabled => {
                let (distance, angle) = pair_geometry(*a, *b);
                GesturePhase::MultiGesture {
                    start_distance: distance,
                    start_angle_deg: angle,
                    base_scale: state.gesture_scale(),
                    base_rotation_deg: state.rotation_degrees(),
                }
            }
            many => GesturePhase::Tracking {
                contacts: many.len(),
            },
        };
        if next.contacts() != self.phase.contacts() {
            debug!(
                from = self.phase.contacts(),
                to = next.contacts(),
                "gesture contact count changed"
            );
        }
        self.phase = next;
    }
}

/// Distance and `atan2` angle in degrees from `a` to `b`.
pub fn pair_geometry(a: Point, b: Point) -> (f64, f64) {
    let d = b - a;
    (d.hypot(), d.y.atan2(d.x).to_degrees())
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/controller.rs"]
mod tests;
