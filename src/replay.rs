//! Scripted input replay: feeds a timed list of pointer/button events through the same gesture,
//! hold-button and slider logic the session uses, against a fresh transform.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::debug;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{PlantfitError, PlantfitResult};
use crate::gesture::controller::{GestureConfig, GestureController};
use crate::gesture::hold::{HoldButton, HoldRelease, REPEAT_SCALE_STEP, TAP_SCALE_STEP};
use crate::gesture::slider::DepthSlider;
use crate::render::projector::project;
use crate::transform::state::TransformState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomButton {
    In,
    Out,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayAction {
    TouchStart { contacts: Vec<[f64; 2]> },
    TouchMove { contacts: Vec<[f64; 2]> },
    /// `contacts` lists the touches still down after the end.
    TouchEnd {
        #[serde(default)]
        contacts: Vec<[f64; 2]>,
    },
    MouseDown { x: f64, y: f64 },
    MouseMove { x: f64, y: f64 },
    MouseUp,
    ZoomPress { button: ZoomButton },
    ZoomRelease { button: ZoomButton },
    /// `track` is `[x0, y0, x1, y1]`.
    SliderBegin { x: f64, track: [f64; 4] },
    SliderDrag { x: f64 },
    SliderEnd,
    Rotate,
    Reset,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplayEvent {
    /// Milliseconds since the start of the script. Must not decrease.
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ReplayAction,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub gesture: Option<GestureConfig>,
    pub events: Vec<ReplayEvent>,
}

impl ReplayScript {
    pub fn from_json_str(text: &str) -> PlantfitResult<Self> {
        let script: Self = serde_json::from_str(text)
            .map_err(|e| PlantfitError::serde(format!("replay script json: {e}")))?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PlantfitResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read replay script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> PlantfitResult<()> {
        for pair in self.events.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(PlantfitError::validation(format!(
                    "replay events out of order at {} ms",
                    pair[1].at_ms
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReplayOutcome {
    pub transform: TransformState,
    pub css: String,
    pub events_applied: usize,
}

/// Run `script` from the default transform. `fallback_gesture` applies when the script carries
/// no gesture section of its own.
pub fn run_replay(
    script: &ReplayScript,
    fallback_gesture: GestureConfig,
) -> PlantfitResult<ReplayOutcome> {
    script.validate()?;
    let origin = Instant::now();
    let mut state = TransformState::default();
    let mut gesture = GestureController::new(script.gesture.unwrap_or(fallback_gesture));
    let mut slider = DepthSlider::new();
    let mut zoom_in = HoldButton::new();
    let mut zoom_out = HoldButton::new();

    for event in &script.events {
        let now = origin + Duration::from_millis(event.at_ms);
        // Repeat ticks that fell due before this event land first.
        for (button, sign) in [(&mut zoom_in, 1.0), (&mut zoom_out, -1.0)] {
            let ticks = button.poll(now);
            nudge_repeat(&mut state, sign, ticks);
        }

        match &event.action {
            ReplayAction::TouchStart { contacts } => gesture.touch_start(&points(contacts), &state),
            ReplayAction::TouchMove { contacts } => {
                gesture.touch_move(&points(contacts), &mut state);
            }
            ReplayAction::TouchEnd { contacts } => gesture.touch_end(&points(contacts), &state),
            ReplayAction::MouseDown { x, y } => gesture.mouse_down(Point::new(*x, *y), &state),
            ReplayAction::MouseMove { x, y } => {
                gesture.mouse_move(Point::new(*x, *y), &mut state);
            }
            ReplayAction::MouseUp => gesture.mouse_up(),
            ReplayAction::ZoomPress { button } => match button {
                ZoomButton::In => zoom_in.press(now),
                ZoomButton::Out => zoom_out.press(now),
            },
            ReplayAction::ZoomRelease { button } => {
                let (hold, sign) = match button {
                    ZoomButton::In => (&mut zoom_in, 1.0),
                    ZoomButton::Out => (&mut zoom_out, -1.0),
                };
                match hold.release(now) {
                    HoldRelease::Ignored => {}
                    HoldRelease::Tap => state.nudge_gesture_scale(sign * TAP_SCALE_STEP),
                    HoldRelease::Held { pending } => nudge_repeat(&mut state, sign, pending),
                }
            }
            ReplayAction::SliderBegin { x, track } => {
                slider.begin_drag(*x, Rect::new(track[0], track[1], track[2], track[3]), &mut state);
            }
            ReplayAction::SliderDrag { x } => {
                slider.drag_to(*x, &mut state);
            }
            ReplayAction::SliderEnd => slider.end_drag(),
            ReplayAction::Rotate => state.rotate_by(90.0),
            ReplayAction::Reset => {
                state.reset();
                gesture.cancel();
                slider.end_drag();
            }
        }
        debug!(at_ms = event.at_ms, action = ?event.action, "replay event applied");
    }

    Ok(ReplayOutcome {
        css: project(&state).css,
        transform: state,
        events_applied: script.events.len(),
    })
}

fn nudge_repeat(state: &mut TransformState, sign: f64, ticks: u32) {
    for _ in 0..ticks {
        state.nudge_gesture_scale(sign * REPEAT_SCALE_STEP);
    }
}

fn points(raw: &[[f64; 2]]) -> Vec<Point> {
    raw.iter().map(|[x, y]| Point::new(*x, *y)).collect()
}

#[cfg(test)]
#[path = "../tests/unit/replay/replay.rs"]
mod tests;
