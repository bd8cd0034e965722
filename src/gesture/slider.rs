use crate::foundation::core::Rect;
use crate::transform::state::TransformState;

/// Horizontal inset of the thumb inside the track, in CSS pixels.
pub const THUMB_INSET_PX: f64 = 8.0;

/// Depth slider drag tracking. The track bounds are captured when a drag begins.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthSlider {
    track: Option<Rect>,
}

impl DepthSlider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.track.is_some()
    }

    pub fn begin_drag(&mut self, x: f64, track: Rect, state: &mut TransformState) {
        self.track = Some(track);
        self.drag_to(x, state);
    }

    /// Returns true when the pointer moved the slider.
    pub fn drag_to(&mut self, x: f64, state: &mut TransformState) -> bool {
        let Some(track) = self.track else {
            return false;
        };
        state.set_depth_ratio(ratio_in_track(x, track));
        true
    }

    pub fn end_drag(&mut self) {
        self.track = None;
    }
}

/// Linear position of `x` across the track, clamped to `[0, 1]`.
pub fn ratio_in_track(x: f64, track: Rect) -> f64 {
    let width = track.width();
    if width <= 0.0 || !width.is_finite() {
        return 0.0;
    }
    ((x - track.x0) / width).clamp(0.0, 1.0)
}

/// Left offset of the thumb inside the track for a given ratio.
pub fn thumb_left(track_width: f64, thumb_width: f64, ratio: f64) -> f64 {
    THUMB_INSET_PX + (track_width - thumb_width - 2.0 * THUMB_INSET_PX) * ratio.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/slider.rs"]
mod tests;
