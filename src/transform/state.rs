//! Overlay transform state: translation, rotation and the two independent scale factors.

use crate::foundation::core::Vec2;

/// Lower bound of the gesture-driven scale.
pub const GESTURE_SCALE_MIN: f64 = 0.2;
/// Upper bound of the gesture-driven scale.
pub const GESTURE_SCALE_MAX: f64 = 4.0;
/// Lower bound of the slider-driven depth scale.
pub const DEPTH_SCALE_MIN: f64 = 0.4;
/// Upper bound of the slider-driven depth scale.
pub const DEPTH_SCALE_MAX: f64 = 1.6;
/// Depth scale swing at either end of the slider.
pub const DEPTH_SCALE_SPREAD: f64 = 0.6;
/// Slider position that maps to a depth scale of exactly 1.
pub const DEPTH_RATIO_NEUTRAL: f64 = 0.5;

/// Map a depth slider ratio to its scale factor.
///
/// `clamp(1 + (ratio - 0.5) * 2 * 0.6, 0.4, 1.6)`; a ratio of `0.5` yields exactly `1.0`.
pub fn depth_scale_for(ratio: f64) -> f64 {
    let offset = (ratio - DEPTH_RATIO_NEUTRAL) * 2.0;
    (1.0 + offset * DEPTH_SCALE_SPREAD).clamp(DEPTH_SCALE_MIN, DEPTH_SCALE_MAX)
}

/// Current placement of the overlay on the stage.
///
/// All setters clamp instead of rejecting. Non-finite inputs are ignored so the state never holds
/// NaN or infinities.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransformState {
    translation: Vec2,
    rotation_degrees: f64,
    gesture_scale: f64,
    depth_ratio: f64,
    depth_scale: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation_degrees: 0.0,
            gesture_scale: 1.0,
            depth_ratio: DEPTH_RATIO_NEUTRAL,
            depth_scale: 1.0,
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset in stage pixels from the overlay's natural centered position.
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn gesture_scale(&self) -> f64 {
        self.gesture_scale
    }

    pub fn depth_ratio(&self) -> f64 {
        self.depth_ratio
    }

    pub fn depth_scale(&self) -> f64 {
        self.depth_scale
    }

    /// `gesture_scale * depth_scale`, recomputed on every read.
    pub fn effective_scale(&self) -> f64 {
        self.gesture_scale * self.depth_scale
    }

    pub fn set_translation(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.translation = Vec2::new(dx, dy);
        }
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.rotation_degrees = degrees;
        }
    }

    pub fn rotate_by(&mut self, delta_degrees: f64) {
        self.set_rotation(self.rotation_degrees + delta_degrees);
    }

    pub fn set_gesture_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.gesture_scale = scale.clamp(GESTURE_SCALE_MIN, GESTURE_SCALE_MAX);
        }
    }

    pub fn nudge_gesture_scale(&mut self, delta: f64) {
        self.set_gesture_scale(self.gesture_scale + delta);
    }

    pub fn set_depth_ratio(&mut self, ratio: f64) {
        if ratio.is_finite() {
            self.depth_ratio = ratio.clamp(0.0, 1.0);
            self.depth_scale = depth_scale_for(self.depth_ratio);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/state.rs"]
mod tests;
