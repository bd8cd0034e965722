//! Projects [`TransformState`] onto the on-screen overlay element.

use crate::foundation::core::Affine;
use crate::transform::state::TransformState;

/// The single overlay element whose visual transform the projector owns.
pub trait OverlayElement {
    fn apply_transform(&mut self, css: &str);
}

/// Derived presentation of the transform.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayProjection {
    /// CSS `transform` value: translate, then scale, then rotate.
    pub css: String,
    /// Same transform about the overlay's own center, in stage pixels.
    pub affine: Affine,
}

pub fn project(state: &TransformState) -> OverlayProjection {
    let t = state.translation();
    let scale = state.effective_scale();
    let rotation = state.rotation_degrees();
    let css = format!(
        "translate3d(calc(-50% + {}px), calc(-50% + {}px), 0) scale({}) rotate({}deg)",
        t.x, t.y, scale, rotation
    );
    let affine = Affine::translate(t) * Affine::scale(scale) * Affine::rotate(rotation.to_radians());
    OverlayProjection { css, affine }
}

/// Writes the projection to an [`OverlayElement`] on every state change.
#[derive(Debug, Default)]
pub struct RenderProjector {
    last_css: Option<String>,
}

impl RenderProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_css(&self) -> Option<&str> {
        self.last_css.as_deref()
    }

    /// Recompute and apply. The element is only written when the string changed.
    pub fn apply(&mut self, state: &TransformState, element: &mut dyn OverlayElement) -> bool {
        let projection = project(state);
        if self.last_css.as_deref() == Some(projection.css.as_str()) {
            return false;
        }
        element.apply_transform(&projection.css);
        self.last_css = Some(projection.css);
        true
    }

    /// Forget the cached string so the next `apply` writes unconditionally.
    pub fn invalidate(&mut self) {
        self.last_css = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/projector.rs"]
mod tests;
