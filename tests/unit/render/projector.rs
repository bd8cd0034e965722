use super::*;
use crate::foundation::core::{Point, Vec2};

#[derive(Default)]
struct RecordingElement {
    writes: Vec<String>,
}

impl OverlayElement for RecordingElement {
    fn apply_transform(&mut self, css: &str) {
        self.writes.push(css.to_owned());
    }
}

#[test]
fn default_state_projects_centered_identity() {
    let p = project(&TransformState::new());
    assert_eq!(
        p.css,
        "translate3d(calc(-50% + 0px), calc(-50% + 0px), 0) scale(1) rotate(0deg)"
    );
    assert_eq!(p.affine, Affine::IDENTITY);
}

#[test]
fn css_orders_translate_scale_rotate() {
    let mut s = TransformState::new();
    s.set_translation(12.5, -4.0);
    s.set_gesture_scale(2.0);
    s.set_rotation(90.0);
    let p = project(&s);
    assert_eq!(
        p.css,
        "translate3d(calc(-50% + 12.5px), calc(-50% + -4px), 0) scale(2) rotate(90deg)"
    );

    // A point one unit right of the overlay center lands below it, twice as far, then shifted.
    let moved = p.affine * Point::new(1.0, 0.0);
    assert!((moved.x - 12.5).abs() < 1e-9);
    assert!((moved.y - (-4.0 + 2.0)).abs() < 1e-9);
    assert_eq!(p.affine * Point::ZERO, Point::ZERO + Vec2::new(12.5, -4.0));
}

#[test]
fn projector_writes_only_on_change() {
    let mut s = TransformState::new();
    let mut el = RecordingElement::default();
    let mut proj = RenderProjector::new();

    assert!(proj.apply(&s, &mut el));
    assert!(!proj.apply(&s, &mut el));
    s.set_depth_ratio(1.0);
    assert!(proj.apply(&s, &mut el));
    assert_eq!(el.writes.len(), 2);
    assert_eq!(proj.last_css(), el.writes.last().map(String::as_str));

    proj.invalidate();
    assert!(proj.apply(&s, &mut el));
    assert_eq!(el.writes.len(), 3);
}
