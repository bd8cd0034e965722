use super::*;

#[test]
fn depth_scale_matches_formula_across_range() {
    for i in 0..=100 {
        let r = f64::from(i) / 100.0;
        let expected = (1.0 + (r - 0.5) * 1.2).clamp(0.4, 1.6);
        assert!((depth_scale_for(r) - expected).abs() < 1e-12, "ratio {r}");
    }
    assert_eq!(depth_scale_for(0.5), 1.0);
    assert!((depth_scale_for(0.0) - 0.4).abs() < 1e-12);
    assert!((depth_scale_for(1.0) - 1.6).abs() < 1e-12);
}

#[test]
fn depth_ratio_is_clamped_and_drives_depth_scale() {
    let mut t = TransformState::new();
    t.set_depth_ratio(3.0);
    assert_eq!(t.depth_ratio(), 1.0);
    assert_eq!(t.depth_scale(), depth_scale_for(1.0));

    t.set_depth_ratio(-0.25);
    assert_eq!(t.depth_ratio(), 0.0);
    assert_eq!(t.depth_scale(), depth_scale_for(0.0));

    t.set_depth_ratio(f64::NAN);
    assert_eq!(t.depth_ratio(), 0.0);
    assert_eq!(t.depth_scale(), depth_scale_for(0.0));
}

#[test]
fn gesture_scale_never_leaves_bounds() {
    let mut t = TransformState::new();
    for s in [100.0, -5.0, 0.0, 0.19, 4.01, 1e300, f64::INFINITY, 2.5] {
        t.set_gesture_scale(s);
        assert!((GESTURE_SCALE_MIN..=GESTURE_SCALE_MAX).contains(&t.gesture_scale()));
    }
    assert_eq!(t.gesture_scale(), 2.5);

    t.set_gesture_scale(9.0);
    t.set_gesture_scale(9.0);
    assert_eq!(t.gesture_scale(), GESTURE_SCALE_MAX);

    for _ in 0..100 {
        t.nudge_gesture_scale(-0.15);
    }
    assert_eq!(t.gesture_scale(), GESTURE_SCALE_MIN);
}

#[test]
fn effective_scale_multiplies_both_factors() {
    let mut t = TransformState::new();
    t.set_gesture_scale(2.0);
    t.set_depth_ratio(1.0);
    assert!((t.effective_scale() - 3.2).abs() < 1e-12);
}

#[test]
fn drag_then_reset_restores_defaults() {
    let mut t = TransformState::new();
    t.set_translation(12.0, -40.0);
    t.set_translation(-3.5, 7.25);
    t.rotate_by(90.0);
    t.rotate_by(90.0);
    t.set_gesture_scale(3.0);
    t.set_depth_ratio(0.9);

    t.reset();
    assert_eq!(t.translation(), Vec2::ZERO);
    assert_eq!(t.rotation_degrees(), 0.0);
    assert_eq!(t.gesture_scale(), 1.0);
    assert_eq!(t.depth_ratio(), 0.5);
    assert_eq!(t.depth_scale(), 1.0);
}

#[test]
fn rotation_is_unbounded_and_accumulates() {
    let mut t = TransformState::new();
    for _ in 0..5 {
        t.rotate_by(90.0);
    }
    assert_eq!(t.rotation_degrees(), 450.0);
    t.set_rotation(-270.0);
    assert_eq!(t.rotation_degrees(), -270.0);
    t.set_rotation(f64::NAN);
    assert_eq!(t.rotation_degrees(), -270.0);
}
