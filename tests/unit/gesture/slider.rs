use super::*;

fn track() -> Rect {
    Rect::new(100.0, 500.0, 300.0, 520.0)
}

#[test]
fn drag_maps_pointer_linearly_into_depth_ratio() {
    let mut state = TransformState::new();
    let mut s = DepthSlider::new();

    s.begin_drag(150.0, track(), &mut state);
    assert!(s.is_dragging());
    assert!((state.depth_ratio() - 0.25).abs() < 1e-12);

    assert!(s.drag_to(300.0, &mut state));
    assert_eq!(state.depth_ratio(), 1.0);
    assert!((state.depth_scale() - 1.6).abs() < 1e-12);

    s.drag_to(20.0, &mut state);
    assert_eq!(state.depth_ratio(), 0.0);

    s.end_drag();
    assert!(!s.drag_to(200.0, &mut state));
    assert_eq!(state.depth_ratio(), 0.0);
}

#[test]
fn degenerate_track_maps_to_zero() {
    let flat = Rect::new(10.0, 0.0, 10.0, 5.0);
    assert_eq!(ratio_in_track(50.0, flat), 0.0);
}

#[test]
fn thumb_position_spans_inset_track() {
    assert_eq!(thumb_left(200.0, 24.0, 0.0), 8.0);
    assert_eq!(thumb_left(200.0, 24.0, 1.0), 168.0);
    assert_eq!(thumb_left(200.0, 24.0, 0.5), 88.0);
}
