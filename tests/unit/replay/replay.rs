use super::*;

fn run(json: &str) -> ReplayOutcome {
    run_replay(&ReplayScript::from_json_str(json).unwrap(), GestureConfig::default()).unwrap()
}

#[test]
fn drag_then_rotate() {
    let out = run(r#"{"events":[
        {"at_ms":0,"type":"touch_start","contacts":[[10,10]]},
        {"at_ms":16,"type":"touch_move","contacts":[[40,30]]},
        {"at_ms":32,"type":"touch_end"},
        {"at_ms":40,"type":"rotate"}
    ]}"#);
    assert_eq!(out.transform.translation().x, 30.0);
    assert_eq!(out.transform.translation().y, 20.0);
    assert_eq!(out.transform.rotation_degrees(), 90.0);
    assert_eq!(
        out.css,
        "translate3d(calc(-50% + 30px), calc(-50% + 20px), 0) scale(1) rotate(90deg)"
    );
    assert_eq!(out.events_applied, 4);
}

#[test]
fn held_zoom_repeats_small_steps() {
    let out = run(r#"{"events":[
        {"at_ms":0,"type":"zoom_press","button":"in"},
        {"at_ms":500,"type":"zoom_release","button":"in"}
    ]}"#);
    assert!((out.transform.gesture_scale() - 1.08).abs() < 1e-9);
}

#[test]
fn quick_zoom_out_is_a_tap() {
    let out = run(r#"{"events":[
        {"at_ms":0,"type":"zoom_press","button":"out"},
        {"at_ms":50,"type":"zoom_release","button":"out"}
    ]}"#);
    assert!((out.transform.gesture_scale() - 0.85).abs() < 1e-9);
}

#[test]
fn pinch_respects_the_script_gesture_flag() {
    let pinch = r#"
        {"at_ms":0,"type":"touch_start","contacts":[[0,0],[10,0]]},
        {"at_ms":10,"type":"touch_move","contacts":[[0,0],[0,20]]}
    "#;
    let off = run(&format!(r#"{{"events":[{pinch}]}}"#));
    assert_eq!(off.transform.gesture_scale(), 1.0);
    assert_eq!(off.transform.rotation_degrees(), 0.0);

    let on = run(&format!(
        r#"{{"gesture":{{"multi_pointer_gesture_enabled":true}},"events":[{pinch}]}}"#
    ));
    assert!((on.transform.gesture_scale() - 2.0).abs() < 1e-9);
    assert!((on.transform.rotation_degrees() - 90.0).abs() < 1e-9);
}

#[test]
fn slider_and_reset() {
    let out = run(r#"{"events":[
        {"at_ms":0,"type":"slider_begin","x":50,"track":[0,0,100,10]},
        {"at_ms":5,"type":"slider_drag","x":100},
        {"at_ms":6,"type":"slider_end"}
    ]}"#);
    assert_eq!(out.transform.depth_ratio(), 1.0);
    assert!((out.transform.effective_scale() - 1.6).abs() < 1e-9);

    let reset = run(r#"{"events":[
        {"at_ms":0,"type":"mouse_down","x":0,"y":0},
        {"at_ms":1,"type":"mouse_move","x":9,"y":9},
        {"at_ms":2,"type":"mouse_up"},
        {"at_ms":3,"type":"reset"}
    ]}"#);
    assert_eq!(reset.transform, TransformState::default());
}

#[test]
fn out_of_order_events_are_rejected() {
    let err = ReplayScript::from_json_str(
        r#"{"events":[{"at_ms":5,"type":"rotate"},{"at_ms":1,"type":"rotate"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, PlantfitError::Validation(_)));
}

#[test]
fn unknown_event_type_is_a_serde_error() {
    assert!(matches!(
        ReplayScript::from_json_str(r#"{"events":[{"at_ms":0,"type":"teleport"}]}"#),
        Err(PlantfitError::Serde(_))
    ));
}
