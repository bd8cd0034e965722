use super::*;
use crate::transform::state::TransformState;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn short_press_is_a_tap() {
    let t0 = Instant::now();
    let mut b = HoldButton::new();
    b.press(t0);
    assert_eq!(b.poll(t0 + ms(100)), 0);
    assert_eq!(b.release(t0 + ms(150)), HoldRelease::Tap);
    assert!(!b.is_pressed());
}

#[test]
fn hold_for_500ms_repeats_small_steps_and_skips_tap() {
    let t0 = Instant::now();
    let mut b = HoldButton::new();
    let mut state = TransformState::new();

    b.press(t0);
    let mut ticks = 0;
    for at in (0..=500).step_by(10) {
        let fresh = b.poll(t0 + ms(at));
        for _ in 0..fresh {
            state.nudge_gesture_scale(REPEAT_SCALE_STEP);
        }
        ticks += fresh;
    }
    // 220, 300, 380, 460
    assert_eq!(ticks, 4);

    match b.release(t0 + ms(500)) {
        HoldRelease::Held { pending } => assert_eq!(pending, 0),
        other => panic!("expected held release, got {other:?}"),
    }
    assert!((state.gesture_scale() - 1.08).abs() < 1e-9);
}

#[test]
fn release_reports_ticks_not_yet_polled() {
    let t0 = Instant::now();
    let mut b = HoldButton::new();
    b.press(t0);
    assert_eq!(b.release(t0 + ms(381)), HoldRelease::Held { pending: 3 });
}

#[test]
fn release_without_press_is_ignored() {
    let mut b = HoldButton::new();
    assert_eq!(b.release(Instant::now()), HoldRelease::Ignored);
    assert_eq!(b.poll(Instant::now()), 0);
}

#[test]
fn repress_restarts_the_timers() {
    let t0 = Instant::now();
    let mut b = HoldButton::new();
    b.press(t0);
    assert_eq!(b.poll(t0 + ms(300)), 2);
    b.press(t0 + ms(300));
    assert_eq!(b.poll(t0 + ms(400)), 0);
    assert_eq!(b.release(t0 + ms(450)), HoldRelease::Tap);
}

#[test]
fn cancel_forgets_the_press_without_a_result() {
    let t0 = Instant::now();
    let mut b = HoldButton::new();
    b.press(t0);
    assert_eq!(b.poll(t0 + ms(300)), 2);
    b.cancel();
    assert!(!b.is_pressed());
    assert_eq!(b.poll(t0 + ms(2000)), 0);
    assert_eq!(b.release(t0 + ms(2000)), HoldRelease::Ignored);
}
