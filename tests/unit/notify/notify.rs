use super::*;

#[test]
fn message_expires_after_duration() {
    let t0 = Instant::now();
    let mut n = Notifier::default();
    assert_eq!(n.current(t0), None);

    n.show("share failed", t0);
    assert_eq!(n.current(t0), Some("share failed"));
    assert_eq!(n.current(t0 + Duration::from_millis(1499)), Some("share failed"));
    assert_eq!(n.current(t0 + Duration::from_millis(1500)), None);
    assert_eq!(n.last().map(|x| x.message.as_str()), Some("share failed"));
}

#[test]
fn newer_message_replaces_and_restarts_the_timer() {
    let t0 = Instant::now();
    let mut n = Notifier::new(Duration::from_millis(100));
    n.show("first", t0);
    n.show("second", t0 + Duration::from_millis(80));

    assert_eq!(n.current(t0 + Duration::from_millis(90)), Some("second"));
    assert_eq!(n.current(t0 + Duration::from_millis(170)), Some("second"));
    assert_eq!(n.current(t0 + Duration::from_millis(180)), None);
}

#[test]
fn dismiss_clears_immediately() {
    let t0 = Instant::now();
    let mut n = Notifier::default();
    n.show("x", t0);
    n.dismiss();
    assert_eq!(n.current(t0), None);
    assert!(n.last().is_none());
}
