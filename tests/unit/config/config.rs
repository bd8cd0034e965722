use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = Config::from_json_str("{}").unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.notification_duration(), Duration::from_millis(1500));
    assert_eq!(cfg.compositor.shadow_opacity, 0.6);
    assert_eq!(cfg.compositor.watermark_max_width_px, 100.0);
    assert!(!cfg.gesture.multi_pointer_gesture_enabled);
    assert_eq!(cfg.storefront_url, "https://smartstore.naver.com/namu_dw");
    assert_eq!(cfg.instagram_url, DEFAULT_INSTAGRAM_URL);
}

#[test]
fn partial_nested_sections_keep_other_defaults() {
    let cfg = Config::from_json_str(
        r#"{"gesture":{"multi_pointer_gesture_enabled":true},"compositor":{"shadow_blur_px":12}}"#,
    )
    .unwrap();
    assert!(cfg.gesture.multi_pointer_gesture_enabled);
    assert_eq!(cfg.compositor.shadow_blur_px, 12.0);
    assert_eq!(cfg.compositor.shadow_offset_y_px, 16.0);
}

#[test]
fn out_of_range_compositor_values_are_rejected() {
    for bad in [
        r#"{"compositor":{"shadow_opacity":1.5}}"#,
        r#"{"compositor":{"shadow_opacity":-0.1}}"#,
        r#"{"compositor":{"shadow_blur_px":-1}}"#,
        r#"{"compositor":{"watermark_max_fraction":-0.25}}"#,
        r#"{"api_base_url":" "}"#,
    ] {
        let err = Config::from_json_str(bad).unwrap_err();
        assert!(matches!(err, PlantfitError::Validation(_)), "{bad}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        Config::from_json_str("{\"notification_ms\": \"soon\"}"),
        Err(PlantfitError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported() {
    assert!(Config::from_path("/no/such/plantfit.json").is_err());
}
