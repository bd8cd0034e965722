use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn normalize_degrees_wraps_into_range() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(90.0), 90.0);
    assert_eq!(normalize_degrees(-270.0), 90.0);
    assert_eq!(normalize_degrees(450.0), 90.0);
    assert_eq!(normalize_degrees(720.0), 0.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    let tiny = normalize_degrees(-1e-20);
    assert!((0.0..360.0).contains(&tiny));
}
