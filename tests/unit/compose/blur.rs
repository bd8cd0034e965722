use super::*;

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    assert_eq!(blur_plane(&src, 3, 2, 0.0).unwrap(), src);
    assert_eq!(radius_for_sigma(0.0), 0);
    assert_eq!(radius_for_sigma(f32::NAN), 0);
    assert_eq!(radius_for_sigma(2.0), 6);
}

#[test]
fn constant_plane_is_unchanged() {
    let src = vec![77u8; 6 * 5];
    assert_eq!(blur_plane(&src, 6, 5, 1.5).unwrap(), src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(4 * w + 4) as usize] = 255;

    let out = blur_plane(&src, w, h, 1.0).unwrap();
    let nonzero = out.iter().filter(|&&v| v != 0).count();
    assert!(nonzero > 1);
    assert!(out[(4 * w + 4) as usize] < 255);

    let sum: u32 = out.iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 32, "sum {sum}");
}

#[test]
fn length_mismatch_is_rejected() {
    assert!(blur_plane(&[0u8; 5], 2, 2, 1.0).is_err());
}
