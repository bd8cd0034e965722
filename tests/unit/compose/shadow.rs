use super::*;

fn alpha_at(layer: &[u8], canvas: Canvas, x: u32, y: u32) -> u8 {
    layer[((y * canvas.width + x) * 4 + 3) as usize]
}

fn square_overlay(canvas: Canvas, x0: u32, y0: u32, size: u32) -> Vec<u8> {
    let mut buf = vec![0u8; canvas.byte_len()];
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            let i = ((y * canvas.width + x) * 4) as usize;
            buf[i..i + 4].copy_from_slice(&[0, 200, 0, 255]);
        }
    }
    buf
}

#[test]
fn unblurred_shadow_is_offset_black_at_opacity() {
    let canvas = Canvas::new(10, 10).unwrap();
    let overlay = square_overlay(canvas, 2, 2, 3);
    let spec = ShadowSpec {
        opacity: 0.6,
        blur_px: 0.0,
        offset_x_px: 0.0,
        offset_y_px: 3.0,
    };
    let layer = shadow_layer(&overlay, canvas, spec).unwrap().unwrap();

    assert_eq!(alpha_at(&layer, canvas, 3, 3), 0);
    assert_eq!(alpha_at(&layer, canvas, 3, 6), 153);
    assert_eq!(alpha_at(&layer, canvas, 3, 7), 153);
    assert_eq!(alpha_at(&layer, canvas, 3, 8), 0);
    // Shadow color is black.
    let i = ((6 * canvas.width + 3) * 4) as usize;
    assert_eq!(&layer[i..i + 3], &[0, 0, 0]);
}

#[test]
fn blurred_shadow_spreads_past_the_shape() {
    let canvas = Canvas::new(24, 24).unwrap();
    let overlay = square_overlay(canvas, 8, 8, 6);
    let spec = ShadowSpec {
        opacity: 0.6,
        blur_px: 4.0,
        offset_x_px: 0.0,
        offset_y_px: 2.0,
    };
    let layer = shadow_layer(&overlay, canvas, spec).unwrap().unwrap();

    assert!(alpha_at(&layer, canvas, 10, 17) > 0);
    assert!(alpha_at(&layer, canvas, 6, 12) > 0);
    assert!(alpha_at(&layer, canvas, 10, 12) <= 153);
    assert_eq!(alpha_at(&layer, canvas, 0, 0), 0);
}

#[test]
fn empty_or_invisible_overlay_has_no_shadow() {
    let canvas = Canvas::new(4, 4).unwrap();
    let empty = vec![0u8; canvas.byte_len()];
    let spec = ShadowSpec {
        opacity: 0.6,
        blur_px: 30.0,
        offset_x_px: 0.0,
        offset_y_px: 16.0,
    };
    assert!(shadow_layer(&empty, canvas, spec).unwrap().is_none());

    let overlay = square_overlay(canvas, 0, 0, 2);
    let clear = ShadowSpec {
        opacity: 0.0,
        ..spec
    };
    assert!(shadow_layer(&overlay, canvas, clear).unwrap().is_none());
    // Offset pushes everything off-canvas.
    assert!(shadow_layer(&overlay, canvas, spec).unwrap().is_none());
    assert!(shadow_layer(&overlay[..8], canvas, spec).is_err());
}
