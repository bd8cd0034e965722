use super::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage::from_premul(w, h, rgba.repeat((w * h) as usize)).unwrap()
}

fn near(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (i16::from(*x) - i16::from(*y)).abs() <= 2)
}

fn px(buf: &[u8], canvas: Canvas, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * canvas.width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn scaled_image_covers_its_destination_only() {
    let canvas = Canvas::new(6, 6).unwrap();
    let img = solid(2, 2, [255, 0, 0, 255]);
    let mut r = LayerRasterizer::new();

    let layer = r
        .image_layer(canvas, &img, Affine::scale(2.0), Rect::new(0.0, 0.0, 2.0, 2.0))
        .unwrap();

    assert_eq!(layer.len(), canvas.byte_len());
    assert!(near(px(&layer, canvas, 1, 1), [255, 0, 0, 255]));
    assert!(near(px(&layer, canvas, 3, 3), [255, 0, 0, 255]));
    assert_eq!(px(&layer, canvas, 5, 5), [0, 0, 0, 0]);
    assert_eq!(px(&layer, canvas, 0, 5), [0, 0, 0, 0]);
}

#[test]
fn context_is_reused_across_same_sized_layers() {
    let canvas = Canvas::new(4, 4).unwrap();
    let img = solid(1, 1, [0, 0, 255, 255]);
    let mut r = LayerRasterizer::new();

    let a = r
        .image_layer(canvas, &img, Affine::scale(4.0), Rect::new(0.0, 0.0, 1.0, 1.0))
        .unwrap();
    // A second, smaller draw must not inherit the first one's coverage.
    let b = r
        .image_layer(canvas, &img, Affine::IDENTITY, Rect::new(0.0, 0.0, 1.0, 1.0))
        .unwrap();
    assert!(near(px(&a, canvas, 3, 3), [0, 0, 255, 255]));
    assert!(near(px(&b, canvas, 0, 0), [0, 0, 255, 255]));
    assert_eq!(px(&b, canvas, 3, 3), [0, 0, 0, 0]);
}

#[test]
fn mismatched_image_bytes_are_rejected() {
    assert!(pixmap_from_premul_bytes(&[0u8; 7], 1, 2).is_err());
}
