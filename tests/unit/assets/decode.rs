use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn data_uri_round_trips_png_payload() {
    use base64::Engine as _;

    let buf = png_bytes(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]);
    let uri = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&buf)
    );
    let bytes = decode_data_uri(&uri).unwrap();
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width, img.height), (2, 1));

    assert!(decode_data_uri("plant/placeholder.png").is_err());
    assert!(decode_data_uri("data:text/plain,hello").is_err());
    assert!(decode_data_uri("data:image/png;base64").is_err());
}

#[test]
fn svg_parse_and_rasterize() {
    let ok = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"><rect width="4" height="2" fill="#000"/></svg>"##;
    assert!(looks_like_svg(ok));
    let tree = parse_svg(ok).unwrap();
    let img = rasterize_svg(&tree, 8, 4).unwrap();
    assert_eq!((img.width, img.height), (8, 4));
    assert_eq!(img.rgba8_premul[3], 255);

    assert!(parse_svg(br#"<svg"#).is_err());
    assert!(!looks_like_svg(&png_bytes(1, 1, vec![0, 0, 0, 0])));
}

#[test]
fn premultiply_and_back_is_stable_for_opaque_and_clear() {
    let mut px = vec![10u8, 20, 30, 255, 99, 99, 99, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![10, 20, 30, 255, 0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![10, 20, 30, 255, 0, 0, 0, 0]);

    let mut half = vec![64u8, 0, 128, 128];
    unpremultiply_rgba8_in_place(&mut half);
    assert_eq!(half, vec![128, 0, 255, 128]);
}

#[test]
fn from_premul_checks_length() {
    assert!(PreparedImage::from_premul(2, 2, vec![0; 15]).is_err());
    let img = PreparedImage::from_straight(1, 1, vec![200, 100, 0, 255]).unwrap();
    assert!(img.is_drawable());
    assert_eq!(img.rgba8_premul.as_slice(), &[200, 100, 0, 255]);
}
