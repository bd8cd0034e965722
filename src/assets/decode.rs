use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{PlantfitError, PlantfitResult};

/// A decoded raster, premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap already-premultiplied pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PlantfitResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| PlantfitError::validation("image size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(PlantfitError::validation(format!(
                "image byte len {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Build from straight-alpha RGBA8 pixels.
    pub fn from_straight(width: u32, height: u32, mut rgba8: Vec<u8>) -> PlantfitResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul(width, height, rgba8)
    }

    /// A zero-sized image has nothing to draw.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PlantfitResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Extract the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> PlantfitResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| PlantfitError::media("not a data: uri"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PlantfitError::media("data: uri has no payload separator"))?;
    if !meta.ends_with(";base64") {
        return Err(PlantfitError::media(format!(
            "unsupported data: uri encoding '{meta}'"
        )));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .context("decode base64 payload")?;
    Ok(bytes)
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> PlantfitResult<Arc<usvg::Tree>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(Arc::new(tree))
}

/// Rasterize an SVG tree stretched to `width` x `height`.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> PlantfitResult<PreparedImage> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PlantfitError::media("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    // tiny-skia pixmaps are premultiplied already.
    PreparedImage::from_premul(width, height, pixmap.data().to_vec())
}

/// Heuristic sniff for SVG documents among image bytes.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u16) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
