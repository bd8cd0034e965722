//! Drop shadow synthesized from an overlay layer's coverage.

use crate::compose::blur::{blur_plane, radius_for_sigma};
use crate::foundation::core::Canvas;
use crate::foundation::error::{PlantfitError, PlantfitResult};
use crate::foundation::math::mul_div255_u8;

/// Shadow parameters in output canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSpec {
    /// Alpha multiplier applied to the overlay's coverage.
    pub opacity: f32,
    /// Blur radius as specified for a canvas shadow; the gaussian sigma is half of it.
    pub blur_px: f64,
    pub offset_x_px: f64,
    pub offset_y_px: f64,
}

impl ShadowSpec {
    pub fn sigma(&self) -> f32 {
        (self.blur_px / 2.0).max(0.0) as f32
    }
}

/// Build a black shadow layer for `overlay` (premultiplied RGBA8, canvas sized).
///
/// Returns `None` when the shadow would be fully transparent.
pub fn shadow_layer(
    overlay: &[u8],
    canvas: Canvas,
    spec: ShadowSpec,
) -> PlantfitResult<Option<Vec<u8>>> {
    if overlay.len() != canvas.byte_len() {
        return Err(PlantfitError::validation(
            "shadow_layer expects an overlay matching the canvas",
        ));
    }
    let op = ((spec.opacity.clamp(0.0, 1.0) * 255.0).round()) as u16;
    if op == 0 {
        return Ok(None);
    }

    let (w, h) = (canvas.width as i64, canvas.height as i64);
    let (dx, dy) = (spec.offset_x_px.round() as i64, spec.offset_y_px.round() as i64);
    let mut plane = vec![0u8; (w * h) as usize];
    let mut bbox: Option<(i64, i64, i64, i64)> = None;

    for (i, px) in overlay.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = (i as i64 % w + dx, i as i64 / w + dy);
        if x < 0 || y < 0 || x >= w || y >= h {
            continue;
        }
        let a = mul_div255_u8(u16::from(px[3]), op);
        if a == 0 {
            continue;
        }
        plane[(y * w + x) as usize] = a;
        bbox = Some(match bbox {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let Some((x0, y0, x1, y1)) = bbox else {
        return Ok(None);
    };

    // Blur only the occupied region plus the kernel reach.
    let sigma = spec.sigma();
    let reach = i64::from(radius_for_sigma(sigma));
    let (bx0, by0) = ((x0 - reach).max(0), (y0 - reach).max(0));
    let (bx1, by1) = ((x1 + reach).min(w - 1), (y1 + reach).min(h - 1));
    let (bw, bh) = ((bx1 - bx0 + 1) as usize, (by1 - by0 + 1) as usize);

    let mut region = Vec::with_capacity(bw * bh);
    for y in by0..=by1 {
        let row = (y * w) as usize;
        region.extend_from_slice(&plane[row + bx0 as usize..=row + bx1 as usize]);
    }
    let blurred = blur_plane(&region, bw as u32, bh as u32, sigma)?;

    let mut layer = vec![0u8; canvas.byte_len()];
    for (ry, line) in blurred.chunks_exact(bw).enumerate() {
        let y = by0 as usize + ry;
        for (rx, &a) in line.iter().enumerate() {
            let x = bx0 as usize + rx;
            layer[(y * w as usize + x) * 4 + 3] = a;
        }
    }
    Ok(Some(layer))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/shadow.rs"]
mod tests;
