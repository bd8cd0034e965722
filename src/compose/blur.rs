//! Gaussian blur over a single 8-bit coverage plane.
//!
//! Drop shadows are a solid color, so only their coverage needs blurring; the color is applied
//! when the plane is expanded back to premultiplied RGBA.

use crate::foundation::error::{PlantfitError, PlantfitResult};

/// Kernel radius that covers three standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Separable gaussian blur of a `width` x `height` coverage plane with clamped edges.
pub fn blur_plane(src: &[u8], width: u32, height: u32, sigma: f32) -> PlantfitResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| PlantfitError::validation("blur plane size overflow"))?;
    if src.len() != expected_len {
        return Err(PlantfitError::validation(
            "blur_plane expects src matching width*height",
        ));
    }
    let radius = radius_for_sigma(sigma);
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let (w, h) = (width as usize, height as usize);
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        convolve_line(&kernel, w, |i| row[i], |i, v| tmp[y * w + i] = v);
    }
    for x in 0..w {
        convolve_line(&kernel, h, |i| tmp[i * w + x], |i, v| out[i * w + x] = v);
    }
    Ok(out)
}

fn convolve_line(
    kernel: &[u32],
    len: usize,
    read: impl Fn(usize) -> u8,
    mut write: impl FnMut(usize, u8),
) {
    let radius = (kernel.len() / 2) as isize;
    let last = len as isize - 1;
    for i in 0..len as isize {
        let mut acc = 0u64;
        for (ki, &kw) in kernel.iter().enumerate() {
            let s = (i + ki as isize - radius).clamp(0, last);
            acc += u64::from(kw) * u64::from(read(s as usize));
        }
        write(i as usize, q16_to_u8(acc));
    }
}

/// Normalized Q16 weights; the center tap absorbs rounding so the kernel sums to exactly 1.0.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> PlantfitResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(PlantfitError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(PlantfitError::validation("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/blur.rs"]
mod tests;
