//! Object-fit style placement of a background source into the output frame.

use crate::foundation::core::{Affine, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Fill the frame, cropping the overflowing axis around the center.
    Cover,
    /// Show the whole source, letterboxing the leftover axis.
    Contain,
}

/// Which part of the source lands where in the destination frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitPlacement {
    /// Source region in source pixels.
    pub src: Rect,
    /// Destination region in frame pixels.
    pub dst: Rect,
}

impl FitPlacement {
    /// Affine mapping source pixel space onto the frame so that `src` covers `dst`.
    pub fn to_affine(&self) -> Affine {
        let sx = self.dst.width() / self.src.width();
        let sy = self.dst.height() / self.src.height();
        Affine::new([
            sx,
            0.0,
            0.0,
            sy,
            self.dst.x0 - self.src.x0 * sx,
            self.dst.y0 - self.src.y0 * sy,
        ])
    }
}

/// Compute the placement, or `None` when either side has no area.
pub fn fit(mode: FitMode, src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> Option<FitPlacement> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !(usable(src_w) && usable(src_h) && usable(dst_w) && usable(dst_h)) {
        return None;
    }
    let src_ratio = src_w / src_h;
    let dst_ratio = dst_w / dst_h;

    let placement = match mode {
        FitMode::Cover => {
            let src = if src_ratio > dst_ratio {
                let w = src_h * dst_ratio;
                Rect::new((src_w - w) / 2.0, 0.0, (src_w + w) / 2.0, src_h)
            } else {
                let h = src_w / dst_ratio;
                Rect::new(0.0, (src_h - h) / 2.0, src_w, (src_h + h) / 2.0)
            };
            FitPlacement {
                src,
                dst: Rect::new(0.0, 0.0, dst_w, dst_h),
            }
        }
        FitMode::Contain => {
            let dst = if src_ratio > dst_ratio {
                let h = dst_w / src_ratio;
                Rect::new(0.0, (dst_h - h) / 2.0, dst_w, (dst_h + h) / 2.0)
            } else {
                let w = dst_h * src_ratio;
                Rect::new((dst_w - w) / 2.0, 0.0, (dst_w + w) / 2.0, dst_h)
            };
            FitPlacement {
                src: Rect::new(0.0, 0.0, src_w, src_h),
                dst,
            }
        }
    };
    Some(placement)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fit.rs"]
mod tests;
