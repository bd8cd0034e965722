use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image, looks_like_svg, parse_svg, rasterize_svg};
use crate::foundation::error::{PlantfitError, PlantfitResult};

/// Logo stamped onto exported captures.
#[derive(Clone, Debug)]
pub enum Watermark {
    Raster(PreparedImage),
    Svg(Arc<usvg::Tree>),
}

impl Watermark {
    /// Decode a PNG/JPEG/... or SVG logo.
    pub fn from_bytes(bytes: &[u8]) -> PlantfitResult<Self> {
        if looks_like_svg(bytes) {
            Ok(Self::Svg(parse_svg(bytes)?))
        } else {
            Ok(Self::Raster(decode_image(bytes)?))
        }
    }

    /// Natural size in pixels; `None` when the logo has no usable extent yet.
    pub fn natural_size(&self) -> Option<(f64, f64)> {
        let (w, h) = match self {
            Watermark::Raster(img) => (f64::from(img.width), f64::from(img.height)),
            Watermark::Svg(tree) => (
                f64::from(tree.size().width()),
                f64::from(tree.size().height()),
            ),
        };
        (w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()).then_some((w, h))
    }

    /// Pixels to draw at the requested size. Raster logos are returned as-is and scaled by the
    /// compositor; SVG logos are rasterized at the target size to stay crisp.
    pub fn raster_for(&self, width: u32, height: u32) -> PlantfitResult<PreparedImage> {
        match self {
            Watermark::Raster(img) => Ok(img.clone()),
            Watermark::Svg(tree) => {
                if width == 0 || height == 0 {
                    return Err(PlantfitError::validation("watermark raster size must be > 0"));
                }
                rasterize_svg(tree, width, height)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/watermark.rs"]
mod tests;
