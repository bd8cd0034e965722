use crate::foundation::error::{PlantfitError, PlantfitResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Largest canvas side accepted by the rasterizer.
pub const MAX_CANVAS_DIM: u32 = 16_384;

/// Pixel surface size of a raster canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> PlantfitResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlantfitError::validation("canvas width/height must be > 0"));
        }
        if width > MAX_CANVAS_DIM || height > MAX_CANVAS_DIM {
            return Err(PlantfitError::validation(format!(
                "canvas too large: {width}x{height} (max {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Backing canvas for a stage laid out in CSS pixels.
    pub fn from_stage(stage: StageSize, pixel_ratio: f64) -> PlantfitResult<Self> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(PlantfitError::validation("pixel ratio must be finite and > 0"));
        }
        let w = (stage.width * pixel_ratio).round();
        let h = (stage.height * pixel_ratio).round();
        if !w.is_finite() || !h.is_finite() {
            return Err(PlantfitError::validation("stage size must be finite"));
        }
        Self::new(w.max(1.0) as u32, h.max(1.0) as u32)
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Layout size of the placement stage, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageSize {
    pub width: f64,
    pub height: f64,
}

impl StageSize {
    pub fn new(width: f64, height: f64) -> PlantfitResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(PlantfitError::validation(
                "stage width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
