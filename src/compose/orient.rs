//! Export orientation: quarter-turned overlays turn the whole exported frame.

use crate::foundation::core::Canvas;
use crate::foundation::error::{PlantfitError, PlantfitResult};
use crate::foundation::math::normalize_degrees;

/// How close (in degrees) a rotation must be to 90/270 to count as a side rotation.
pub const SIDE_TOLERANCE_DEG: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportOrientation {
    Upright,
    /// Net rotation near 90 degrees; the frame is turned counter-clockwise.
    Side90,
    /// Net rotation near 270 degrees; the frame is turned clockwise.
    Side270,
}

impl ExportOrientation {
    pub fn classify(rotation_degrees: f64) -> Self {
        let r = normalize_degrees(rotation_degrees);
        if (r - 90.0).abs() < SIDE_TOLERANCE_DEG {
            Self::Side90
        } else if (r - 270.0).abs() < SIDE_TOLERANCE_DEG {
            Self::Side270
        } else {
            Self::Upright
        }
    }

    pub fn is_side(self) -> bool {
        !matches!(self, Self::Upright)
    }

    /// Canvas size after re-orientation.
    pub fn output_canvas(self, canvas: Canvas) -> Canvas {
        if self.is_side() {
            canvas.transposed()
        } else {
            canvas
        }
    }
}

/// A composited frame: premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterFrame {
    pub canvas: Canvas,
    pub data: Vec<u8>,
}

impl RasterFrame {
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.byte_len()],
        }
    }

    pub fn filled(canvas: Canvas, premul: [u8; 4]) -> Self {
        Self {
            canvas,
            data: premul.repeat(canvas.width as usize * canvas.height as usize),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Turn the whole frame a quarter for side orientations. Nothing is cropped or re-fitted.
pub fn reorient(frame: RasterFrame, orientation: ExportOrientation) -> PlantfitResult<RasterFrame> {
    if !orientation.is_side() {
        return Ok(frame);
    }
    let Canvas { width, height } = frame.canvas;
    let buf = image::RgbaImage::from_raw(width, height, frame.data)
        .ok_or_else(|| PlantfitError::validation("frame bytes do not match canvas"))?;
    let turned = match orientation {
        ExportOrientation::Side90 => image::imageops::rotate270(&buf),
        _ => image::imageops::rotate90(&buf),
    };
    Ok(RasterFrame {
        canvas: frame.canvas.transposed(),
        data: turned.into_raw(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/orient.rs"]
mod tests;
