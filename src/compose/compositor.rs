//! Flattens background, overlay (with drop shadow) and watermark into one exported PNG.
//!
//! Stages, in order:
//!
//! 1. Background fit: camera frames use cover, still photos use contain over black.
//! 2. Overlay: the stage layout is scaled into canvas pixels and the overlay is drawn about its
//!    center with the effective scale and rotation, above a synthesized shadow.
//! 3. Orientation: side rotations turn the finished frame a quarter.
//! 4. Watermark: stamped last so it sits upright on the final frame.
//! 5. Encode as PNG.
//!
//! Unready or undrawable inputs are skipped; only canvas setup and encoding can fail a capture.

use std::io::Cursor;

use tracing::{debug, warn};

use crate::assets::decode::{PreparedImage, unpremultiply_rgba8_in_place};
use crate::assets::watermark::Watermark;
use crate::compose::blend::over_in_place;
use crate::compose::fit::{FitMode, fit};
use crate::compose::orient::{ExportOrientation, RasterFrame, reorient};
use crate::compose::raster::LayerRasterizer;
use crate::compose::shadow::{ShadowSpec, shadow_layer};
use crate::foundation::core::{Affine, Canvas, Point, Rect, Size, StageSize, Vec2};
use crate::foundation::error::{PlantfitError, PlantfitResult};
use crate::transform::state::TransformState;

const LETTERBOX_PREMUL: [u8; 4] = [0, 0, 0, 255];

/// Tunables for shadow and watermark, in stage (CSS) pixels unless noted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorSettings {
    /// Shadow alpha multiplier in `[0, 1]`.
    pub shadow_opacity: f32,
    pub shadow_blur_px: f64,
    pub shadow_offset_y_px: f64,
    /// Watermark margin from the top-left corner, in final canvas pixels.
    pub watermark_margin_px: f64,
    pub watermark_max_width_px: f64,
    /// Watermark width cap as a fraction of the final canvas width.
    pub watermark_max_fraction: f64,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            shadow_opacity: 0.6,
            shadow_blur_px: 30.0,
            shadow_offset_y_px: 16.0,
            watermark_margin_px: 20.0,
            watermark_max_width_px: 100.0,
            watermark_max_fraction: 0.25,
        }
    }
}

impl CompositorSettings {
    pub fn validate(&self) -> PlantfitResult<()> {
        if !(0.0..=1.0).contains(&self.shadow_opacity) {
            return Err(PlantfitError::validation("shadow_opacity must be in [0, 1]"));
        }
        let lengths = [
            ("shadow_blur_px", self.shadow_blur_px),
            ("shadow_offset_y_px", self.shadow_offset_y_px),
            ("watermark_margin_px", self.watermark_margin_px),
            ("watermark_max_width_px", self.watermark_max_width_px),
            ("watermark_max_fraction", self.watermark_max_fraction),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v < 0.0 {
                return Err(PlantfitError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Background feeding the compositor. `None` means the source is not ready yet.
#[derive(Clone, Copy, Debug)]
pub enum Background<'a> {
    Camera(Option<&'a PreparedImage>),
    Still(Option<&'a PreparedImage>),
}

impl Background<'_> {
    pub fn fit_mode(&self) -> FitMode {
        match self {
            Background::Camera(_) => FitMode::Cover,
            Background::Still(_) => FitMode::Contain,
        }
    }
}

/// Untransformed overlay box on the stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayLayout {
    /// Natural center of the overlay, in stage pixels, before translation.
    pub anchor: Point,
    /// Layout box size, in stage pixels, before scale and rotation.
    pub size: Size,
}

impl OverlayLayout {
    pub fn centered(stage: StageSize, size: Size) -> Self {
        Self {
            anchor: stage.center(),
            size,
        }
    }
}

pub struct CaptureRequest<'a> {
    pub transform: &'a TransformState,
    pub background: Background<'a>,
    pub overlay: Option<&'a PreparedImage>,
    pub layout: OverlayLayout,
    pub watermark: Option<&'a Watermark>,
    pub stage: StageSize,
    /// Canvas pixels per stage pixel.
    pub pixel_ratio: f64,
    pub settings: &'a CompositorSettings,
}

/// How the exported image should be laid out in the result pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayHint {
    /// Fill the pane, letterboxed.
    FillContain,
    /// Full pane width, natural height.
    FullWidth,
}

#[derive(Clone, Debug)]
pub struct CaptureResult {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub orientation: ExportOrientation,
}

impl CaptureResult {
    pub fn display_hint(&self) -> DisplayHint {
        if self.orientation.is_side() {
            DisplayHint::FullWidth
        } else {
            DisplayHint::FillContain
        }
    }
}

pub struct CaptureCompositor {
    raster: LayerRasterizer,
}

impl Default for CaptureCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureCompositor {
    pub fn new() -> Self {
        Self {
            raster: LayerRasterizer::new(),
        }
    }

    /// Composite and encode. Never mutates the transform.
    #[tracing::instrument(level = "debug", skip_all, fields(stage_w = req.stage.width, stage_h = req.stage.height))]
    pub fn capture(&mut self, req: &CaptureRequest<'_>) -> PlantfitResult<CaptureResult> {
        let (frame, orientation) = self.composite(req)?;
        let png = encode_png(&frame)?;
        debug!(
            width = frame.canvas.width,
            height = frame.canvas.height,
            ?orientation,
            bytes = png.len(),
            "capture encoded"
        );
        Ok(CaptureResult {
            png,
            width: frame.canvas.width,
            height: frame.canvas.height,
            orientation,
        })
    }

    /// Produce the flattened frame without encoding it.
    pub fn composite(
        &mut self,
        req: &CaptureRequest<'_>,
    ) -> PlantfitResult<(RasterFrame, ExportOrientation)> {
        req.settings.validate()?;
        let canvas = Canvas::from_stage(req.stage, req.pixel_ratio)?;
        let mut frame = RasterFrame::transparent(canvas);

        if let Err(err) = self.draw_background(&mut frame, req.background) {
            warn!(error = %err, "background draw skipped");
        }
        if let Some(overlay) = req.overlay.filter(|img| img.is_drawable()) {
            if let Err(err) = self.draw_overlay(&mut frame, overlay, req) {
                warn!(error = %err, "overlay draw skipped");
            }
        }

        let orientation = ExportOrientation::classify(req.transform.rotation_degrees());
        let mut frame = reorient(frame, orientation)?;

        if let Some(watermark) = req.watermark {
            if let Err(err) = self.draw_watermark(&mut frame, watermark, req.settings) {
                warn!(error = %err, "watermark draw skipped");
            }
        }
        Ok((frame, orientation))
    }

    fn draw_background(
        &mut self,
        frame: &mut RasterFrame,
        background: Background<'_>,
    ) -> PlantfitResult<()> {
        let (Background::Camera(source) | Background::Still(source)) = background;
        let Some(source) = source.filter(|img| img.is_drawable()) else {
            debug!("background not ready");
            return Ok(());
        };
        let mode = background.fit_mode();
        let canvas = frame.canvas;
        let Some(placement) = fit(
            mode,
            f64::from(source.width),
            f64::from(source.height),
            f64::from(canvas.width),
            f64::from(canvas.height),
        ) else {
            return Ok(());
        };

        if mode == FitMode::Contain {
            *frame = RasterFrame::filled(canvas, LETTERBOX_PREMUL);
        }
        let layer = self
            .raster
            .image_layer(canvas, source, placement.to_affine(), placement.src)?;
        over_in_place(&mut frame.data, &layer, 1.0)
    }

    fn draw_overlay(
        &mut self,
        frame: &mut RasterFrame,
        overlay: &PreparedImage,
        req: &CaptureRequest<'_>,
    ) -> PlantfitResult<()> {
        let canvas = frame.canvas;
        let scale_x = f64::from(canvas.width) / req.stage.width;
        let scale_y = f64::from(canvas.height) / req.stage.height;

        let t = req.transform.translation();
        let center = Point::new(
            (req.layout.anchor.x + t.x) * scale_x,
            (req.layout.anchor.y + t.y) * scale_y,
        );
        let base_w = req.layout.size.width * scale_x;
        let base_h = req.layout.size.height * scale_y;
        if !(base_w > 0.0 && base_h > 0.0) {
            return Ok(());
        }

        let transform = overlay_affine(
            center,
            req.transform.rotation_degrees(),
            req.transform.effective_scale(),
            Size::new(base_w, base_h),
            overlay,
        );
        let src = Rect::new(0.0, 0.0, f64::from(overlay.width), f64::from(overlay.height));
        let layer = self.raster.image_layer(canvas, overlay, transform, src)?;

        let spec = ShadowSpec {
            opacity: req.settings.shadow_opacity,
            blur_px: req.settings.shadow_blur_px * scale_x,
            offset_x_px: 0.0,
            offset_y_px: req.settings.shadow_offset_y_px * scale_y,
        };
        if let Some(shadow) = shadow_layer(&layer, canvas, spec)? {
            over_in_place(&mut frame.data, &shadow, 1.0)?;
        }
        over_in_place(&mut frame.data, &layer, 1.0)
    }

    fn draw_watermark(
        &mut self,
        frame: &mut RasterFrame,
        watermark: &Watermark,
        settings: &CompositorSettings,
    ) -> PlantfitResult<()> {
        let Some((natural_w, natural_h)) = watermark.natural_size() else {
            return Ok(());
        };
        let canvas = frame.canvas;
        let (logo_w, logo_h) = watermark_size(canvas, natural_w, natural_h, settings);
        if logo_w <= 0.0 || logo_h <= 0.0 {
            return Ok(());
        }

        let pixels = watermark.raster_for(logo_w.ceil() as u32, logo_h.ceil() as u32)?;
        let margin = settings.watermark_margin_px;
        let transform = Affine::translate(Vec2::new(margin, margin))
            * Affine::scale_non_uniform(
                logo_w / f64::from(pixels.width),
                logo_h / f64::from(pixels.height),
            );
        let src = Rect::new(0.0, 0.0, f64::from(pixels.width), f64::from(pixels.height));
        let layer = self.raster.image_layer(canvas, &pixels, transform, src)?;
        over_in_place(&mut frame.data, &layer, 1.0)
    }
}

/// Image-space to canvas affine for the overlay: drawn as a `size` box centered on `center`,
/// scaled and rotated about that center.
pub fn overlay_affine(
    center: Point,
    rotation_degrees: f64,
    effective_scale: f64,
    size: Size,
    image: &PreparedImage,
) -> Affine {
    Affine::translate(center.to_vec2())
        * Affine::rotate(rotation_degrees.to_radians())
        * Affine::scale(effective_scale)
        * Affine::translate(Vec2::new(-size.width / 2.0, -size.height / 2.0))
        * Affine::scale_non_uniform(
            size.width / f64::from(image.width),
            size.height / f64::from(image.height),
        )
}

/// Watermark size on the final canvas: width capped by both limits, aspect locked.
pub fn watermark_size(
    canvas: Canvas,
    natural_w: f64,
    natural_h: f64,
    settings: &CompositorSettings,
) -> (f64, f64) {
    let w = settings
        .watermark_max_width_px
        .min(f64::from(canvas.width) * settings.watermark_max_fraction);
    (w, w * (natural_h / natural_w))
}

/// Lossless PNG of a premultiplied frame.
pub fn encode_png(frame: &RasterFrame) -> PlantfitResult<Vec<u8>> {
    let mut straight = frame.data.clone();
    unpremultiply_rgba8_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(frame.canvas.width, frame.canvas.height, straight)
        .ok_or_else(|| PlantfitError::encode("frame bytes do not match canvas"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PlantfitError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
