//! Affine image layers rasterized with `vello_cpu`.
//!
//! Each draw produces a full-canvas transparent layer; callers merge layers with source-over so
//! the frame being built is never handed to the rasterizer.

use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Canvas, Rect};
use crate::foundation::error::{PlantfitError, PlantfitResult};

pub(crate) struct LayerRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl LayerRasterizer {
    pub(crate) fn new() -> Self {
        Self { ctx: None }
    }

    /// Draw the `src` region of `image` (in image pixels) through `transform` onto a transparent
    /// canvas-sized layer. Returns premultiplied RGBA8.
    pub(crate) fn image_layer(
        &mut self,
        canvas: Canvas,
        image: &PreparedImage,
        transform: Affine,
        src: Rect,
    ) -> PlantfitResult<Vec<u8>> {
        let (width, height) = canvas_u16(canvas)?;
        let paint = image_paint(image)?;
        let mut pixmap = vello_cpu::Pixmap::new(width, height);

        self.with_ctx_mut(width, height, |ctx| {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(src.x0, src.y0, src.x1, src.y1));
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
        });

        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn with_ctx_mut(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext),
    ) {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        f(&mut ctx);
        self.ctx = Some(ctx);
    }
}

fn canvas_u16(canvas: Canvas) -> PlantfitResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PlantfitError::validation("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PlantfitError::validation("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn image_paint(image: &PreparedImage) -> PlantfitResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PlantfitResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PlantfitError::media("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PlantfitError::media("image height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(PlantfitError::media("image byte len mismatch"));
    }
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/raster.rs"]
mod tests;
