use std::collections::HashMap;
use std::sync::Arc;

use kurbo::StrokeOpts;

use crate::assets::color::Color;
use crate::assets::decode::DecodedImage;
use crate::assets::fonts::{FontBook, FontSpec, FontVariant, ShapedText, TextEngine, TextMeasurer};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect};
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::render::gradient::Fill;
use crate::render::pixels;
use crate::render::surface::{DropShadow, FrameRGBA, StrokeStyle, Surface};

/// Resampling quality for scaled images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageQuality {
    /// Nearest neighbour.
    Low,
    /// Bilinear.
    Medium,
    /// Bicubic.
    #[default]
    High,
}

impl ImageQuality {
    fn to_peniko(self) -> vello_cpu::peniko::ImageQuality {
        match self {
            ImageQuality::Low => vello_cpu::peniko::ImageQuality::Low,
            ImageQuality::Medium => vello_cpu::peniko::ImageQuality::Medium,
            ImageQuality::High => vello_cpu::peniko::ImageQuality::High,
        }
    }
}

/// Options for [`CpuSurface`].
#[derive(Debug, Clone, Copy)]
pub struct CpuSurfaceOpts {
    pub(crate) curve_tolerance: f64,
    pub(crate) image_quality: ImageQuality,
}

impl Default for CpuSurfaceOpts {
    fn default() -> Self {
        Self {
            curve_tolerance: 0.1,
            image_quality: ImageQuality::High,
        }
    }
}

impl CpuSurfaceOpts {
    /// Flattening tolerance used when expanding strokes and dashes.
    pub fn with_curve_tolerance(mut self, tolerance: f64) -> Self {
        self.curve_tolerance = tolerance;
        self
    }

    /// Resampling quality for [`Surface::draw_image`].
    pub fn with_image_quality(mut self, quality: ImageQuality) -> Self {
        self.image_quality = quality;
        self
    }
}

/// Software [`Surface`] backed by `vello_cpu`.
///
/// Every draw call is rasterized into a transparent scratch pixmap and then composited onto a
/// premultiplied RGBA8 canvas, so destination-out erasing and shadows are plain byte passes.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    data: Vec<u8>,
    scratch: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    shadow: Option<DropShadow>,
    text: TextEngine,
    fonts: HashMap<(String, FontVariant), vello_cpu::peniko::FontData>,
    opts: CpuSurfaceOpts,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("canvas", &self.canvas)
            .field("shadow", &self.shadow)
            .field("text", &self.text)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Transparent surface of `width × height` drawing text with `fonts`.
    pub fn new(
        width: u32,
        height: u32,
        fonts: FontBook,
        opts: CpuSurfaceOpts,
    ) -> FramecutResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let w: u16 = width
            .try_into()
            .map_err(|_| FramecutError::render("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| FramecutError::render("surface height exceeds u16"))?;
        Ok(Self {
            canvas,
            width: w,
            height: h,
            data: vec![0; canvas.rgba8_len()],
            scratch: vello_cpu::Pixmap::new(w, h),
            ctx: None,
            shadow: None,
            text: TextEngine::new(fonts),
            fonts: HashMap::new(),
            opts,
        })
    }

    /// Surface without fonts; text draws are skipped.
    pub fn without_fonts(width: u32, height: u32) -> FramecutResult<Self> {
        Self::new(width, height, FontBook::default(), CpuSurfaceOpts::default())
    }

    /// Text engine used for shaping and measurement.
    pub fn text_engine_mut(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    /// Premultiplied RGBA8 pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copy of the current pixels.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data.clone(),
            premultiplied: true,
        }
    }

    /// Consume the surface, keeping its pixels.
    pub fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data,
            premultiplied: true,
        }
    }

    /// Rasterize one draw call into the cleared scratch pixmap.
    fn rasterize(&mut self, draw: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == self.width && ctx.height() == self.height => ctx,
            _ => vello_cpu::RenderContext::new(self.width, self.height),
        };
        ctx.reset();
        draw(&mut ctx);
        ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut self.scratch);
        self.ctx = Some(ctx);
    }

    fn coverage(&mut self, path: &BezPath) {
        let cpu_path = bezpath_to_cpu(path);
        self.rasterize(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(&cpu_path);
        })
    }

    fn fill_solid(&mut self, path: &BezPath, color: Color) {
        let cpu_path = bezpath_to_cpu(path);
        let [r, g, b, a] = color.to_rgba8();
        self.rasterize(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_path(&cpu_path);
        })
    }

    /// Composite the scratch pixmap onto the canvas, shadow first.
    fn composite(&mut self) {
        let layer = self.scratch.data_as_u8_slice();
        if let Some(shadow) = self.shadow.clone().filter(DropShadow::is_visible) {
            let mut sh = pixels::shadow_from_alpha(
                layer,
                self.canvas.width,
                self.canvas.height,
                shadow.color.to_rgba8_premul(),
                shadow.offset.x.round() as i32,
                shadow.offset.y.round() as i32,
            );
            let blurred =
                pixels::blur_for_shadow(&mut sh, self.canvas.width, self.canvas.height, shadow.blur)
                    .and_then(|()| pixels::over_in_place(&mut self.data, &sh));
            if let Err(e) = blurred {
                tracing::warn!(error = %e, "shadow skipped");
            }
        }
        if let Err(e) = pixels::over_in_place(&mut self.data, layer) {
            tracing::warn!(error = %e, "composite skipped");
        }
    }

    fn font_data_for(&mut self, shaped: &ShapedText) -> vello_cpu::peniko::FontData {
        let slot = (shaped.face.key.clone(), shaped.face.variant);
        self.fonts
            .entry(slot)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(shaped.face.bytes.as_ref().clone()),
                    0,
                )
            })
            .clone()
    }

    fn draw_glyphs(&mut self, font: &FontSpec, text: &str, origin: Point, paint: GlyphPaint) {
        if text.is_empty() {
            return;
        }
        let shaped = match self.text.shape(font, text) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(font = %font.css(), error = %e, "text skipped");
                return;
            }
        };
        let data = self.font_data_for(&shaped);
        let glyphs: Vec<vello_cpu::Glyph> = shaped
            .glyphs
            .iter()
            .map(|g| vello_cpu::Glyph {
                id: g.id,
                x: origin.x as f32 + g.x,
                y: origin.y as f32 + g.y,
            })
            .collect();
        self.rasterize(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            match paint {
                GlyphPaint::Fill(color) => {
                    let [r, g, b, a] = color.to_rgba8();
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                    ctx.glyph_run(&data)
                        .font_size(shaped.size)
                        .fill_glyphs(glyphs.into_iter());
                }
                GlyphPaint::Stroke(color, width) => {
                    let [r, g, b, a] = color.to_rgba8();
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                    ctx.set_stroke(
                        vello_cpu::kurbo::Stroke::new(width)
                            .with_join(vello_cpu::kurbo::Join::Miter)
                            .with_miter_limit(10.0),
                    );
                    ctx.glyph_run(&data)
                        .font_size(shaped.size)
                        .stroke_glyphs(glyphs.into_iter());
                }
            }
        });
        self.composite();
    }
}

#[derive(Clone, Copy)]
enum GlyphPaint {
    Fill(Color),
    Stroke(Color, f64),
}

impl TextMeasurer for CpuSurface {
    fn measure(&mut self, font: &FontSpec, text: &str) -> Option<f64> {
        self.text.measure(font, text)
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Color) {
        pixels::fill(&mut self.data, color.to_rgba8_premul());
    }

    fn set_shadow(&mut self, shadow: Option<DropShadow>) {
        self.shadow = shadow;
    }

    fn fill_path(&mut self, path: &BezPath, fill: &Fill) {
        match fill {
            Fill::Solid(color) => self.fill_solid(path, *color),
            gradient => {
                self.coverage(path);
                let width = self.canvas.width;
                pixels::shade_coverage(self.scratch.data_as_u8_slice_mut(), width, |x, y| {
                    let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                    gradient.color_at(p).to_rgba8_premul().to_array()
                });
            }
        }
        self.composite();
    }

    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        if !(style.width > 0.0 && style.width.is_finite()) {
            return;
        }
        let outline = kurbo::stroke(
            path.iter(),
            &style.to_kurbo(),
            &StrokeOpts::default(),
            self.opts.curve_tolerance,
        );
        self.fill_solid(&outline, color);
        self.composite();
    }

    fn erase_path(&mut self, path: &BezPath) {
        self.coverage(path);
        if let Err(e) = pixels::erase_in_place(&mut self.data, self.scratch.data_as_u8_slice()) {
            tracing::warn!(error = %e, "erase skipped");
        }
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) {
        let (dw, dh) = (dest.width(), dest.height());
        if dw == 0.0 || dh == 0.0 || !dw.is_finite() || !dh.is_finite() {
            return;
        }
        let pixmap =
            match pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(error = %e, "image skipped");
                    return;
                }
            };
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        let transform = Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(dw / iw, dh / ih);
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: self.opts.image_quality.to_peniko(),
                ..vello_cpu::peniko::ImageSampler::default()
            },
        };
        self.rasterize(|ctx| {
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        });
        self.composite();
    }

    fn fill_text(&mut self, font: &FontSpec, text: &str, origin: Point, color: Color) {
        self.draw_glyphs(font, text, origin, GlyphPaint::Fill(color));
    }

    fn stroke_text(
        &mut self,
        font: &FontSpec,
        text: &str,
        origin: Point,
        style: &StrokeStyle,
        color: Color,
    ) {
        if !(style.width > 0.0 && style.width.is_finite()) {
            return;
        }
        self.draw_glyphs(font, text, origin, GlyphPaint::Stroke(color, style.width));
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> FramecutResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FramecutError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FramecutError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FramecutError::render("image byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect::<Vec<_>>();
    let may_have_opacities = bytes.chunks_exact(4).any(|px| px[3] != 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
