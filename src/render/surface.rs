use kurbo::{Cap, Join, Stroke};

use crate::assets::color::Color;
use crate::assets::decode::DecodedImage;
use crate::assets::fonts::{FontSpec, TextMeasurer};
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Vec2};
use crate::render::gradient::Fill;

/// A rendered frame as RGBA8 pixels.
///
/// Frames coming out of [`crate::render::cpu::CpuSurface`] are **premultiplied alpha**; the
/// `premultiplied` flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Stroke parameters with canvas defaults: butt caps, miter joins, miter limit 10.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width.
    pub width: f64,
    /// Dash pattern (on, off, ...); empty for a solid line.
    pub dash: Vec<f64>,
}

impl StrokeStyle {
    /// Solid stroke of `width`.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            dash: Vec::new(),
        }
    }

    /// Use a dash pattern.
    pub fn with_dash(mut self, dash: impl Into<Vec<f64>>) -> Self {
        self.dash = dash.into();
        self
    }

    pub(crate) fn to_kurbo(&self) -> Stroke {
        let stroke = Stroke::new(self.width)
            .with_caps(Cap::Butt)
            .with_join(Join::Miter)
            .with_miter_limit(10.0);
        if self.dash.is_empty() {
            stroke
        } else {
            stroke.with_dashes(0.0, self.dash.iter().copied())
        }
    }
}

/// Drop shadow applied to subsequent draws, canvas `shadow*` style.
#[derive(Clone, Debug, PartialEq)]
pub struct DropShadow {
    /// Shadow color.
    pub color: Color,
    /// Blur amount; the gaussian sigma is half of it.
    pub blur: f64,
    /// Offset from the shape.
    pub offset: Vec2,
}

impl DropShadow {
    /// Whether this shadow paints anything.
    pub fn is_visible(&self) -> bool {
        self.color.a > 0.0 && (self.blur > 0.0 || self.offset != Vec2::ZERO)
    }
}

/// The 2D paint collaborator the compositor draws through.
///
/// Coordinates are canvas pixels with y pointing down. Draw calls never fail: a surface that
/// cannot honor one (missing font, oversize image) logs and draws nothing for it.
pub trait Surface: TextMeasurer {
    /// Surface size.
    fn size(&self) -> Canvas;

    /// Replace every pixel with `color`.
    fn clear(&mut self, color: Color);

    /// Set or remove the shadow drawn under subsequent fills and strokes.
    fn set_shadow(&mut self, shadow: Option<DropShadow>);

    /// Source-over fill of `path` (non-zero winding).
    fn fill_path(&mut self, path: &BezPath, fill: &Fill);

    /// Source-over stroke of `path`.
    fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle, color: Color);

    /// Destination-out: clear the area covered by `path` to transparent.
    fn erase_path(&mut self, path: &BezPath);

    /// Draw `image` scaled into `dest` with high-quality filtering.
    fn draw_image(&mut self, image: &DecodedImage, dest: Rect);

    /// Fill `text` with its baseline-left at `origin`.
    fn fill_text(&mut self, font: &FontSpec, text: &str, origin: Point, color: Color);

    /// Stroke the glyph outlines of `text` with its baseline-left at `origin`.
    fn stroke_text(
        &mut self,
        font: &FontSpec,
        text: &str,
        origin: Point,
        style: &StrokeStyle,
        color: Color,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
