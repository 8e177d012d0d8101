use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::fonts::FontSpec;
use crate::foundation::core::{Canvas, Point, Rect};

/// Axis of a background gradient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    /// `(0,0) → (0,H)`.
    TopBottom,
    /// `(0,0) → (W,0)`.
    LeftRight,
    /// `(0,0) → (W,H)`.
    #[default]
    Diagonal,
    /// `(W,0) → (0,H)`.
    DiagonalReverse,
    /// Circle centered on the canvas, radius half the diagonal.
    Radial,
}

/// One color stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient vector, `0..=1`.
    pub offset: f64,
    /// Stop color.
    pub color: Color,
}

impl GradientStop {
    /// Build a stop.
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Background fill description: a direction plus stops in storage order (not necessarily sorted).
///
/// A single stop is a solid fill and ignores `direction`. Documents may also spell a solid
/// background as a bare color string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientSpec {
    /// Gradient axis.
    pub direction: GradientDirection,
    /// Color stops; at least one.
    pub stops: Vec<GradientStop>,
}

impl GradientSpec {
    /// Solid fill.
    pub fn solid(color: Color) -> Self {
        Self {
            direction: GradientDirection::default(),
            stops: vec![GradientStop::new(0.0, color)],
        }
    }

    /// Gradient from stops in any order.
    pub fn new(direction: GradientDirection, stops: Vec<GradientStop>) -> Self {
        Self { direction, stops }
    }

    /// Stops sorted ascending by offset (stable for equal offsets).
    pub fn sorted_stops(&self) -> Vec<GradientStop> {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        stops
    }

    /// Solid color when the spec has exactly one stop.
    pub fn as_solid(&self) -> Option<Color> {
        match self.stops.as_slice() {
            [only] => Some(only.color),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for GradientSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Solid(Color),
            Spec {
                #[serde(default)]
                direction: GradientDirection,
                stops: Vec<GradientStop>,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Solid(color) => Ok(Self::solid(color)),
            Repr::Spec { direction, stops } => Ok(Self { direction, stops }),
        }
    }
}

/// Cutout geometry: border thicknesses around the cutout strip, corner radius, repeat count and
/// the optional stroke drawn around every cutout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameGeometry {
    /// Left border thickness.
    pub left_width: f64,
    /// Right border thickness.
    pub right_width: f64,
    /// Top border thickness.
    pub top_width: f64,
    /// Bottom border thickness.
    pub bottom_width: f64,
    /// Corner radius of each cutout.
    pub radius: f64,
    /// Gap between neighbouring cutouts.
    pub spacing: f64,
    /// Number of cutouts; zero leaves the background full-bleed.
    pub count: u32,
    /// Stroke width around each cutout; zero disables the stroke.
    pub inner_border_width: f64,
    /// Stroke color around each cutout.
    pub inner_border_color: Color,
}

impl Default for FrameGeometry {
    fn default() -> Self {
        use crate::scene::presets::{
            DEFAULT_BORDER, DEFAULT_COUNT, DEFAULT_INNER_BORDER_WIDTH, DEFAULT_RADIUS,
            DEFAULT_SPACING,
        };

        Self {
            left_width: DEFAULT_BORDER,
            right_width: DEFAULT_BORDER,
            top_width: DEFAULT_BORDER,
            bottom_width: DEFAULT_BORDER,
            radius: DEFAULT_RADIUS,
            spacing: DEFAULT_SPACING,
            count: DEFAULT_COUNT,
            inner_border_width: DEFAULT_INNER_BORDER_WIDTH,
            inner_border_color: Color::BLACK,
        }
    }
}

impl FrameGeometry {
    /// Width of each cutout for a screen `screen_width` wide.
    ///
    /// Degenerate (zero or negative) results are returned as-is.
    pub fn usable_width(&self, screen_width: f64) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = f64::from(self.count);
        (screen_width - self.spacing * (n - 1.0) - self.left_width - self.right_width) / n
    }

    /// Local (untranslated) rectangle shared by every cutout.
    pub fn cutout_rect(&self, canvas: Canvas) -> Rect {
        let usable = self.usable_width(f64::from(canvas.width));
        Rect::new(
            self.left_width,
            self.top_width,
            self.left_width + usable,
            f64::from(canvas.height) - self.bottom_width,
        )
    }

    /// Horizontal translation of cutout `i`.
    pub fn cutout_offset(&self, canvas: Canvas, i: u32) -> f64 {
        f64::from(i) * (self.usable_width(f64::from(canvas.width)) + self.spacing)
    }
}

/// Drop shadow under text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEffect {
    /// Whether the shadow is drawn.
    pub enabled: bool,
    /// Shadow color.
    pub color: Color,
    /// Blur amount (canvas `shadowBlur` semantics).
    pub blur: f64,
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
}

impl Default for ShadowEffect {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::BLACK,
            blur: 4.0,
            offset_x: 2.0,
            offset_y: 2.0,
        }
    }
}

/// Stroke drawn under the text fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEffect {
    /// Whether the outline is drawn.
    pub enabled: bool,
    /// Outline color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

impl Default for OutlineEffect {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::BLACK,
            width: 2.0,
        }
    }
}

/// Text effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextEffects {
    /// Drop shadow.
    pub shadow: ShadowEffect,
    /// Outline stroke.
    pub outline: OutlineEffect,
}

/// Text anchored at its baseline-left point `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    /// Unique layer id.
    pub id: String,
    /// Baseline-left x.
    pub x: f64,
    /// Baseline y.
    pub y: f64,
    /// Text content.
    pub text: String,
    /// Font size in pixels (`1..=200`).
    pub font_size: f64,
    /// Family key into the known font set.
    pub font_family: String,
    /// Fill color.
    pub color: Color,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
    /// Italic slant.
    #[serde(default)]
    pub italic: bool,
    /// Underline.
    #[serde(default)]
    pub underline: bool,
    /// Shadow and outline.
    #[serde(default)]
    pub effects: TextEffects,
}

impl TextLayer {
    /// Font selection for this layer.
    pub fn font(&self) -> FontSpec {
        FontSpec {
            family: self.font_family.clone(),
            size: self.font_size,
            bold: self.bold,
            italic: self.italic,
        }
    }

    /// Bounds for a measured advance width: one font-size above the baseline.
    pub fn bounds_for_width(&self, width: f64) -> Rect {
        Rect::new(self.x, self.y - self.font_size, self.x + width, self.y)
    }
}

/// Raster image drawn into `(x, y, width, height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLayer {
    /// Unique layer id.
    pub id: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
    /// Image source: remote url, file path or `data:` URI.
    pub url: String,
}

impl ImageLayer {
    /// Destination rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A positioned element above the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    /// Text layer.
    Text(TextLayer),
    /// Image layer.
    Image(ImageLayer),
}

impl Layer {
    /// Layer id.
    pub fn id(&self) -> &str {
        match self {
            Layer::Text(t) => &t.id,
            Layer::Image(i) => &i.id,
        }
    }

    /// Anchor point: baseline-left for text, top-left for images.
    pub fn position(&self) -> Point {
        match self {
            Layer::Text(t) => Point::new(t.x, t.y),
            Layer::Image(i) => Point::new(i.x, i.y),
        }
    }

    /// Move the anchor point.
    pub fn set_position(&mut self, p: Point) {
        match self {
            Layer::Text(t) => {
                t.x = p.x;
                t.y = p.y;
            }
            Layer::Image(i) => {
                i.x = p.x;
                i.y = p.y;
            }
        }
    }

    /// `"text"` or `"image"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Text(_) => "text",
            Layer::Image(_) => "image",
        }
    }
}

/// Complete declarative description of one frame document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Canvas width in pixels.
    pub screen_width: u32,
    /// Canvas height in pixels.
    pub screen_height: u32,
    /// Background fill.
    pub background: GradientSpec,
    /// Cutout geometry.
    #[serde(default)]
    pub frame: FrameGeometry,
    /// Layers bottom-most first.
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Id of the selected layer, if any.
    #[serde(default)]
    pub selected_layer_id: Option<String>,
}

impl Scene {
    /// Empty scene with the default frame and background.
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            background: crate::scene::presets::default_background(),
            frame: FrameGeometry::default(),
            layers: Vec::new(),
            selected_layer_id: None,
        }
    }

    /// Canvas size (unvalidated).
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.screen_width,
            height: self.screen_height,
        }
    }

    /// Layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    /// Mutable layer by id.
    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Z-index of a layer by id.
    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    /// Currently selected layer, if the selection refers to an existing layer.
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.layer(self.selected_layer_id.as_deref()?)
    }

    /// Return `true` when `id` is the selected layer.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_layer_id.as_deref() == Some(id)
    }

    /// Image urls in z-order, duplicates included.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Image(i) => Some(i.url.as_str()),
            Layer::Text(_) => None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
