use crate::assets::color::Color;
use crate::assets::image_cache::{ImageCache, ImageLoader};
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::geometry::path::rect_path;
use crate::render::cutout::draw_cutouts;
use crate::render::gradient::resolve_gradient;
use crate::render::layers::draw_layers;
use crate::render::surface::Surface;
use crate::scene::model::Scene;

/// Dashed box and position readout drawn around the selected layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionStyle {
    /// Stroke and label color.
    pub color: Color,
    /// Dash pattern of the box.
    pub dash: Vec<f64>,
    /// Gap between the layer bounds and the box.
    pub padding: f64,
    /// Box stroke width.
    pub line_width: f64,
    /// Label font family.
    pub label_family: String,
    /// Label font size.
    pub label_size: f64,
    /// Label baseline distance below the layer bounds.
    pub label_offset: f64,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0x00, 0x66, 0xff),
            dash: vec![5.0, 5.0],
            padding: 4.0,
            line_width: 1.0,
            label_family: "Inter".to_owned(),
            label_size: 12.0,
            label_offset: 20.0,
        }
    }
}

/// Resize handle squares drawn on a selected image layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleStyle {
    /// Side length.
    pub size: f64,
    /// Distance from a corner up and left to the square's top-left.
    pub offset: f64,
    /// Fill color.
    pub fill: Color,
    /// Outline color.
    pub stroke: Color,
    /// Outline width.
    pub line_width: f64,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            size: 8.0,
            offset: 4.0,
            fill: Color::WHITE,
            stroke: SelectionStyle::default().color,
            line_width: 1.0,
        }
    }
}

/// Options for [`render`] and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOpts {
    pub(crate) clear: Color,
    pub(crate) selection: SelectionStyle,
    pub(crate) handle: HandleStyle,
    pub(crate) underline_offset: f64,
    pub(crate) draw_selection: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            clear: Color::TRANSPARENT,
            selection: SelectionStyle::default(),
            handle: HandleStyle::default(),
            underline_offset: 3.0,
            draw_selection: true,
        }
    }
}

impl RenderOpts {
    /// Color the surface is cleared to before painting (default transparent).
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear = color;
        self
    }

    /// Selection box style.
    pub fn with_selection(mut self, style: SelectionStyle) -> Self {
        self.selection = style;
        self
    }

    /// Resize handle style.
    pub fn with_handle(mut self, style: HandleStyle) -> Self {
        self.handle = style;
        self
    }

    /// Distance of the underline below the baseline.
    pub fn with_underline_offset(mut self, offset: f64) -> Self {
        self.underline_offset = offset;
        self
    }

    /// Whether the selected layer gets its box, handles and label.
    pub fn with_draw_selection(mut self, draw: bool) -> Self {
        self.draw_selection = draw;
        self
    }
}

/// Resolve every image the scene references through `cache`, then paint the full frame.
///
/// Images that fail to load are logged and their layers drawn empty; only a surface/scene size
/// mismatch is an error.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(width = scene.screen_width, height = scene.screen_height, layers = scene.layers.len())
)]
pub async fn render<S, L>(
    surface: &mut S,
    scene: &Scene,
    cache: &mut ImageCache,
    loader: &L,
    opts: &RenderOpts,
) -> FramecutResult<()>
where
    S: Surface + ?Sized,
    L: ImageLoader + ?Sized,
{
    let stats = cache.resolve_all(scene.image_urls(), loader).await;
    tracing::debug!(
        hits = stats.hits,
        loaded = stats.loaded,
        failed = stats.failed,
        "images resolved"
    );
    render_resolved(surface, scene, cache, opts)
}

/// [`render`] driven to completion on the current thread.
pub fn render_blocking<S, L>(
    surface: &mut S,
    scene: &Scene,
    cache: &mut ImageCache,
    loader: &L,
    opts: &RenderOpts,
) -> FramecutResult<()>
where
    S: Surface + ?Sized,
    L: ImageLoader + ?Sized,
{
    pollster::block_on(render(surface, scene, cache, loader, opts))
}

/// Synchronous paint pass: clear, background, cutouts, then layers.
///
/// Images missing from `images` are drawn empty.
pub fn render_resolved<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    images: &ImageCache,
    opts: &RenderOpts,
) -> FramecutResult<()> {
    paint_frame(surface, scene, opts)?;
    draw_layers(surface, scene, images, opts);
    Ok(())
}

/// Background and cutouts only, as shown in saved-frame lists.
pub fn render_thumbnail<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    opts: &RenderOpts,
) -> FramecutResult<()> {
    paint_frame(surface, scene, opts)
}

fn paint_frame<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    opts: &RenderOpts,
) -> FramecutResult<()> {
    let canvas = scene.canvas();
    let size = surface.size();
    if size != canvas {
        return Err(FramecutError::validation(format!(
            "surface is {}x{} but scene is {}x{}",
            size.width, size.height, canvas.width, canvas.height
        )));
    }

    surface.set_shadow(None);
    surface.clear(opts.clear);
    let fill = resolve_gradient(&scene.background, canvas);
    surface.fill_path(&rect_path(canvas.rect()), &fill);
    draw_cutouts(surface, &scene.frame, canvas);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
