use crate::assets::fonts::FontSpec;
use crate::assets::image_cache::{ImageCache, display_url};
use crate::foundation::core::{Point, Rect, Vec2};
use crate::geometry::hit::{ResizeHandle, handle_rect};
use crate::geometry::path::{line_path, rect_path};
use crate::render::compositor::RenderOpts;
use crate::render::gradient::Fill;
use crate::render::surface::{DropShadow, StrokeStyle, Surface};
use crate::scene::model::{ImageLayer, Layer, Scene, TextLayer};

/// Draw `scene.layers` bottom to top. Selection decoration is drawn with its own layer.
pub(crate) fn draw_layers<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    images: &ImageCache,
    opts: &RenderOpts,
) {
    for layer in &scene.layers {
        let selected = opts.draw_selection && scene.is_selected(layer.id());
        match layer {
            Layer::Text(t) => draw_text_layer(surface, t, selected, opts),
            Layer::Image(img) => draw_image_layer(surface, img, images, selected, opts),
        }
    }
}

fn draw_text_layer<S: Surface + ?Sized>(
    surface: &mut S,
    layer: &TextLayer,
    selected: bool,
    opts: &RenderOpts,
) {
    let font = layer.font();
    let origin = Point::new(layer.x, layer.y);

    let shadow = &layer.effects.shadow;
    if shadow.enabled {
        surface.set_shadow(Some(DropShadow {
            color: shadow.color,
            blur: shadow.blur,
            offset: Vec2::new(shadow.offset_x, shadow.offset_y),
        }));
    }

    let outline = &layer.effects.outline;
    if outline.enabled {
        surface.stroke_text(
            &font,
            &layer.text,
            origin,
            &StrokeStyle::new(outline.width),
            outline.color,
        );
    }
    surface.fill_text(&font, &layer.text, origin, layer.color);

    let width = if layer.underline || selected {
        surface.measure(&font, &layer.text)
    } else {
        None
    };

    if layer.underline
        && let Some(w) = width
    {
        let y = layer.y + opts.underline_offset;
        surface.stroke_path(
            &line_path(Point::new(layer.x, y), Point::new(layer.x + w, y)),
            &StrokeStyle::new(1.0),
            layer.color,
        );
    }

    if shadow.enabled {
        surface.set_shadow(None);
    }

    if !selected {
        return;
    }
    match width {
        Some(w) => {
            let bounds = layer.bounds_for_width(w);
            draw_selection_box(surface, bounds, opts);
            draw_position_label(surface, origin, bounds, opts);
        }
        None => tracing::debug!(layer = %layer.id, "selection skipped: text not measurable"),
    }
}

fn draw_image_layer<S: Surface + ?Sized>(
    surface: &mut S,
    layer: &ImageLayer,
    images: &ImageCache,
    selected: bool,
    opts: &RenderOpts,
) {
    let rect = layer.rect();
    match images.get(&layer.url) {
        Some(image) => surface.draw_image(image, rect),
        None => tracing::debug!(
            layer = %layer.id,
            url = %display_url(&layer.url),
            "image not resolved; layer drawn empty"
        ),
    }

    if !selected {
        return;
    }
    draw_selection_box(surface, rect, opts);
    draw_handles(surface, rect, opts);
    draw_position_label(surface, Point::new(layer.x, layer.y), rect, opts);
}

fn draw_selection_box<S: Surface + ?Sized>(surface: &mut S, bounds: Rect, opts: &RenderOpts) {
    let sel = &opts.selection;
    let outer = bounds.inflate(sel.padding, sel.padding);
    surface.stroke_path(
        &rect_path(outer),
        &StrokeStyle::new(sel.line_width).with_dash(sel.dash.clone()),
        sel.color,
    );
}

fn draw_handles<S: Surface + ?Sized>(surface: &mut S, rect: Rect, opts: &RenderOpts) {
    let style = &opts.handle;
    for handle in ResizeHandle::ALL {
        let square = rect_path(handle_rect(rect, handle, style.size, style.offset));
        surface.fill_path(&square, &Fill::Solid(style.fill));
        surface.stroke_path(&square, &StrokeStyle::new(style.line_width), style.stroke);
    }
}

fn draw_position_label<S: Surface + ?Sized>(
    surface: &mut S,
    position: Point,
    bounds: Rect,
    opts: &RenderOpts,
) {
    let sel = &opts.selection;
    let text = position_label(position);
    let font = FontSpec::new(sel.label_family.clone(), sel.label_size);
    let at = Point::new(position.x, bounds.y1 + sel.label_offset);
    surface.fill_text(&font, &text, at, sel.color);
}

/// `"(x, y)"` with both coordinates rounded half up.
pub(crate) fn position_label(p: Point) -> String {
    let round = |v: f64| (v + 0.5).floor() as i64;
    format!("({}, {})", round(p.x), round(p.y))
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
