use super::*;
use crate::assets::color::Color;
use crate::assets::decode::DecodedImage;
use crate::assets::fonts::TextMeasurer;
use crate::foundation::core::Canvas;
use crate::render::recording::{DrawCommand, RecordingSurface};
use kurbo::Shape;

fn canvas() -> Canvas {
    Canvas {
        width: 800,
        height: 600,
    }
}

fn text(id: &str, s: &str) -> TextLayer {
    let mut t = TextLayer::new_centered(id, s, canvas());
    t.x = 100.0;
    t.y = 100.0;
    t
}

fn image(id: &str, url: &str) -> ImageLayer {
    ImageLayer {
        id: id.to_owned(),
        x: 100.0,
        y: 100.0,
        width: 200.0,
        height: 100.0,
        url: url.to_owned(),
    }
}

fn scene(layers: Vec<Layer>, selected: Option<&str>) -> Scene {
    let mut s = Scene::new(canvas().width, canvas().height);
    s.layers = layers;
    s.selected_layer_id = selected.map(str::to_owned);
    s
}

fn record(scene: &Scene, images: &ImageCache, opts: &RenderOpts) -> Vec<DrawCommand> {
    let mut s = RecordingSurface::new(canvas());
    draw_layers(&mut s, scene, images, opts);
    s.take_commands()
}

fn kind(c: &DrawCommand) -> &'static str {
    match c {
        DrawCommand::Clear(_) => "clear",
        DrawCommand::SetShadow(Some(_)) => "shadow-on",
        DrawCommand::SetShadow(None) => "shadow-off",
        DrawCommand::FillPath { .. } => "fill",
        DrawCommand::StrokePath { .. } => "stroke",
        DrawCommand::ErasePath { .. } => "erase",
        DrawCommand::DrawImage { .. } => "image",
        DrawCommand::FillText { .. } => "fill-text",
        DrawCommand::StrokeText { .. } => "stroke-text",
    }
}

fn kinds(cmds: &[DrawCommand]) -> Vec<&'static str> {
    cmds.iter().map(kind).collect()
}

#[test]
fn plain_text_is_a_single_fill() {
    let cmds = record(
        &scene(vec![Layer::Text(text("a", "Hello"))], None),
        &ImageCache::new(),
        &RenderOpts::default(),
    );
    assert_eq!(kinds(&cmds), ["fill-text"]);
    let DrawCommand::FillText { font, origin, .. } = &cmds[0] else {
        unreachable!()
    };
    assert_eq!(font.css(), "32px Inter");
    assert_eq!(*origin, Point::new(100.0, 100.0));
}

#[test]
fn effects_draw_shadow_outline_fill_underline_in_order() {
    let mut t = text("a", "Hello");
    t.effects.shadow.enabled = true;
    t.effects.outline.enabled = true;
    t.effects.outline.width = 3.0;
    t.underline = true;
    t.bold = true;
    t.italic = true;
    let cmds = record(
        &scene(vec![Layer::Text(t)], None),
        &ImageCache::new(),
        &RenderOpts::default(),
    );
    assert_eq!(
        kinds(&cmds),
        ["shadow-on", "stroke-text", "fill-text", "stroke", "shadow-off"]
    );

    let DrawCommand::SetShadow(Some(shadow)) = &cmds[0] else {
        unreachable!()
    };
    assert_eq!(shadow.blur, 4.0);
    assert_eq!(shadow.offset, Vec2::new(2.0, 2.0));

    let DrawCommand::StrokeText { style, font, .. } = &cmds[1] else {
        unreachable!()
    };
    assert_eq!(style.width, 3.0);
    assert_eq!(font.css(), "italic bold 32px Inter");

    // 5 chars × 32px × 0.5em
    let DrawCommand::StrokePath { path, style, .. } = &cmds[3] else {
        unreachable!()
    };
    assert_eq!(style.width, 1.0);
    let bb = path.bounding_box();
    assert_eq!((bb.x0, bb.x1, bb.y0), (100.0, 180.0, 103.0));
}

#[test]
fn selected_text_gets_dashed_box_and_label() {
    let cmds = record(
        &scene(vec![Layer::Text(text("a", "Hello"))], Some("a")),
        &ImageCache::new(),
        &RenderOpts::default(),
    );
    assert_eq!(kinds(&cmds), ["fill-text", "stroke", "fill-text"]);

    let DrawCommand::StrokePath { path, style, color } = &cmds[1] else {
        unreachable!()
    };
    assert_eq!(style.dash, vec![5.0, 5.0]);
    assert_eq!(color.to_hex(), "#0066ff");
    assert_eq!(path.bounding_box(), Rect::new(96.0, 64.0, 184.0, 104.0));

    let DrawCommand::FillText {
        font, text, origin, ..
    } = &cmds[2]
    else {
        unreachable!()
    };
    assert_eq!(text, "(100, 100)");
    assert_eq!(font.css(), "12px Inter");
    assert_eq!(*origin, Point::new(100.0, 120.0));
}

#[derive(Clone, Copy)]
struct Blind;

impl TextMeasurer for Blind {
    fn measure(&mut self, _: &FontSpec, _: &str) -> Option<f64> {
        None
    }
}

#[test]
fn unmeasurable_text_skips_underline_and_selection() {
    let mut t = text("a", "Hello");
    t.underline = true;
    let sc = scene(vec![Layer::Text(t)], Some("a"));
    let mut s = RecordingSurface::with_measurer(canvas(), Blind);
    draw_layers(&mut s, &sc, &ImageCache::new(), &RenderOpts::default());
    assert_eq!(kinds(s.commands()), ["fill-text"]);
}

#[test]
fn resolved_image_is_drawn_into_its_rect() {
    let mut images = ImageCache::new();
    images.insert(
        "a.png",
        DecodedImage::from_premul_rgba8(1, 1, vec![0, 0, 0, 255]).unwrap(),
    );
    let cmds = record(
        &scene(vec![Layer::Image(image("i", "a.png"))], None),
        &images,
        &RenderOpts::default(),
    );
    assert_eq!(
        cmds,
        vec![DrawCommand::DrawImage {
            source_size: (1, 1),
            dest: Rect::new(100.0, 100.0, 300.0, 200.0),
        }]
    );
}

#[test]
fn selected_unresolved_image_still_gets_handles() {
    let cmds = record(
        &scene(vec![Layer::Image(image("i", "missing.png"))], Some("i")),
        &ImageCache::new(),
        &RenderOpts::default(),
    );
    assert_eq!(
        kinds(&cmds),
        [
            "stroke", "fill", "stroke", "fill", "stroke", "fill", "stroke", "fill", "stroke",
            "fill-text"
        ]
    );
    let DrawCommand::FillPath { path, fill } = &cmds[1] else {
        unreachable!()
    };
    assert_eq!(path.bounding_box(), Rect::new(96.0, 96.0, 104.0, 104.0));
    assert_eq!(*fill, Fill::Solid(Color::WHITE));

    let DrawCommand::FillText { origin, .. } = &cmds[9] else {
        unreachable!()
    };
    assert_eq!(*origin, Point::new(100.0, 220.0));
}

#[test]
fn decoration_sits_between_its_layer_and_the_next() {
    let layers = vec![
        Layer::Text(text("low", "a")),
        Layer::Text(text("high", "b")),
    ];
    let cmds = record(&scene(layers, Some("low")), &ImageCache::new(), &RenderOpts::default());
    assert_eq!(kinds(&cmds), ["fill-text", "stroke", "fill-text", "fill-text"]);
    let DrawCommand::FillText { text, .. } = &cmds[3] else {
        unreachable!()
    };
    assert_eq!(text, "b");
}

#[test]
fn selection_can_be_disabled() {
    let cmds = record(
        &scene(vec![Layer::Image(image("i", "x"))], Some("i")),
        &ImageCache::new(),
        &RenderOpts::default().with_draw_selection(false),
    );
    assert!(cmds.is_empty());
}

#[test]
fn labels_round_half_up() {
    assert_eq!(position_label(Point::new(99.5, -2.5)), "(100, -2)");
    assert_eq!(position_label(Point::new(10.4, 0.0)), "(10, 0)");
}
