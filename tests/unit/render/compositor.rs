use std::cell::Cell;

use super::*;
use crate::assets::decode::DecodedImage;
use crate::foundation::core::Canvas;
use crate::render::gradient::Fill;
use crate::render::recording::{DrawCommand, RecordingSurface};
use crate::scene::model::{GradientSpec, ImageLayer, Layer, TextLayer};

struct CountingLoader {
    calls: Cell<usize>,
}

impl ImageLoader for CountingLoader {
    async fn load(&self, url: &str) -> FramecutResult<DecodedImage> {
        self.calls.set(self.calls.get() + 1);
        if url == "broken" {
            return Err(FramecutError::decode("corrupt"));
        }
        DecodedImage::from_premul_rgba8(2, 2, vec![255; 16])
    }
}

fn scene() -> Scene {
    let mut s = Scene::new(1000, 500);
    s.background = GradientSpec::solid(Color::WHITE);
    s.frame.inner_border_width = 2.0;
    s.layers = vec![
        Layer::Text(TextLayer::new_centered("t", "Hi", s.canvas())),
        Layer::Image(ImageLayer {
            id: "i".to_owned(),
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            url: "logo".to_owned(),
        }),
    ];
    s
}

fn recorder(scene: &Scene) -> RecordingSurface {
    RecordingSurface::new(scene.canvas())
}

fn kinds(cmds: &[DrawCommand]) -> Vec<&'static str> {
    cmds.iter()
        .map(|c| match c {
            DrawCommand::Clear(_) => "clear",
            DrawCommand::SetShadow(_) => "shadow",
            DrawCommand::FillPath { .. } => "fill",
            DrawCommand::StrokePath { .. } => "stroke",
            DrawCommand::ErasePath { .. } => "erase",
            DrawCommand::DrawImage { .. } => "image",
            DrawCommand::FillText { .. } => "fill-text",
            DrawCommand::StrokeText { .. } => "stroke-text",
        })
        .collect()
}

#[test]
fn paints_background_cutouts_borders_then_layers() {
    let sc = scene();
    let loader = CountingLoader {
        calls: Cell::new(0),
    };
    let mut cache = ImageCache::new();
    let mut s = recorder(&sc);
    render_blocking(&mut s, &sc, &mut cache, &loader, &RenderOpts::default()).unwrap();

    assert_eq!(
        kinds(s.commands()),
        ["shadow", "clear", "fill", "erase", "stroke", "fill-text", "image"]
    );
    assert_eq!(s.commands()[1], DrawCommand::Clear(Color::TRANSPARENT));
    let DrawCommand::FillPath { fill, .. } = &s.commands()[2] else {
        unreachable!()
    };
    assert_eq!(*fill, Fill::Solid(Color::WHITE));
}

#[test]
fn repeated_renders_are_identical_and_load_once() {
    let sc = scene();
    let loader = CountingLoader {
        calls: Cell::new(0),
    };
    let mut cache = ImageCache::new();
    let opts = RenderOpts::default();

    let mut first = recorder(&sc);
    render_blocking(&mut first, &sc, &mut cache, &loader, &opts).unwrap();
    let mut second = recorder(&sc);
    render_blocking(&mut second, &sc, &mut cache, &loader, &opts).unwrap();

    assert_eq!(first.commands(), second.commands());
    assert_eq!(loader.calls.get(), 1);
}

#[test]
fn failed_image_does_not_abort_the_render() {
    let mut sc = scene();
    if let Some(Layer::Image(img)) = sc.layers.last_mut() {
        img.url = "broken".to_owned();
    }
    sc.layers.push(Layer::Text(TextLayer::new_centered("top", "x", sc.canvas())));
    let loader = CountingLoader {
        calls: Cell::new(0),
    };
    let mut cache = ImageCache::new();
    let mut s = recorder(&sc);
    render_blocking(&mut s, &sc, &mut cache, &loader, &RenderOpts::default()).unwrap();

    let k = kinds(s.commands());
    assert!(!k.contains(&"image"));
    assert_eq!(k.last(), Some(&"fill-text"));
    assert!(cache.failure("broken").is_some());
}

#[test]
fn thumbnail_skips_layers() {
    let sc = scene();
    let mut s = recorder(&sc);
    render_thumbnail(&mut s, &sc, &RenderOpts::default()).unwrap();
    assert_eq!(kinds(s.commands()), ["shadow", "clear", "fill", "erase", "stroke"]);
}

#[test]
fn zero_count_leaves_background_whole() {
    let mut sc = scene();
    sc.frame.count = 0;
    sc.layers.clear();
    let mut s = recorder(&sc);
    render_resolved(&mut s, &sc, &ImageCache::new(), &RenderOpts::default()).unwrap();
    assert_eq!(kinds(s.commands()), ["shadow", "clear", "fill"]);
}

#[test]
fn surface_size_must_match_scene() {
    let sc = scene();
    let mut s = RecordingSurface::new(Canvas {
        width: 10,
        height: 10,
    });
    let err = render_thumbnail(&mut s, &sc, &RenderOpts::default()).unwrap_err();
    assert!(err.to_string().contains("surface is 10x10 but scene is 1000x500"));
    assert!(s.commands().is_empty());
}

#[test]
fn clear_color_is_configurable() {
    let sc = scene();
    let mut s = recorder(&sc);
    let opts = RenderOpts::default().with_clear_color(Color::BLACK);
    render_thumbnail(&mut s, &sc, &opts).unwrap();
    assert_eq!(s.commands()[1], DrawCommand::Clear(Color::BLACK));
}
