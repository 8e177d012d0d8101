use super::*;
use serde_json::json;

fn text_layer(id: &str) -> TextLayer {
    TextLayer {
        id: id.to_owned(),
        x: 100.0,
        y: 200.0,
        text: "Hello".to_owned(),
        font_size: 32.0,
        font_family: "Inter".to_owned(),
        color: Color::BLACK,
        bold: false,
        italic: false,
        underline: false,
        effects: TextEffects::default(),
    }
}

#[test]
fn usable_width_follows_strip_formula() {
    let frame = FrameGeometry {
        left_width: 50.0,
        right_width: 50.0,
        spacing: 20.0,
        count: 2,
        ..FrameGeometry::default()
    };
    // (1920 - 20 - 100) / 2
    assert_eq!(frame.usable_width(1920.0), 900.0);

    let none = FrameGeometry {
        count: 0,
        ..FrameGeometry::default()
    };
    assert_eq!(none.usable_width(1920.0), 0.0);
}

#[test]
fn cutout_rect_and_offsets() {
    let frame = FrameGeometry {
        count: 2,
        ..FrameGeometry::default()
    };
    let canvas = Canvas {
        width: 1920,
        height: 1080,
    };
    let r = frame.cutout_rect(canvas);
    assert_eq!(r, Rect::new(50.0, 50.0, 950.0, 1030.0));
    assert_eq!(frame.cutout_offset(canvas, 0), 0.0);
    assert_eq!(frame.cutout_offset(canvas, 1), 920.0);
}

#[test]
fn sorted_stops_is_stable_and_ascending() {
    let spec = GradientSpec::new(
        GradientDirection::LeftRight,
        vec![
            GradientStop::new(1.0, Color::WHITE),
            GradientStop::new(0.0, Color::BLACK),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ],
    );
    let sorted = spec.sorted_stops();
    assert_eq!(sorted[0].color, Color::BLACK);
    assert_eq!(sorted[1].color, Color::WHITE);
    assert_eq!(sorted[2].color, Color::TRANSPARENT);
    assert!(spec.as_solid().is_none());
    assert_eq!(GradientSpec::solid(Color::WHITE).as_solid(), Some(Color::WHITE));
}

#[test]
fn background_accepts_bare_color_string() {
    let spec: GradientSpec = serde_json::from_value(json!("#ffffff")).unwrap();
    assert_eq!(spec.as_solid(), Some(Color::WHITE));

    let spec: GradientSpec = serde_json::from_value(json!({
        "direction": "diagonal-reverse",
        "stops": [{"offset": 0.0, "color": "#000"}, {"offset": 1.0, "color": "#fff"}]
    }))
    .unwrap();
    assert_eq!(spec.direction, GradientDirection::DiagonalReverse);
    assert_eq!(spec.stops.len(), 2);
}

#[test]
fn layers_are_tagged_by_type() {
    let v = json!({
        "type": "image",
        "id": "img",
        "x": 1.0, "y": 2.0, "width": 30.0, "height": 40.0,
        "url": "logo.png"
    });
    let layer: Layer = serde_json::from_value(v).unwrap();
    assert_eq!(layer.kind(), "image");
    assert_eq!(layer.id(), "img");
    assert_eq!(layer.position(), Point::new(1.0, 2.0));

    let text = Layer::Text(text_layer("t"));
    let back = serde_json::to_value(&text).unwrap();
    assert_eq!(back["type"], "text");
    assert_eq!(back["fontSize"], 32.0);
    assert_eq!(back["effects"]["shadow"]["offsetX"], 2.0);
}

#[test]
fn scene_lookup_and_selection() {
    let mut scene = Scene::new(800, 600);
    scene.layers.push(Layer::Text(text_layer("a")));
    scene.layers.push(Layer::Image(ImageLayer {
        id: "b".to_owned(),
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 10.0,
        url: "b.png".to_owned(),
    }));

    assert_eq!(scene.layer_index("b"), Some(1));
    assert!(scene.selected_layer().is_none());

    scene.selected_layer_id = Some("a".to_owned());
    assert!(scene.is_selected("a"));
    assert_eq!(scene.selected_layer().map(Layer::id), Some("a"));

    scene.selected_layer_id = Some("ghost".to_owned());
    assert!(scene.selected_layer().is_none());

    scene
        .layer_mut("a")
        .unwrap()
        .set_position(Point::new(5.0, 6.0));
    assert_eq!(scene.layer("a").unwrap().position(), Point::new(5.0, 6.0));

    assert_eq!(scene.image_urls().collect::<Vec<_>>(), vec!["b.png"]);
}

#[test]
fn text_bounds_sit_above_baseline() {
    let t = text_layer("t");
    assert_eq!(t.bounds_for_width(80.0), Rect::new(100.0, 168.0, 180.0, 200.0));
    assert_eq!(t.font().css(), "32px Inter");
}
