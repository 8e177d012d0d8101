use super::*;
use crate::scene::model::{GradientDirection, GradientStop, ImageLayer};
use crate::assets::color::Color;

const MINIMAL: &str = r##"{
    "screenWidth": 1000,
    "screenHeight": 500,
    "background": "#ffffff",
    "frame": {"leftWidth": 50, "rightWidth": 50, "topWidth": 50, "bottomWidth": 50,
              "radius": 10, "spacing": 20, "count": 1,
              "innerBorderWidth": 2, "innerBorderColor": "#000"}
}"##;

fn image(id: &str) -> Layer {
    Layer::Image(ImageLayer {
        id: id.to_owned(),
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 10.0,
        url: "a.png".to_owned(),
    })
}

#[test]
fn parses_minimal_document() {
    let scene = Scene::from_json_str(MINIMAL).unwrap();
    scene.validate().unwrap();
    assert_eq!(scene.background.as_solid(), Some(Color::WHITE));
    assert_eq!(scene.frame.inner_border_width, 2.0);
    assert!(scene.layers.is_empty());
    assert!(scene.selected_layer_id.is_none());
}

#[test]
fn json_round_trips_through_camel_case() {
    let mut scene = Scene::new(1920, 1080);
    scene.layers.push(image("img"));
    scene.selected_layer_id = Some("img".to_owned());
    let s = scene.to_json_pretty().unwrap();
    assert!(s.contains("\"selectedLayerId\": \"img\""));
    assert!(s.contains("\"innerBorderColor\""));
    assert_eq!(Scene::from_json_str(&s).unwrap(), scene);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Scene::from_json_str("{").unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));

    let bad_color = MINIMAL.replace("#ffffff", "#nothex");
    assert!(Scene::from_json_str(&bad_color).is_err());
}

#[test]
fn validation_collects_every_issue() {
    let mut scene = Scene::new(0, 100);
    scene.background = GradientSpec::new(GradientDirection::Radial, Vec::new());
    scene.frame.spacing = 0.0;
    scene.layers.push(image("dup"));
    scene.layers.push(image("dup"));
    scene.selected_layer_id = Some("missing".to_owned());

    let msg = scene.validate().unwrap_err().to_string();
    assert!(msg.contains("screenWidth"), "{msg}");
    assert!(msg.contains("$.background: gradient needs at least one stop"), "{msg}");
    assert!(msg.contains("spacing must be >= 1"), "{msg}");
    assert!(msg.contains("$.layers[1]: duplicate layer id 'dup'"), "{msg}");
    assert!(msg.contains("unknown layer 'missing'"), "{msg}");
}

#[test]
fn validation_rejects_out_of_range_stop_and_font_size() {
    let mut scene = Scene::new(100, 100);
    scene.background.stops.push(GradientStop::new(1.5, Color::WHITE));
    let msg = scene.validate().unwrap_err().to_string();
    assert!(msg.contains("$.background.stops[2]: offset must be in [0, 1]"), "{msg}");

    let mut scene = Scene::new(100, 100);
    let mut t = crate::scene::model::TextLayer::new_centered("t", "x", scene.canvas());
    t.font_size = 0.5;
    scene.layers.push(Layer::Text(t));
    let msg = scene.validate().unwrap_err().to_string();
    assert!(msg.contains("fontSize"), "{msg}");
}

#[test]
fn degenerate_geometry_is_not_a_validation_error() {
    let mut scene = Scene::new(100, 100);
    scene.frame.count = 10;
    scene.frame.radius = 500.0;
    assert!(scene.frame.usable_width(100.0) < 0.0);
    scene.validate().unwrap();
}

#[test]
fn write_then_read_path() {
    let dir = std::env::temp_dir().join(format!("framecut-doc-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scene.json");
    let scene = Scene::from_json_str(MINIMAL).unwrap();
    scene.write_path(&path).unwrap();
    assert_eq!(Scene::from_path(&path).unwrap(), scene);
    let _ = std::fs::remove_dir_all(&dir);
}
