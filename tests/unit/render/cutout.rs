use super::*;
use crate::assets::color::Color;
use crate::render::recording::{DrawCommand, RecordingSurface};
use kurbo::Shape;

fn canvas() -> Canvas {
    Canvas {
        width: 1000,
        height: 500,
    }
}

#[test]
fn single_cutout_spans_the_inner_area() {
    let frame = FrameGeometry::default();
    let paths = cutout_paths(&frame, canvas());
    assert_eq!(paths.len(), 1);
    let bb = paths[0].bounding_box();
    assert!((bb.x0 - 50.0).abs() < 1e-6 && (bb.x1 - 950.0).abs() < 1e-6);
    assert!((bb.y0 - 50.0).abs() < 1e-6 && (bb.y1 - 450.0).abs() < 1e-6);
}

#[test]
fn cutouts_repeat_with_spacing() {
    let frame = FrameGeometry {
        count: 3,
        ..FrameGeometry::default()
    };
    // usable = (1000 - 40 - 100) / 3
    let usable = 860.0 / 3.0;
    let paths = cutout_paths(&frame, canvas());
    assert_eq!(paths.len(), 3);
    for (i, p) in paths.iter().enumerate() {
        let x0 = 50.0 + i as f64 * (usable + 20.0);
        let bb = p.bounding_box();
        assert!((bb.x0 - x0).abs() < 1e-6, "cutout {i}: {bb:?}");
        assert!((bb.width() - usable).abs() < 1e-6);
    }
}

#[test]
fn punches_all_before_stroking_borders() {
    let frame = FrameGeometry {
        count: 2,
        inner_border_width: 2.0,
        inner_border_color: Color::BLACK,
        ..FrameGeometry::default()
    };
    let mut s = RecordingSurface::new(canvas());
    draw_cutouts(&mut s, &frame, canvas());
    let kinds: Vec<&str> = s
        .commands()
        .iter()
        .map(|c| match c {
            DrawCommand::ErasePath { .. } => "erase",
            DrawCommand::StrokePath { .. } => "stroke",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["erase", "erase", "stroke", "stroke"]);
    let DrawCommand::StrokePath { style, color, .. } = &s.commands()[2] else {
        unreachable!()
    };
    assert_eq!(style.width, 2.0);
    assert!(style.dash.is_empty());
    assert_eq!(*color, Color::BLACK);
}

#[test]
fn zero_count_and_zero_border_draw_nothing_extra() {
    let mut s = RecordingSurface::new(canvas());
    let none = FrameGeometry {
        count: 0,
        ..FrameGeometry::default()
    };
    draw_cutouts(&mut s, &none, canvas());
    assert!(s.commands().is_empty());

    let borderless = FrameGeometry {
        inner_border_width: 0.0,
        ..FrameGeometry::default()
    };
    draw_cutouts(&mut s, &borderless, canvas());
    assert_eq!(s.commands().len(), 1);
}

#[test]
fn degenerate_usable_width_still_produces_paths() {
    let frame = FrameGeometry {
        count: 40,
        ..FrameGeometry::default()
    };
    assert!(frame.usable_width(1000.0) < 0.0);
    let paths = cutout_paths(&frame, canvas());
    assert_eq!(paths.len(), 40);
}
