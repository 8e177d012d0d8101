use crate::foundation::core::{Affine, BezPath, Canvas};
use crate::geometry::path::{ARC_TOLERANCE, rounded_rect_path};
use crate::render::surface::{StrokeStyle, Surface};
use crate::scene::model::FrameGeometry;

/// Rounded cutout paths in canvas coordinates, left to right. Empty when `count` is zero.
///
/// Degenerate geometry (non-positive usable width) is traced as-is.
pub fn cutout_paths(frame: &FrameGeometry, canvas: Canvas) -> Vec<BezPath> {
    let local = rounded_rect_path(frame.cutout_rect(canvas), frame.radius, ARC_TOLERANCE);
    (0..frame.count)
        .map(|i| {
            let dx = frame.cutout_offset(canvas, i);
            Affine::translate((dx, 0.0)) * &local
        })
        .collect()
}

/// Punch every cutout out of what is already on `surface`, then stroke the inner borders.
pub(crate) fn draw_cutouts<S: Surface + ?Sized>(surface: &mut S, frame: &FrameGeometry, canvas: Canvas) {
    let paths = cutout_paths(frame, canvas);
    for path in &paths {
        surface.erase_path(path);
    }
    if frame.inner_border_width > 0.0 {
        let style = StrokeStyle::new(frame.inner_border_width);
        for path in &paths {
            surface.stroke_path(path, &style, frame.inner_border_color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cutout.rs"]
mod tests;
