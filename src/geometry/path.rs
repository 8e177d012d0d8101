use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Arc, BezPath, Rect, Vec2};

/// Flattening tolerance for arcs in cutout and selection geometry.
pub const ARC_TOLERANCE: f64 = 0.1;

/// Closed rounded-rectangle path over `rect` with corner radius `radius`.
///
/// The path starts at `(left + r, top)` and runs clockwise, turning each corner with a quarter
/// arc centered `r` in from both edges. `r <= 0` yields square corners. Radii larger than half a
/// side are not clamped, so the arcs overlap; inverted rects (right < left) are traced as-is.
pub fn rounded_rect_path(rect: Rect, radius: f64, tolerance: f64) -> BezPath {
    let Rect { x0, y0, x1, y1 } = rect;
    let mut p = BezPath::new();

    if radius <= 0.0 || !radius.is_finite() {
        p.move_to((x0, y0));
        p.line_to((x1, y0));
        p.line_to((x1, y1));
        p.line_to((x0, y1));
        p.close_path();
        return p;
    }

    let r = radius;
    let radii = Vec2::new(r, r);
    let corner = |p: &mut BezPath, cx: f64, cy: f64, start: f64| {
        let arc = Arc::new((cx, cy), radii, start, FRAC_PI_2, 0.0);
        for el in arc.append_iter(tolerance) {
            p.push(el);
        }
    };

    p.move_to((x0 + r, y0));
    p.line_to((x1 - r, y0));
    corner(&mut p, x1 - r, y0 + r, -FRAC_PI_2);
    p.line_to((x1, y1 - r));
    corner(&mut p, x1 - r, y1 - r, 0.0);
    p.line_to((x0 + r, y1));
    corner(&mut p, x0 + r, y1 - r, FRAC_PI_2);
    p.line_to((x0, y0 + r));
    corner(&mut p, x0 + r, y0 + r, PI);
    p.close_path();
    p
}

/// Closed axis-aligned rectangle path, clockwise from the top-left corner.
pub fn rect_path(rect: Rect) -> BezPath {
    rounded_rect_path(rect, 0.0, ARC_TOLERANCE)
}

/// Open two-point line path.
pub fn line_path(from: kurbo::Point, to: kurbo::Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(from);
    p.line_to(to);
    p
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
