use crate::assets::color::Color;
use crate::foundation::core::{Canvas, Point};
use crate::scene::model::{GradientDirection, GradientSpec, GradientStop};

/// A paintable fill produced by [`resolve_gradient`].
///
/// Gradient stops are always sorted ascending by offset.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    /// Uniform color.
    Solid(Color),
    /// Linear gradient along `start → end`.
    Linear {
        /// Offset 0 point.
        start: Point,
        /// Offset 1 point.
        end: Point,
        /// Sorted stops.
        stops: Vec<GradientStop>,
    },
    /// Radial gradient from `center` (offset 0) out to `radius` (offset 1).
    Radial {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Sorted stops.
        stops: Vec<GradientStop>,
    },
}

impl Fill {
    /// Solid color, if this fill is uniform.
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Fill::Solid(c) => Some(*c),
            _ => None,
        }
    }

    /// Color this fill paints at `p`.
    ///
    /// Positions before the first stop take its color and positions after the last stop take
    /// the last color. A zero-length gradient vector paints nothing.
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Fill::Solid(c) => *c,
            Fill::Linear { start, end, stops } => {
                let v = *end - *start;
                let len2 = v.hypot2();
                if len2 <= 0.0 {
                    return Color::TRANSPARENT;
                }
                let t = (p - *start).dot(v) / len2;
                color_at_offset(stops, t)
            }
            Fill::Radial {
                center,
                radius,
                stops,
            } => {
                if *radius <= 0.0 {
                    return Color::TRANSPARENT;
                }
                color_at_offset(stops, (p - *center).hypot() / radius)
            }
        }
    }
}

fn color_at_offset(stops: &[GradientStop], t: f64) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::TRANSPARENT;
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t < b.offset {
            let span = b.offset - a.offset;
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    last.color
}

/// Map a gradient description onto a fill for a `canvas`-sized target.
///
/// One stop collapses to a solid fill regardless of direction; no stops resolve to transparent.
pub fn resolve_gradient(spec: &GradientSpec, canvas: Canvas) -> Fill {
    if let Some(c) = spec.as_solid() {
        return Fill::Solid(c);
    }
    let stops = spec.sorted_stops();
    if stops.is_empty() {
        return Fill::Solid(Color::TRANSPARENT);
    }
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let linear = |x1: f64, y1: f64, x2: f64, y2: f64, stops: Vec<GradientStop>| Fill::Linear {
        start: Point::new(x1, y1),
        end: Point::new(x2, y2),
        stops,
    };
    match spec.direction {
        GradientDirection::TopBottom => linear(0.0, 0.0, 0.0, h, stops),
        GradientDirection::LeftRight => linear(0.0, 0.0, w, 0.0, stops),
        GradientDirection::Diagonal => linear(0.0, 0.0, w, h, stops),
        GradientDirection::DiagonalReverse => linear(w, 0.0, 0.0, h, stops),
        GradientDirection::Radial => Fill::Radial {
            center: Point::new(w / 2.0, h / 2.0),
            radius: w.hypot(h) / 2.0,
            stops,
        },
    }
}

/// CSS `background` value for a sidebar swatch of `spec`.
pub fn gradient_css(spec: &GradientSpec) -> String {
    if let Some(c) = spec.as_solid() {
        return c.to_hex();
    }
    let stops = spec
        .sorted_stops()
        .iter()
        .map(|s| format!("{} {}%", s.color, s.offset * 100.0))
        .collect::<Vec<_>>()
        .join(", ");
    match spec.direction {
        GradientDirection::TopBottom => format!("linear-gradient(to bottom, {stops})"),
        GradientDirection::LeftRight => format!("linear-gradient(to right, {stops})"),
        GradientDirection::Diagonal => format!("linear-gradient(135deg, {stops})"),
        GradientDirection::DiagonalReverse => format!("linear-gradient(-135deg, {stops})"),
        GradientDirection::Radial => format!("radial-gradient(circle, {stops})"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
