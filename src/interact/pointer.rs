use std::str::FromStr;

use crate::foundation::core::{Canvas, Point, Rect, Vec2};
use crate::foundation::error::FramecutError;

/// Maps client (screen) coordinates onto canvas pixels for a canvas displayed in `element`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    /// Displayed element bounds in client coordinates.
    pub element: Rect,
    /// Canvas backing size.
    pub canvas: Canvas,
}

impl PointerMapper {
    /// Mapper for a canvas shown at `element`.
    pub fn new(element: Rect, canvas: Canvas) -> Self {
        Self { element, canvas }
    }

    /// `(client − element.origin) × canvas / element.size`, or `None` for a collapsed element.
    pub fn to_canvas(&self, client: Point) -> Option<Point> {
        let (w, h) = (self.element.width(), self.element.height());
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        let sx = f64::from(self.canvas.width) / w;
        let sy = f64::from(self.canvas.height) / h;
        Some(Point::new(
            (client.x - self.element.x0) * sx,
            (client.y - self.element.y0) * sy,
        ))
    }
}

/// Arrow key used to nudge the selected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NudgeKey {
    /// ArrowLeft.
    Left,
    /// ArrowRight.
    Right,
    /// ArrowUp.
    Up,
    /// ArrowDown.
    Down,
}

impl NudgeKey {
    /// Translation for one press moving `step` units.
    pub fn delta(self, step: f64) -> Vec2 {
        match self {
            NudgeKey::Left => Vec2::new(-step, 0.0),
            NudgeKey::Right => Vec2::new(step, 0.0),
            NudgeKey::Up => Vec2::new(0.0, -step),
            NudgeKey::Down => Vec2::new(0.0, step),
        }
    }
}

impl FromStr for NudgeKey {
    type Err = FramecutError;

    /// Accepts DOM key names (`ArrowLeft`) and bare directions (`left`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("Arrow").unwrap_or(s);
        match name.to_ascii_lowercase().as_str() {
            "left" => Ok(NudgeKey::Left),
            "right" => Ok(NudgeKey::Right),
            "up" => Ok(NudgeKey::Up),
            "down" => Ok(NudgeKey::Down),
            _ => Err(FramecutError::validation(format!("not an arrow key: '{s}'"))),
        }
    }
}
