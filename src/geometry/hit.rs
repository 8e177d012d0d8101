use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rect};

/// Corner handle of a selected image layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top-left.
    Nw,
    /// Top-right.
    Ne,
    /// Bottom-left.
    Sw,
    /// Bottom-right.
    Se,
}

impl ResizeHandle {
    /// Hit-test order.
    pub const ALL: [ResizeHandle; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    /// Short lowercase name (`"nw"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::Ne => "ne",
            Self::Sw => "sw",
            Self::Se => "se",
        }
    }

    /// Corner of `rect` this handle sits on.
    pub fn corner(self, rect: Rect) -> Point {
        match self {
            Self::Nw => Point::new(rect.x0, rect.y0),
            Self::Ne => Point::new(rect.x1, rect.y0),
            Self::Sw => Point::new(rect.x0, rect.y1),
            Self::Se => Point::new(rect.x1, rect.y1),
        }
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive point-in-rect test; edges count as inside.
pub fn point_in_rect(p: Point, rect: Rect) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Square of side `size` whose top-left sits `offset` up and left of the handle's corner.
pub fn handle_rect(rect: Rect, handle: ResizeHandle, size: f64, offset: f64) -> Rect {
    let c = handle.corner(rect);
    Rect::new(c.x - offset, c.y - offset, c.x - offset + size, c.y - offset + size)
}

/// First handle (in [`ResizeHandle::ALL`] order) whose square contains `p`.
pub fn handle_at(p: Point, rect: Rect, size: f64, offset: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .into_iter()
        .find(|&h| point_in_rect(p, handle_rect(rect, h, size, offset)))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/hit.rs"]
mod tests;
