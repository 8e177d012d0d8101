use kurbo::{Rect, Vec2};

use crate::geometry::hit::ResizeHandle;

/// Resize `start` by a pointer `delta` dragged from `handle`, keeping `start`'s aspect ratio.
///
/// Height always derives from width; `delta.y` is ignored. The opposite corner stays fixed.
/// When the width would drop below `min_size` it is clamped there and the height recomputed,
/// without moving the already-computed origin.
pub fn resize_keep_aspect(start: Rect, handle: ResizeHandle, delta: Vec2, min_size: f64) -> Rect {
    let (x0, y0) = (start.x0, start.y0);
    let (w0, h0) = (start.width(), start.height());
    let aspect = w0 / h0;
    let dx = delta.x;

    let mut w = match handle {
        ResizeHandle::Se | ResizeHandle::Ne => w0 + dx,
        ResizeHandle::Sw | ResizeHandle::Nw => w0 - dx,
    };
    let mut h = w / aspect;
    let x = match handle {
        ResizeHandle::Sw | ResizeHandle::Nw => x0 + dx,
        ResizeHandle::Se | ResizeHandle::Ne => x0,
    };
    let y = match handle {
        ResizeHandle::Ne | ResizeHandle::Nw => y0 + (h0 - h),
        ResizeHandle::Se | ResizeHandle::Sw => y0,
    };

    if w < min_size {
        w = min_size;
        h = min_size / aspect;
    }

    Rect::new(x, y, x + w, y + h)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resize.rs"]
mod tests;
