//! Geometry primitives shared by the renderer and the interaction controller.

/// Point-in-bounds and resize-handle tests.
pub mod hit;
/// Rounded-rectangle path construction.
pub mod path;
/// Aspect-preserving resize math.
pub mod resize;
