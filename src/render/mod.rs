//! Scene compositing.
//!
//! [`compositor::render`] paints a [`crate::Scene`] onto any [`surface::Surface`]:
//! background gradient, cutouts punched with destination-out, inner borders, then layers.

/// Scene compositor entry points and render options.
pub mod compositor;
/// Software surface backed by `vello_cpu`.
pub mod cpu;
/// Frame cutout paths and drawing.
pub mod cutout;
/// Gradient resolver and CSS preview strings.
pub mod gradient;
/// Layer renderer.
pub(crate) mod layers;
pub(crate) mod pixels;
/// Surface that records draw calls.
pub mod recording;
/// The paint collaborator trait and frame buffer type.
pub mod surface;
