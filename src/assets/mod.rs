//! Asset collaborators: colors, image decode and caching, fonts and text shaping.

/// CSS-style color parsing.
pub mod color;
/// Encoded image and `data:` URI decoding.
pub mod decode;
/// Font registry, shaping and text measurement.
pub mod fonts;
/// Url → decoded image cache and loaders.
pub mod image_cache;
