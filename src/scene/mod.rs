//! Declarative frame documents.
//!
//! A [`model::Scene`] is owned by the host; the engine only reads it.

/// JSON load/save and validation.
pub mod document;
/// Scene data model.
pub mod model;
/// Defaults, resolutions, gradient presets and layer factories.
pub mod presets;
