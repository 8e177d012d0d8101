//! Framecut composites streaming-overlay frame graphics and hit-tests them.
//!
//! A [`Scene`] describes a gradient background, a row of rounded "cutout" windows punched through
//! it, and a stack of text and image layers. The crate paints a scene onto any [`Surface`] and
//! maps pointer input back to layer selections, moves and resizes:
//!
//! - Load and validate a [`Scene`] document
//! - Resolve its images through an [`ImageCache`] and paint it with [`render`] (or
//!   [`render_resolved`] once images are cached)
//! - Feed pointer events to a [`Controller`] and apply the returned [`Proposal`]s
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod foundation;

/// Colors, image decode and caching, fonts.
pub mod assets;
/// Frame export.
pub mod export;
/// Paths, hit tests and resize math.
pub mod geometry;
/// Hit-testing and pointer/keyboard gestures.
pub mod interact;
/// Surfaces and the scene compositor.
pub mod render;
/// Scene model and documents.
pub mod scene;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{FramecutError, FramecutResult};

pub use crate::assets::color::Color;
pub use crate::assets::decode::DecodedImage;
pub use crate::assets::fonts::{
    FixedAdvanceMeasurer, FontBook, FontSpec, FontVariant, TextEngine, TextMeasurer,
};
pub use crate::assets::image_cache::{ImageCache, ImageLoader, UrlImageLoader};
pub use crate::export::png::{encode_png, write_png};
pub use crate::geometry::hit::ResizeHandle;
pub use crate::interact::controller::{
    Controller, HitResult, InteractionMode, InteractionOpts, Proposal, hit_test,
};
pub use crate::interact::pointer::{NudgeKey, PointerMapper};
pub use crate::render::compositor::{
    HandleStyle, RenderOpts, SelectionStyle, render, render_blocking, render_resolved,
    render_thumbnail,
};
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts, ImageQuality};
pub use crate::render::gradient::{Fill, gradient_css, resolve_gradient};
pub use crate::render::recording::{DrawCommand, RecordingSurface};
pub use crate::render::surface::{DropShadow, FrameRGBA, StrokeStyle, Surface};
pub use crate::scene::model::{
    FrameGeometry, GradientDirection, GradientSpec, GradientStop, ImageLayer, Layer, Scene,
    TextLayer,
};
