use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{FramecutError, FramecutResult};

/// Font selection for one text run: family key, pixel size, weight and slant.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Family key into the [`FontBook`].
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
}

impl FontSpec {
    /// Regular-weight upright spec.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Font description in CSS shorthand order: `[italic ][bold ]<size>px <family>`.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.italic {
            out.push_str("italic ");
        }
        if self.bold {
            out.push_str("bold ");
        }
        out.push_str(&format!("{}px {}", self.size, self.family));
        out
    }

    fn variant(&self) -> FontVariant {
        FontVariant {
            bold: self.bold,
            italic: self.italic,
        }
    }
}

/// Text-measurement capability consumed by hit-testing and selection decoration.
pub trait TextMeasurer {
    /// Advance width of `text` under `font`, or `None` when it cannot be measured.
    fn measure(&mut self, font: &FontSpec, text: &str) -> Option<f64>;
}

/// Measurer that assumes every char advances by `advance_em × size`.
///
/// Useful for hosts without font data and for deterministic tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Advance per char as a fraction of the font size.
    pub advance_em: f64,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&mut self, font: &FontSpec, text: &str) -> Option<f64> {
        Some(text.chars().count() as f64 * font.size * self.advance_em)
    }
}

/// Weight/slant slot a face is registered under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontVariant {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
}

impl FontVariant {
    /// Upright regular weight.
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
    };
}

/// Raw font bytes chosen for a [`FontSpec`].
#[derive(Clone, Debug)]
pub struct FontFace {
    /// Normalized family key.
    pub key: String,
    /// Variant slot the bytes were registered under.
    pub variant: FontVariant,
    /// Font file bytes (TTF/OTF).
    pub bytes: Arc<Vec<u8>>,
}

/// Known font set: family key → font bytes per weight/slant.
///
/// Lookups are case-insensitive. A missing variant falls back to the closest registered one of
/// the same family, and an unknown family falls back to the configured fallback family.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: HashMap<(String, FontVariant), Arc<Vec<u8>>>,
    fallback_family: Option<String>,
}

impl FontBook {
    /// Empty font book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes for `family` in the `variant` slot.
    pub fn register(&mut self, family: &str, variant: FontVariant, bytes: Vec<u8>) {
        let key = family_key(family);
        if self.fallback_family.is_none() {
            self.fallback_family = Some(key.clone());
        }
        self.faces.insert((key, variant), Arc::new(bytes));
    }

    /// Read a font file from disk and register it.
    pub fn register_file(
        &mut self,
        family: &str,
        variant: FontVariant,
        path: impl AsRef<Path>,
    ) -> FramecutResult<()> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        self.register(family, variant, bytes);
        Ok(())
    }

    /// Family used when a spec names an unregistered family (defaults to the first registered).
    pub fn set_fallback_family(&mut self, family: &str) {
        self.fallback_family = Some(family_key(family));
    }

    /// Return `true` when no faces are registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Pick the face for `spec`.
    pub fn face_for(&self, spec: &FontSpec) -> Option<FontFace> {
        let key = family_key(&spec.family);
        self.face_in_family(&key, spec.variant()).or_else(|| {
            let fb = self.fallback_family.as_deref()?;
            if fb == key {
                return None;
            }
            self.face_in_family(fb, spec.variant())
        })
    }

    fn face_in_family(&self, key: &str, want: FontVariant) -> Option<FontFace> {
        let order = [
            want,
            FontVariant {
                bold: want.bold,
                italic: false,
            },
            FontVariant {
                bold: false,
                italic: want.italic,
            },
            FontVariant::REGULAR,
            FontVariant {
                bold: true,
                italic: false,
            },
            FontVariant {
                bold: false,
                italic: true,
            },
            FontVariant {
                bold: true,
                italic: true,
            },
        ];
        order.into_iter().find_map(|variant| {
            self.faces
                .get(&(key.to_owned(), variant))
                .map(|bytes| FontFace {
                    key: key.to_owned(),
                    variant,
                    bytes: bytes.clone(),
                })
        })
    }
}

fn family_key(family: &str) -> String {
    family.trim().trim_matches(['"', '\'']).to_ascii_lowercase()
}

/// One glyph positioned relative to the text origin (baseline-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// Glyph id in the face.
    pub id: u32,
    /// X offset from the origin.
    pub x: f32,
    /// Y offset from the baseline.
    pub y: f32,
}

/// Shaped single-line text ready to paint.
#[derive(Clone, Debug)]
pub struct ShapedText {
    /// Face the glyph ids refer to.
    pub face: FontFace,
    /// Font size in pixels.
    pub size: f32,
    /// Total advance width.
    pub width: f64,
    /// Glyphs in visual order.
    pub glyphs: Vec<PositionedGlyph>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct GlyphBrush;

/// Parley-backed shaping and measurement over a [`FontBook`].
pub struct TextEngine {
    book: FontBook,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
    registered: HashMap<(String, FontVariant), String>,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("book", &self.book)
            .field("registered", &self.registered.len())
            .finish()
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new(FontBook::default())
    }
}

impl TextEngine {
    /// Construct an engine with fresh Parley contexts.
    pub fn new(book: FontBook) -> Self {
        Self {
            book,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Fonts available to this engine.
    pub fn book(&self) -> &FontBook {
        &self.book
    }

    /// Mutable access to the fonts; newly registered faces are picked up on next use.
    pub fn book_mut(&mut self) -> &mut FontBook {
        &mut self.book
    }

    fn family_name_for(&mut self, face: &FontFace) -> FramecutResult<String> {
        let slot = (face.key.clone(), face.variant);
        if let Some(name) = self.registered.get(&slot) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| FramecutError::font("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FramecutError::font("registered font family has no name"))?
            .to_string();
        self.registered.insert(slot, name.clone());
        Ok(name)
    }

    /// Shape `text` as a single unwrapped line.
    pub fn shape(&mut self, spec: &FontSpec, text: &str) -> FramecutResult<ShapedText> {
        let size_px = spec.size as f32;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FramecutError::validation(
                "font size must be finite and > 0",
            ));
        }
        let face = self.book.face_for(spec).ok_or_else(|| {
            FramecutError::font(format!("no font registered for family '{}'", spec.family))
        })?;
        let family_name = self.family_name_for(&face)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(if spec.bold {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        }));
        builder.push_default(parley::style::StyleProperty::FontStyle(if spec.italic {
            parley::style::FontStyle::Italic
        } else {
            parley::style::FontStyle::Normal
        }));
        builder.push_default(parley::style::StyleProperty::Brush(GlyphBrush));

        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let mut baseline = None::<f32>;
        for line in layout.lines() {
            let line_baseline = *baseline.get_or_insert(line.metrics().baseline);
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PositionedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - line_baseline,
                }));
            }
        }

        Ok(ShapedText {
            face,
            size: size_px,
            width: f64::from(layout.full_width()),
            glyphs,
        })
    }
}

impl TextMeasurer for TextEngine {
    fn measure(&mut self, font: &FontSpec, text: &str) -> Option<f64> {
        match self.shape(font, text) {
            Ok(shaped) => Some(shaped.width),
            Err(e) => {
                tracing::debug!(font = %font.css(), error = %e, "text measurement unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
