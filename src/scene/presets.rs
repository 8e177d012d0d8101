use crate::assets::color::Color;
use crate::foundation::core::Canvas;
use crate::scene::model::{
    GradientDirection, GradientSpec, GradientStop, ImageLayer, OutlineEffect, ShadowEffect,
    TextEffects, TextLayer,
};

pub(crate) const DEFAULT_BORDER: f64 = 50.0;
pub(crate) const DEFAULT_SPACING: f64 = 20.0;
pub(crate) const DEFAULT_RADIUS: f64 = 10.0;
pub(crate) const DEFAULT_COUNT: u32 = 1;
pub(crate) const DEFAULT_INNER_BORDER_WIDTH: f64 = 1.0;

/// Default document size.
pub const DEFAULT_SCREEN: Canvas = Canvas {
    width: 2560,
    height: 1440,
};

/// Default font family for new text layers.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Default font size for new text layers.
pub const DEFAULT_FONT_SIZE: f64 = 32.0;

/// Widest an uploaded image is placed at initially.
pub const MAX_INITIAL_IMAGE_WIDTH: f64 = 400.0;

/// A named screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Display name.
    pub name: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Size as a canvas.
    pub fn canvas(self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

/// Screen sizes offered by the editor.
pub const COMMON_RESOLUTIONS: &[Resolution] = &[
    Resolution {
        name: "HD",
        width: 1366,
        height: 768,
    },
    Resolution {
        name: "Full HD",
        width: 1920,
        height: 1080,
    },
    Resolution {
        name: "QHD",
        width: 2560,
        height: 1440,
    },
    Resolution {
        name: "4K UHD",
        width: 3840,
        height: 2160,
    },
    Resolution {
        name: "Mobile",
        width: 1080,
        height: 1920,
    },
];

/// Look up a resolution by display name (case-insensitive).
pub fn resolution(name: &str) -> Option<Resolution> {
    COMMON_RESOLUTIONS
        .iter()
        .copied()
        .find(|r| r.name.eq_ignore_ascii_case(name))
}

/// A named stop list; stops are `(offset, 0xRRGGBB)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientPreset {
    /// Display name.
    pub name: &'static str,
    stops: &'static [(f64, u32)],
}

impl GradientPreset {
    /// Stops as scene values.
    pub fn stops(&self) -> Vec<GradientStop> {
        self.stops
            .iter()
            .map(|&(offset, rgb)| GradientStop::new(offset, rgb_hex(rgb)))
            .collect()
    }

    /// Gradient along `direction`.
    pub fn spec(&self, direction: GradientDirection) -> GradientSpec {
        GradientSpec::new(direction, self.stops())
    }
}

fn rgb_hex(rgb: u32) -> Color {
    Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Gradient swatches offered by the editor.
pub const GRADIENT_PRESETS: &[GradientPreset] = &[
    GradientPreset {
        name: "Sunset Serenity",
        stops: &[(0.0, 0xff5e62), (1.0, 0xff9966)],
    },
    GradientPreset {
        name: "Ocean Breeze",
        stops: &[(0.0, 0x3494e6), (1.0, 0xec6ead)],
    },
    GradientPreset {
        name: "Mystic Purple",
        stops: &[(0.0, 0x7f00ff), (1.0, 0xe100ff)],
    },
    GradientPreset {
        name: "Fresh Mint",
        stops: &[(0.0, 0x45b649), (1.0, 0xa8e063)],
    },
    GradientPreset {
        name: "Golden Hour",
        stops: &[(0.0, 0xf7971e), (1.0, 0xffd200)],
    },
    GradientPreset {
        name: "Aqua Splash",
        stops: &[(0.0, 0x13547a), (1.0, 0x80d0c7)],
    },
    GradientPreset {
        name: "Berry Smoothie",
        stops: &[(0.0, 0xda4453), (1.0, 0x89216b)],
    },
    GradientPreset {
        name: "Forest Canopy",
        stops: &[(0.0, 0x43a047), (1.0, 0x1b5e20)],
    },
    GradientPreset {
        name: "Twilight Sparkle",
        stops: &[(0.0, 0x2c3e50), (1.0, 0x3498db)],
    },
    GradientPreset {
        name: "Vibrant Bloom",
        stops: &[(0.0, 0xf45c43), (1.0, 0xeb3349)],
    },
    GradientPreset {
        name: "Tropical Fusion",
        stops: &[(0.0, 0xd4fc79), (0.5, 0x96e6a1), (1.0, 0x33ab9f)],
    },
    GradientPreset {
        name: "Aurora Borealis",
        stops: &[(0.0, 0x00c6fb), (0.5, 0x005bea), (1.0, 0xa4508b)],
    },
    GradientPreset {
        name: "Peach Melba",
        stops: &[(0.0, 0xffb347), (0.5, 0xffcc33), (1.0, 0xf54ea2)],
    },
    GradientPreset {
        name: "Electric Violet",
        stops: &[(0.0, 0x4776e6), (1.0, 0x8e54e9)],
    },
    GradientPreset {
        name: "Lime Soda",
        stops: &[(0.0, 0xc3e88d), (1.0, 0x7ec458)],
    },
    GradientPreset {
        name: "Soft Pastel",
        stops: &[(0.0, 0xf9d423), (0.5, 0xff4e50), (1.0, 0xf9d4ff)],
    },
    GradientPreset {
        name: "Deep Sea",
        stops: &[(0.0, 0x232526), (1.0, 0x414345)],
    },
    GradientPreset {
        name: "Candy Pop",
        stops: &[(0.0, 0xff9a9e), (0.5, 0xfecfef), (1.0, 0xfad0c4)],
    },
    GradientPreset {
        name: "Blue Raspberry",
        stops: &[(0.0, 0x00b4db), (1.0, 0x0083b0)],
    },
    GradientPreset {
        name: "Sunset Horizon",
        stops: &[(0.0, 0xfe8c00), (0.5, 0xf83600), (1.0, 0xfe8c00)],
    },
];

/// Look up a gradient preset by display name (case-insensitive).
pub fn gradient_preset(name: &str) -> Option<&'static GradientPreset> {
    GRADIENT_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Default document background: diagonal `#cc208e → #6713d2`.
pub fn default_background() -> GradientSpec {
    GradientSpec::new(
        GradientDirection::Diagonal,
        vec![
            GradientStop::new(0.0, rgb_hex(0xcc208e)),
            GradientStop::new(1.0, rgb_hex(0x6713d2)),
        ],
    )
}

impl TextLayer {
    /// New text layer centered on `screen` with the editor defaults.
    pub fn new_centered(id: impl Into<String>, text: impl Into<String>, screen: Canvas) -> Self {
        Self {
            id: id.into(),
            x: f64::from(screen.width) / 2.0,
            y: f64::from(screen.height) / 2.0,
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            color: Color::BLACK,
            bold: false,
            italic: false,
            underline: false,
            effects: TextEffects {
                shadow: ShadowEffect::default(),
                outline: OutlineEffect::default(),
            },
        }
    }
}

impl ImageLayer {
    /// New image layer for a `natural_width × natural_height` source, at most
    /// [`MAX_INITIAL_IMAGE_WIDTH`] wide with the aspect ratio kept, centered on `screen`.
    pub fn fit_centered(
        id: impl Into<String>,
        url: impl Into<String>,
        natural_width: f64,
        natural_height: f64,
        screen: Canvas,
    ) -> Self {
        let aspect = natural_width / natural_height;
        let width = MAX_INITIAL_IMAGE_WIDTH.min(natural_width);
        let height = width / aspect;
        Self {
            id: id.into(),
            x: f64::from(screen.width) / 2.0 - width / 2.0,
            y: f64::from(screen.height) / 2.0 - height / 2.0,
            width,
            height,
            url: url.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/presets.rs"]
mod tests;
