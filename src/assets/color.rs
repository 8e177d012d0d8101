use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::FramecutError;

/// Straight-alpha color with normalized `0..=1` channels.
///
/// Parsed from the CSS color strings the editor stores (`#rgb`, `#rgba`, `#rrggbb`,
/// `#rrggbbaa`, `rgb(..)`, `rgba(..)`, `transparent`) and serialized back as hex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build a color from normalized channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Build a color from 8-bit straight-alpha channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Quantize to straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Quantize to premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let g = (self.g.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let b = (self.b.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);

        Rgba8Premul {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }

    /// Linear interpolation in straight-alpha space.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Hex representation; alpha is only emitted when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = FramecutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_css(s).map_err(FramecutError::validation)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_css(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
        }
    }
}

fn parse_css(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Ok(Color::TRANSPARENT);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| format!("unterminated color function \"{s}\""))?;
        return parse_rgb_fn(body);
    }
    Err(format!(
        "unsupported color \"{s}\" (expected #hex, rgb(), rgba() or transparent)"
    ))
}

fn parse_hex(s: &str) -> Result<Color, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let b = s.as_bytes();
    let short = |i: usize| -> Result<u8, String> { nibble(b[i]).map(|n| n * 17) };
    let long = |i: usize| -> Result<u8, String> { Ok(nibble(b[i])? * 16 + nibble(b[i + 1])?) };

    let (r, g, bl, a) = match b.len() {
        3 => (short(0)?, short(1)?, short(2)?, 255),
        4 => (short(0)?, short(1)?, short(2)?, short(3)?),
        6 => (long(0)?, long(2)?, long(4)?, 255),
        8 => (long(0)?, long(2)?, long(4)?, long(6)?),
        _ => {
            return Err(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned(),
            );
        }
    };
    Ok(Color::from_rgba8(r, g, bl, a))
}

fn parse_rgb_fn(body: &str) -> Result<Color, String> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("rgb()/rgba() takes 3 or 4 components, got {}", parts.len()));
    }

    fn channel(p: &str) -> Result<f64, String> {
        if let Some(pct) = p.strip_suffix('%') {
            let v: f64 = pct
                .trim()
                .parse()
                .map_err(|_| format!("invalid percentage \"{p}\""))?;
            return Ok((v / 100.0).clamp(0.0, 1.0));
        }
        let v: f64 = p.parse().map_err(|_| format!("invalid channel \"{p}\""))?;
        Ok((v / 255.0).clamp(0.0, 1.0))
    }

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        None => 1.0,
        Some(p) => {
            if let Some(pct) = p.strip_suffix('%') {
                let v: f64 = pct
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid alpha \"{p}\""))?;
                (v / 100.0).clamp(0.0, 1.0)
            } else {
                let v: f64 = p.parse().map_err(|_| format!("invalid alpha \"{p}\""))?;
                v.clamp(0.0, 1.0)
            }
        }
    };
    Ok(Color::rgba(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
