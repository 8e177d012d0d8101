use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{FramecutError, FramecutResult};

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap already-premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> FramecutResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if bytes.len() != expected {
            return Err(FramecutError::decode(format!(
                "pixel buffer has {} bytes, expected {expected} for {width}x{height}",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> FramecutResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(FramecutError::decode("decoded image has zero size"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Payload of a `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    /// Declared media type, `text/plain` when omitted.
    pub mime: String,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

/// Return `true` when `url` uses the `data:` scheme.
pub fn is_data_uri(url: &str) -> bool {
    url.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Parse a `data:[<mime>][;base64],<payload>` URI.
pub fn parse_data_uri(url: &str) -> FramecutResult<DataUri> {
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .and_then(|_| url.get(5..))
        .ok_or_else(|| FramecutError::decode("not a data: uri"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| FramecutError::decode("data: uri is missing ','"))?;

    let mut params = header.split(';');
    let mime = match params.next().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
        _ => "text/plain".to_owned(),
    };
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| FramecutError::decode(format!("invalid base64 payload: {e}")))?
    } else {
        percent_decode(payload)?
    };

    Ok(DataUri { mime, bytes })
}

fn percent_decode(s: &str) -> FramecutResult<Vec<u8>> {
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        if b[i] == b'%' {
            let hex = s
                .get(i + 1..i + 3)
                .ok_or_else(|| FramecutError::decode("truncated percent escape"))?;
            let v = u8::from_str_radix(hex, 16)
                .map_err(|_| FramecutError::decode(format!("invalid percent escape \"%{hex}\"")))?;
            out.push(v);
            i += 3;
        } else {
            out.push(b[i]);
            i += 1;
        }
    }
    Ok(out)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
