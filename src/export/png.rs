use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{FramecutError, FramecutResult};
use crate::foundation::math::unpremul_px;
use crate::render::surface::FrameRGBA;

/// Straight (un-premultiplied) RGBA8 bytes of `frame`.
pub fn straight_rgba8(frame: &FrameRGBA) -> FramecutResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(FramecutError::validation(format!(
            "frame has {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    if !frame.premultiplied {
        return Ok(frame.data.clone());
    }
    let mut out = Vec::with_capacity(expected);
    for px in frame.data.chunks_exact(4) {
        out.extend_from_slice(&unpremul_px([px[0], px[1], px[2], px[3]]));
    }
    Ok(out)
}

/// Encode `frame` as a PNG with straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> FramecutResult<Vec<u8>> {
    if frame.width == 0 || frame.height == 0 {
        return Err(FramecutError::validation("cannot encode an empty frame"));
    }
    let rgba = straight_rgba8(frame)?;
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| FramecutError::render("frame buffer does not match its size"))?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode `frame` and write it to `path`, creating parent directories.
pub fn write_png(path: impl AsRef<Path>, frame: &FrameRGBA) -> FramecutResult<()> {
    let path = path.as_ref();
    let bytes = encode_png(frame)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
