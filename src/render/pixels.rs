use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};

fn check_same_len(a: &[u8], b: &[u8], op: &str) -> FramecutResult<()> {
    if a.len() != b.len() || !a.len().is_multiple_of(4) {
        return Err(FramecutError::render(format!(
            "{op} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

/// Fill a premultiplied buffer with one color.
pub(crate) fn fill(dst: &mut [u8], color: Rgba8Premul) {
    let px = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

/// Source-over: `dst = src + dst × (1 − src.a)`.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> FramecutResult<()> {
    check_same_len(dst, src, "over_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        d[3] = add_sat_u8(s[3], mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            d[c] = add_sat_u8(s[c], mul_div255_u8(u16::from(d[c]), inv));
        }
    }
    Ok(())
}

/// Destination-out: `dst = dst × (1 − mask.a)`. Mask color channels are ignored.
pub(crate) fn erase_in_place(dst: &mut [u8], mask: &[u8]) -> FramecutResult<()> {
    check_same_len(dst, mask, "erase_in_place")?;
    for (d, m) in dst.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let ma = u16::from(m[3]);
        if ma == 0 {
            continue;
        }
        let keep = 255 - ma;
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), keep);
        }
    }
    Ok(())
}

/// Replace every covered pixel of `coverage` with `shade(x, y)` scaled by its coverage alpha.
///
/// `shade` returns premultiplied RGBA and is only called where coverage is non-zero.
pub(crate) fn shade_coverage(coverage: &mut [u8], width: u32, shade: impl Fn(u32, u32) -> [u8; 4]) {
    let w = width.max(1) as usize;
    for (i, px) in coverage.chunks_exact_mut(4).enumerate() {
        let cov = u16::from(px[3]);
        if cov == 0 {
            continue;
        }
        let c = shade((i % w) as u32, (i / w) as u32);
        for k in 0..4 {
            px[k] = mul_div255_u8(u16::from(c[k]), cov);
        }
    }
}

/// Shadow silhouette of `src`: its alpha tinted with `color`, shifted by `(dx, dy)` whole pixels.
pub(crate) fn shadow_from_alpha(
    src: &[u8],
    width: u32,
    height: u32,
    color: Rgba8Premul,
    dx: i32,
    dy: i32,
) -> Vec<u8> {
    let mut out = vec![0u8; src.len()];
    let (w, h) = (width as i32, height as i32);
    let tint = color.to_array();
    for y in 0..h {
        let sy = y - dy;
        if sy < 0 || sy >= h {
            continue;
        }
        for x in 0..w {
            let sx = x - dx;
            if sx < 0 || sx >= w {
                continue;
            }
            let sa = u16::from(src[((sy * w + sx) as usize) * 4 + 3]);
            if sa == 0 {
                continue;
            }
            let idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                out[idx + c] = mul_div255_u8(u16::from(tint[c]), sa);
            }
        }
    }
    out
}

/// Normalized gaussian kernel in Q16 fixed point with `2 × radius + 1` taps.
pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> FramecutResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FramecutError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes into the center tap; the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

/// Separable gaussian blur for a canvas `shadowBlur` amount (sigma = blur / 2).
pub(crate) fn blur_for_shadow(buf: &mut [u8], width: u32, height: u32, blur: f64) -> FramecutResult<()> {
    if blur <= 0.0 || width == 0 || height == 0 {
        return Ok(());
    }
    let sigma = (blur / 2.0) as f32;
    let radius = (f64::from(sigma) * 3.0).ceil() as u32;
    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; buf.len()];
    horizontal_blur_q16(buf, &mut tmp, width, height, &kernel);
    vertical_blur_q16(&tmp, buf, width, height, &kernel);
    Ok(())
}

fn horizontal_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = x + ki as i32 - radius;
                // Samples outside the buffer count as transparent.
                if sx < 0 || sx >= w {
                    continue;
                }
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_blur_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = y + ki as i32 - radius;
                if sy < 0 || sy >= h {
                    continue;
                }
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixels.rs"]
mod tests;
