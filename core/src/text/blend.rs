//! Glyph coverage compositing into bottom-up RGBA buffers.

use crate::pixels::{BYTES_PER_PIXEL, PixelBuffer};

use super::glyph::Glyph;

/// Composite `glyph` with its top-left corner at `(x, y)`.
///
/// `(x, y)` is measured top-down from the buffer's top-left corner. Glyph
/// pixels that land outside the buffer are skipped one by one; the rest are
/// blended "over" the destination using integer arithmetic with
/// `srcA = coverage * alpha / 255`.
pub fn blend_glyph(
    buffer: &mut PixelBuffer,
    glyph: &Glyph,
    x: i32,
    y: i32,
    color: [u8; 3],
    alpha: u8,
) {
    let width = i64::from(buffer.width());
    let height = i64::from(buffer.height());
    let pitch = buffer.pitch();
    let data = buffer.as_bytes_mut();

    for j in 0..glyph.height {
        let ty = i64::from(y) + i64::from(j);
        if ty < 0 || ty >= height {
            continue;
        }
        let row = (height - ty - 1) as usize;

        for i in 0..glyph.width {
            let tx = i64::from(x) + i64::from(i);
            if tx < 0 || tx >= width {
                continue;
            }
            let Some(coverage) = glyph.coverage_at(i, j) else {
                continue;
            };

            let src_a = u32::from(coverage) * u32::from(alpha) / 255;
            let at = row * pitch + tx as usize * BYTES_PER_PIXEL;
            blend_pixel(&mut data[at..at + BYTES_PER_PIXEL], src_a, color);
        }
    }
}

/// Blend a solid `color` at `src_a` (0..=255) over one RGBA pixel.
pub fn blend_pixel(dst: &mut [u8], src_a: u32, color: [u8; 3]) {
    let dst_a = u32::from(dst[3]);
    let out_a = (src_a * 255 + dst_a * (255 - src_a)) / 255;

    if out_a == 0 {
        dst[..4].fill(0);
        return;
    }

    for c in 0..3 {
        let src = src_a * u32::from(color[c]) * 255;
        let under = dst_a * u32::from(dst[c]) * (255 - src_a);
        // 8-bit store; faint coverage over faint alpha can exceed 255 and wraps
        dst[c] = ((src + under) / (out_a * 255)) as u8;
    }
    dst[3] = out_a as u8;
}
