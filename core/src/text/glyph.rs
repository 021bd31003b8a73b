//! Rasterized glyphs and the rasterizer seam.

use thiserror::Error;

/// One rasterized glyph: an 8-bit coverage bitmap plus placement metrics.
///
/// Produced per codepoint and dropped as soon as it has been composited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Coverage bytes, `pitch` bytes per row, top row first
    pub coverage: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Bytes per coverage row (at least `width`)
    pub pitch: usize,
    /// Pen position to the bitmap's left edge
    pub bearing_left: i32,
    /// Baseline to the bitmap's top edge (positive is up)
    pub bearing_top: i32,
    /// Horizontal advance in 26.6 fixed point
    pub advance: i32,
}

impl Glyph {
    /// Advance in whole pixels (fraction dropped)
    pub fn advance_px(&self) -> i32 {
        self.advance >> 6
    }

    /// Coverage at column `x` of row `y`, or `None` past the bitmap
    pub fn coverage_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.coverage.get(y as usize * self.pitch + x as usize).copied()
    }
}

/// Rasterization failure for a single codepoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidCodepoint(u32),

    #[error("font has no outlines to render glyph {glyph_id} (U+{codepoint:04X})")]
    NoOutlines { codepoint: u32, glyph_id: u16 },
}

/// Font rasterization backend used by the text renderer.
pub trait GlyphRasterizer {
    /// Select the nominal pixel size for subsequent glyphs
    fn set_pixel_size(&mut self, pixel_size: u32);

    /// Rasterize one codepoint at the current size
    fn rasterize(&mut self, codepoint: u32) -> Result<Glyph, GlyphError>;
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<R> {
    fn set_pixel_size(&mut self, pixel_size: u32) {
        (**self).set_pixel_size(pixel_size);
    }

    fn rasterize(&mut self, codepoint: u32) -> Result<Glyph, GlyphError> {
        (**self).rasterize(codepoint)
    }
}
