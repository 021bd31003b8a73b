//! Single-line text rendering into RGBA pixel buffers.
//!
//! Text is decoded from UTF-8, rasterized one codepoint at a time and laid out
//! left to right on a single baseline (no kerning, no shaping). Measuring runs
//! the exact same layout without touching pixels, so a measured width always
//! matches what [`TextRenderer::draw`] produces.
//!
//! ```ignore
//! let mut text = TextRenderer::new();
//! text.set_font("test.ttf")?;
//! let extent = text.measure("glint", 18)?;
//! text.draw(&mut canvas, "glint", 18, [220, 220, 250], 255, (24, 23))?;
//! ```

mod blend;
mod font;
mod glyph;
mod utf8;

use std::path::Path;

use thiserror::Error;

use crate::pixels::PixelBuffer;

pub use blend::{blend_glyph, blend_pixel};
pub use font::{FontError, FontFace};
pub use glyph::{Glyph, GlyphError, GlyphRasterizer};
pub use utf8::Codepoints;

/// Errors that can occur while laying out text
#[derive(Debug, Error)]
pub enum TextError {
    #[error("no font loaded")]
    NoFontLoaded,

    #[error("failed to render U+{codepoint:04X} after {} glyphs: {source}", .drawn.count)]
    GlyphRenderFailure {
        codepoint: u32,
        /// Extent of the glyphs laid out before the failure
        drawn: TextExtent,
        #[source]
        source: GlyphError,
    },

    #[error(transparent)]
    Font(#[from] FontError),
}

/// Pen displacement and glyph count of one layout pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextExtent {
    /// Sum of whole-pixel advances
    pub width: i32,
    /// Number of codepoints laid out
    pub count: usize,
}

/// Lays out and composites text with the current font.
pub struct TextRenderer<R = FontFace> {
    rasterizer: Option<R>,
}

impl<R> Default for TextRenderer<R> {
    fn default() -> Self {
        Self { rasterizer: None }
    }
}

impl TextRenderer<FontFace> {
    /// Renderer with no font; every layout fails with `NoFontLoaded` until
    /// a font is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a font file and make it current.
    ///
    /// On failure the previously loaded font (if any) stays current.
    pub fn set_font(&mut self, path: impl AsRef<Path>) -> Result<(), TextError> {
        let path = path.as_ref();
        let face = FontFace::from_file(path)?;
        tracing::debug!("Loaded font {}", path.display());
        self.rasterizer = Some(face);
        Ok(())
    }

    /// Parse an in-memory font file and make it current
    pub fn set_font_bytes(&mut self, data: Vec<u8>) -> Result<(), TextError> {
        self.rasterizer = Some(FontFace::from_bytes(data)?);
        Ok(())
    }
}

impl<R: GlyphRasterizer> TextRenderer<R> {
    pub fn with_rasterizer(rasterizer: R) -> Self {
        Self {
            rasterizer: Some(rasterizer),
        }
    }

    pub fn has_font(&self) -> bool {
        self.rasterizer.is_some()
    }

    pub fn rasterizer_mut(&mut self) -> Option<&mut R> {
        self.rasterizer.as_mut()
    }

    /// Width in pixels and codepoint count `text` would occupy at
    /// `pixel_size`. Nothing is cached; every call lays the text out again.
    pub fn measure(&mut self, text: impl AsRef<[u8]>, pixel_size: u32) -> Result<TextExtent, TextError> {
        self.layout(text.as_ref(), pixel_size, (0, 0), |_, _, _| {})
    }

    /// Composite `text` into `buffer`.
    ///
    /// `origin` is the top-left of the line in top-down coordinates (the
    /// first row of glyph space maps to the buffer's top row). Glyph pixels
    /// outside the buffer are dropped. If a glyph fails to rasterize, the
    /// glyphs before it stay drawn and the error reports their extent.
    pub fn draw(
        &mut self,
        buffer: &mut PixelBuffer,
        text: impl AsRef<[u8]>,
        pixel_size: u32,
        color: [u8; 3],
        alpha: u8,
        origin: (i32, i32),
    ) -> Result<TextExtent, TextError> {
        let extent = self.layout(text.as_ref(), pixel_size, origin, |glyph, x, y| {
            blend_glyph(buffer, glyph, x, y, color, alpha);
        })?;
        tracing::debug!("Drew {} glyphs, {} px wide", extent.count, extent.width);
        Ok(extent)
    }

    fn layout(
        &mut self,
        text: &[u8],
        pixel_size: u32,
        origin: (i32, i32),
        mut place: impl FnMut(&Glyph, i32, i32),
    ) -> Result<TextExtent, TextError> {
        let rasterizer = self.rasterizer.as_mut().ok_or(TextError::NoFontLoaded)?;
        rasterizer.set_pixel_size(pixel_size);

        let size = pixel_size as i32;
        let mut extent = TextExtent::default();

        for codepoint in Codepoints::new(text) {
            let glyph = match rasterizer.rasterize(codepoint) {
                Ok(glyph) => glyph,
                Err(source) => {
                    tracing::warn!(
                        "Stopped text layout at U+{:04X} after {} glyphs: {}",
                        codepoint,
                        extent.count,
                        source
                    );
                    return Err(TextError::GlyphRenderFailure {
                        codepoint,
                        drawn: extent,
                        source,
                    });
                }
            };

            let x = origin.0 + extent.width + glyph.bearing_left;
            let y = origin.1 + (size - glyph.bearing_top - 1);
            place(&glyph, x, y);

            extent.width += glyph.advance_px();
            extent.count += 1;
        }

        Ok(extent)
    }
}
