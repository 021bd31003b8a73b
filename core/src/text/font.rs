//! Outline font faces rasterized with `swash`.

use std::io;
use std::path::Path;

use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};
use thiserror::Error;

use super::glyph::{Glyph, GlyphError, GlyphRasterizer};

/// Errors from loading a font face
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file: {0}")]
    Io(#[from] io::Error),

    #[error("unknown font file format")]
    UnknownFormat,
}

/// An owned TrueType/OpenType face and its scaling state.
///
/// Glyphs are rendered from outlines as 8-bit coverage, hinted, at the size
/// last passed to [`GlyphRasterizer::set_pixel_size`].
pub struct FontFace {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    context: ScaleContext,
    pixel_size: f32,
}

impl FontFace {
    /// Load the first face of a font file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Parse the first face of an in-memory font file
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let font = FontRef::from_index(&data, 0).ok_or(FontError::UnknownFormat)?;
        let (offset, key) = (font.offset, font.key);

        Ok(Self {
            data,
            offset,
            key,
            context: ScaleContext::new(),
            pixel_size: 0.0,
        })
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes", &self.data.len())
            .field("offset", &self.offset)
            .field("pixel_size", &self.pixel_size)
            .finish()
    }
}

impl GlyphRasterizer for FontFace {
    fn set_pixel_size(&mut self, pixel_size: u32) {
        self.pixel_size = pixel_size as f32;
    }

    fn rasterize(&mut self, codepoint: u32) -> Result<Glyph, GlyphError> {
        let ch = char::from_u32(codepoint).ok_or(GlyphError::InvalidCodepoint(codepoint))?;

        // Field borrows keep `data` and `context` disjoint
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let glyph_id = font.charmap().map(ch);
        let advance = font
            .glyph_metrics(&[])
            .scale(self.pixel_size)
            .advance_width(glyph_id);

        let mut scaler = self
            .context
            .builder(font)
            .size(self.pixel_size)
            .hint(true)
            .build();
        if !scaler.has_outlines() {
            return Err(GlyphError::NoOutlines { codepoint, glyph_id });
        }

        let advance = (advance * 64.0) as i32;

        // Blank outlines (spaces) render nothing but still advance
        let Some(image) = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)
        else {
            return Ok(Glyph {
                advance,
                ..Glyph::default()
            });
        };

        Ok(Glyph {
            width: image.placement.width,
            height: image.placement.height,
            pitch: image.placement.width as usize,
            bearing_left: image.placement.left,
            bearing_top: image.placement.top,
            advance,
            coverage: image.data,
        })
    }
}
