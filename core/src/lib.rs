//! Glint Core - pixel pipeline for small graphics demos
//!
//! Loads images into a canonical RGBA8888 layout and renders single-line
//! UTF-8 text into those buffers, ready for upload as GPU textures.
//!
//! # Architecture
//!
//! - [`PixelBuffer`] - Owned RGBA8888 pixels, bottom-up rows
//! - [`texture`] - BMP/PNG/JPEG decoding with format dispatch by extension
//! - [`TextRenderer`] - UTF-8 decoding, glyph layout and alpha compositing

pub mod pixels;
pub mod text;
pub mod texture;

pub use pixels::{BYTES_PER_PIXEL, PixelBuffer};
pub use text::{
    FontError, FontFace, Glyph, GlyphError, GlyphRasterizer, TextError, TextExtent, TextRenderer,
};
pub use texture::{DecodedImage, ImageError, ImageFormat, ImageSource};
