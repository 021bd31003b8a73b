//! Image file decoding into canonical RGBA8888 buffers.
//!
//! The format is picked from the file name extension (`bmp`, `png`, `jpg`,
//! `jpeg`, case-sensitive) and resolved once per call. BMP is parsed here;
//! PNG and JPEG go through the `image` codecs and are adapted to the same
//! bottom-up RGBA8888 layout.
//!
//! # Usage
//! ```ignore
//! use glint_core::texture;
//!
//! let (width, height) = texture::probe("brick.png")?;
//! let mut pixels = vec![0u8; texture::decoded_len(width, height)?];
//! texture::decode("brick.png", &mut pixels)?;
//!
//! // Or both steps at once
//! let image = texture::load("brick.png")?;
//! ```

mod bmp;
mod codec;

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::pixels::PixelBuffer;

pub use bmp::BmpHeader;
pub use codec::PNG_SIGNATURE;

/// Largest decoded image accepted, in bytes (256 MiB)
pub const MAX_IMAGE_BYTES: usize = 256 << 20;

/// Image decoding failures. None of these is fatal; callers usually fall
/// back to [`DecodedImage::placeholder`].
#[derive(Debug, Error)]
pub enum ImageError {
    /// Open or read failure, including corrupt data reported by a codec
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG file does not start with the PNG signature
    #[error("bad PNG signature")]
    BadSignature,

    /// BMP bit depth other than 24
    #[error("unsupported bit depth {0} (only 24-bit BMP is supported)")]
    UnsupportedDepth(u16),

    /// Unrecognized extension, or a codec feature that cannot be decoded
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Supported image file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Bmp,
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Match an extension (without the dot). Case-sensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "bmp" => Some(Self::Bmp),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Pick the format from everything after the last `.` in `path`.
    ///
    /// Paths shorter than 4 bytes are rejected outright.
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let name = path.to_string_lossy();
        if name.len() < 4 {
            return Err(ImageError::UnsupportedFormat(name.into_owned()));
        }

        name.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
            .ok_or_else(|| ImageError::UnsupportedFormat(name.to_string()))
    }

}

/// Where a [`DecodedImage`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Decoded from a file of this format
    File(ImageFormat),
    /// Built-in fallback gradient
    Placeholder,
}

/// A freshly decoded buffer plus its provenance.
///
/// Owned by the caller; the pixels are released when it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub buffer: PixelBuffer,
    pub source: ImageSource,
}

/// 1x4 red gradient, darkest at the bottom
const PLACEHOLDER_PIXELS: [u8; 16] = [
    50, 0, 0, 255, //
    100, 0, 0, 255, //
    150, 0, 0, 255, //
    200, 0, 0, 255,
];

impl DecodedImage {
    /// Tiny vertical gradient used in place of an image that failed to decode
    pub fn placeholder() -> Self {
        let mut buffer = PixelBuffer::new(1, 4);
        buffer.as_bytes_mut().copy_from_slice(&PLACEHOLDER_PIXELS);
        Self {
            buffer,
            source: ImageSource::Placeholder,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == ImageSource::Placeholder
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

/// Read the image dimensions without decoding pixel data.
pub fn probe(path: impl AsRef<Path>) -> Result<(u32, u32), ImageError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    probe_as(path, format)
}

/// Decode `path` into `dest`, which must be exactly [`decoded_len`] bytes
/// for the dimensions reported by [`probe`].
///
/// Rows land bottom-up: the last row of `dest` is the top of the image.
pub fn decode(path: impl AsRef<Path>, dest: &mut [u8]) -> Result<(), ImageError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    decode_as(path, format, dest)
}

/// Probe, allocate and decode in one step.
pub fn load(path: impl AsRef<Path>) -> Result<DecodedImage, ImageError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;

    let (width, height) = probe_as(path, format)?;
    decoded_len(width, height)?;
    let mut buffer = PixelBuffer::new(width, height);
    decode_as(path, format, buffer.as_bytes_mut())?;

    tracing::debug!(
        "Loaded {} ({:?}, {}x{})",
        path.display(),
        format,
        width,
        height
    );

    Ok(DecodedImage {
        buffer,
        source: ImageSource::File(format),
    })
}

/// Size of the RGBA8888 buffer a `width` x `height` image decodes into.
///
/// Header dimensions are untrusted: anything that overflows or exceeds
/// [`MAX_IMAGE_BYTES`] is rejected before allocating.
pub fn decoded_len(width: u32, height: u32) -> Result<usize, ImageError> {
    match PixelBuffer::byte_len(width, height) {
        Some(len) if len <= MAX_IMAGE_BYTES => Ok(len),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{width}x{height} image exceeds {MAX_IMAGE_BYTES} bytes"),
        )
        .into()),
    }
}

/// Fail unless `dest` is exactly the decoded size of a `width` x `height` image
fn check_dest(width: u32, height: u32, dest: &[u8]) -> Result<(), ImageError> {
    let len = decoded_len(width, height)?;
    if dest.len() != len {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "destination is {} bytes, {width}x{height} image needs {len}",
                dest.len()
            ),
        )
        .into());
    }
    Ok(())
}

fn probe_as(path: &Path, format: ImageFormat) -> Result<(u32, u32), ImageError> {
    match format {
        ImageFormat::Bmp => bmp::probe(path),
        ImageFormat::Png | ImageFormat::Jpeg => codec::probe(path, format),
    }
}

fn decode_as(path: &Path, format: ImageFormat, dest: &mut [u8]) -> Result<(), ImageError> {
    match format {
        ImageFormat::Bmp => bmp::decode(path, dest),
        ImageFormat::Png | ImageFormat::Jpeg => codec::decode(path, format, dest),
    }
}
