//! PNG and JPEG decoding through the `image` codecs.
//!
//! The codec hands back top-down rows in whatever sample layout the file
//! uses; this module narrows them to RGBA8888 and writes them mirrored so the
//! result is bottom-up like BMP output.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use image::{DynamicImage, ImageFormat as CodecFormat, ImageReader};

use super::{ImageError, ImageFormat};

/// First 8 bytes of every PNG file
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub(super) fn probe(path: &Path, format: ImageFormat) -> Result<(u32, u32), ImageError> {
    open(path, format)?.into_dimensions().map_err(codec_error)
}

pub(super) fn decode(path: &Path, format: ImageFormat, dest: &mut [u8]) -> Result<(), ImageError> {
    let image = open(path, format)?.decode().map_err(codec_error)?;
    super::check_dest(image.width(), image.height(), dest)?;
    let (width, height) = (image.width() as usize, image.height() as usize);

    let pitch = width * 4;
    if pitch == 0 || height == 0 {
        return Ok(());
    }

    let rgba = to_rgba8(image);
    for (src_row, dst_row) in rgba.chunks_exact(pitch).zip(dest.chunks_exact_mut(pitch).rev()) {
        dst_row.copy_from_slice(src_row);
    }

    Ok(())
}

fn open(path: &Path, format: ImageFormat) -> Result<ImageReader<BufReader<File>>, ImageError> {
    let mut file = BufReader::new(File::open(path)?);

    let codec_format = match format {
        ImageFormat::Png => {
            check_png_signature(&mut file)?;
            file.seek(SeekFrom::Start(0))?;
            CodecFormat::Png
        }
        ImageFormat::Jpeg => CodecFormat::Jpeg,
        ImageFormat::Bmp => {
            return Err(ImageError::UnsupportedFormat(format!(
                "{} is not decoded by the codec",
                path.display()
            )));
        }
    };

    Ok(ImageReader::with_format(file, codec_format))
}

fn check_png_signature<R: Read>(reader: &mut R) -> Result<(), ImageError> {
    let mut signature = [0u8; 8];
    match reader.read_exact(&mut signature) {
        Ok(()) if signature == PNG_SIGNATURE => Ok(()),
        Ok(()) => Err(ImageError::BadSignature),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(ImageError::BadSignature),
        Err(e) => Err(e.into()),
    }
}

fn codec_error(err: image::ImageError) -> ImageError {
    match err {
        image::ImageError::IoError(e) => ImageError::Io(e),
        image::ImageError::Unsupported(e) => ImageError::UnsupportedFormat(e.to_string()),
        other => ImageError::Io(io::Error::new(io::ErrorKind::InvalidData, other)),
    }
}

/// Top-down RGBA8888 samples.
///
/// 16-bit channels keep their high byte, gray expands to RGB, and layouts
/// without alpha become opaque.
fn to_rgba8(image: DynamicImage) -> Vec<u8> {
    let hi = |v: u16| (v >> 8) as u8;

    match image {
        DynamicImage::ImageRgba8(buf) => buf.into_raw(),
        DynamicImage::ImageRgb8(buf) => expand(buf.as_raw(), 3, |p| [p[0], p[1], p[2], 255]),
        DynamicImage::ImageLuma8(buf) => expand(buf.as_raw(), 1, |p| [p[0], p[0], p[0], 255]),
        DynamicImage::ImageLumaA8(buf) => expand(buf.as_raw(), 2, |p| [p[0], p[0], p[0], p[1]]),
        DynamicImage::ImageRgba16(buf) => {
            expand(buf.as_raw(), 4, |p| [hi(p[0]), hi(p[1]), hi(p[2]), hi(p[3])])
        }
        DynamicImage::ImageRgb16(buf) => {
            expand(buf.as_raw(), 3, |p| [hi(p[0]), hi(p[1]), hi(p[2]), 255])
        }
        DynamicImage::ImageLuma16(buf) => {
            expand(buf.as_raw(), 1, |p| [hi(p[0]), hi(p[0]), hi(p[0]), 255])
        }
        DynamicImage::ImageLumaA16(buf) => {
            expand(buf.as_raw(), 2, |p| [hi(p[0]), hi(p[0]), hi(p[0]), hi(p[1])])
        }
        other => other.into_rgba8().into_raw(),
    }
}

fn expand<T>(samples: &[T], channels: usize, pixel: impl Fn(&[T]) -> [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() / channels * 4);
    for p in samples.chunks_exact(channels) {
        out.extend_from_slice(&pixel(p));
    }
    out
}
