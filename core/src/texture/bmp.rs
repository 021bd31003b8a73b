//! 24-bit BMP decoding.
//!
//! # Layout
//! ```text
//! 0x0A: pixel data offset u32 (little-endian)
//! 0x12: width u32
//! 0x16: height u32
//! 0x1C: bit depth u16 (only 24 is accepted)
//! 0x36: end of the fixed 54-byte header
//! ```
//!
//! Pixel rows are BGR triples padded to a multiple of 4 bytes and stored
//! bottom row first, which is already the canonical buffer order.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::ImageError;

/// Fill byte for rows that could not be read
const MISSING_ROW_FILL: u8 = 0x80;

/// Fields of the fixed BMP header that the decoder uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub pixel_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u16,
}

impl BmpHeader {
    pub const SIZE: usize = 54;

    /// Read header fields from the first 54 bytes of a file
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        Self {
            pixel_offset: u32_at(0x0A),
            width: u32_at(0x12),
            height: u32_at(0x16),
            bit_depth: u16::from_le_bytes([bytes[0x1C], bytes[0x1D]]),
        }
    }

    /// Bytes per stored row (BGR triples rounded up to 4-byte alignment)
    pub fn pitch(&self) -> usize {
        ((self.width as usize * 3) + 3) & !3
    }

    /// Read and validate the header from the start of `reader`
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, ImageError> {
        let mut bytes = [0u8; Self::SIZE];
        reader.read_exact(&mut bytes)?;

        let header = Self::from_bytes(&bytes);
        if header.bit_depth != 24 {
            return Err(ImageError::UnsupportedDepth(header.bit_depth));
        }
        Ok(header)
    }
}

pub(super) fn probe(path: &Path) -> Result<(u32, u32), ImageError> {
    let mut file = BufReader::new(File::open(path)?);
    let header = BmpHeader::read(&mut file)?;
    Ok((header.width, header.height))
}

pub(super) fn decode(path: &Path, dest: &mut [u8]) -> Result<(), ImageError> {
    let mut file = BufReader::new(File::open(path)?);
    decode_from(&mut file, dest)
}

/// Decode a whole BMP stream (header included) into `dest`.
///
/// Rows that come up short are replaced with mid-gray instead of failing the
/// decode.
pub(super) fn decode_from<R: Read + Seek>(reader: &mut R, dest: &mut [u8]) -> Result<(), ImageError> {
    let header = BmpHeader::read(reader)?;
    super::check_dest(header.width, header.height, dest)?;
    let width = header.width as usize;
    let height = header.height as usize;

    if width == 0 || height == 0 {
        return Ok(());
    }

    if header.pixel_offset != 0 {
        reader.seek(SeekFrom::Start(u64::from(header.pixel_offset)))?;
    }

    let mut row = vec![0u8; header.pitch()];
    let mut missing_rows = 0usize;

    for dst_row in dest.chunks_exact_mut(width * 4).take(height) {
        if reader.read_exact(&mut row).is_err() {
            row.fill(MISSING_ROW_FILL);
            missing_rows += 1;
        }
        copy_row_bgr(dst_row, &row[..width * 3]);
    }

    if missing_rows > 0 {
        tracing::warn!(
            "BMP data ended early: {} of {} rows filled with gray",
            missing_rows,
            height
        );
    }

    Ok(())
}

/// Expand one row of BGR triples into opaque RGBA
fn copy_row_bgr(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(3)) {
        d[0] = s[2]; // R
        d[1] = s[1]; // G
        d[2] = s[0]; // B
        d[3] = 255; // A
    }
}
