//! Canonical RGBA8888 pixel buffers.
//!
//! Rows are tightly packed (`width * 4` bytes, no padding) and stored
//! bottom-up: row 0 is the bottom row of the texture, matching texture
//! coordinates where `v = 0` is the bottom edge.

/// Bytes per RGBA8888 pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned RGBA8888 pixel buffer, bottom-up rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent black buffer
    ///
    /// # Panics
    /// If `width * height * 4` does not fit in `usize`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0; 4])
    }

    /// Buffer with every pixel set to `rgba`
    ///
    /// # Panics
    /// If `width * height * 4` does not fit in `usize`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let Some(len) = Self::byte_len(width, height) else {
            panic!("{width}x{height} pixel buffer overflows usize");
        };
        Self {
            width,
            height,
            data: rgba.repeat(len / BYTES_PER_PIXEL),
        }
    }

    /// Wrap existing RGBA8888 bytes.
    ///
    /// Returns `None` unless `data.len() == width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if Self::byte_len(width, height) != Some(data.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Number of bytes a `width` x `height` RGBA8888 buffer occupies, or
    /// `None` if that overflows `usize`
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(BYTES_PER_PIXEL)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Row `row` counted from the bottom
    pub fn row(&self, row: u32) -> &[u8] {
        let start = row as usize * self.pitch();
        &self.data[start..start + self.pitch()]
    }

    /// Pixel at column `x` of row `row` (counted from the bottom)
    pub fn pixel(&self, x: u32, row: u32) -> [u8; 4] {
        let i = row as usize * self.pitch() + x as usize * BYTES_PER_PIXEL;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, row: u32, rgba: [u8; 4]) {
        let i = row as usize * self.pitch() + x as usize * BYTES_PER_PIXEL;
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Copy of the pixels with row 0 at the top, for image writers and
    /// viewers that expect the usual top-down order.
    pub fn to_top_down(&self) -> Vec<u8> {
        let pitch = self.pitch();
        let mut out = Vec::with_capacity(self.data.len());
        if pitch == 0 {
            return out;
        }
        for row in self.data.chunks_exact(pitch).rev() {
            out.extend_from_slice(row);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent_black() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.as_bytes().len(), 3 * 2 * 4);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(buf.pitch(), 12);
    }

    #[test]
    fn test_filled() {
        let buf = PixelBuffer::filled(2, 2, [1, 2, 3, 4]);
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4].repeat(4)[..]);
    }

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_none());
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_some());
        assert!(PixelBuffer::from_raw(0, 5, Vec::new()).is_some());
    }

    #[test]
    fn test_byte_len_overflow() {
        assert_eq!(PixelBuffer::byte_len(640, 480), Some(640 * 480 * 4));
        assert_eq!(PixelBuffer::byte_len(0, u32::MAX), Some(0));
        assert_eq!(PixelBuffer::byte_len(u32::MAX, u32::MAX), None);
        assert!(PixelBuffer::from_raw(u32::MAX, u32::MAX, Vec::new()).is_none());
    }

    #[test]
    fn test_pixel_access_is_bottom_up() {
        let mut buf = PixelBuffer::new(2, 3);
        buf.set_pixel(1, 0, [9, 8, 7, 6]);
        assert_eq!(buf.pixel(1, 0), [9, 8, 7, 6]);
        // Row 0 is the first row in memory
        assert_eq!(&buf.as_bytes()[4..8], &[9, 8, 7, 6]);
        assert_eq!(buf.row(0), &[0, 0, 0, 0, 9, 8, 7, 6]);
    }

    #[test]
    fn test_to_top_down_reverses_rows() {
        let mut buf = PixelBuffer::new(1, 3);
        buf.set_pixel(0, 0, [1, 1, 1, 1]);
        buf.set_pixel(0, 2, [3, 3, 3, 3]);

        let flipped = buf.to_top_down();
        assert_eq!(&flipped[0..4], &[3, 3, 3, 3]);
        assert_eq!(&flipped[8..12], &[1, 1, 1, 1]);
    }

    #[test]
    fn test_to_top_down_empty() {
        assert!(PixelBuffer::new(0, 0).to_top_down().is_empty());
    }
}
