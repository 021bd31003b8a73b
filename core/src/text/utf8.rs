//! Lenient UTF-8 to codepoint decoding.
//!
//! Lead bytes are range-checked (`C2..=DF`, `E0..=EF`, `F0..=F7` for 2, 3 and
//! 4 byte sequences); continuation bytes only contribute their low 6 bits,
//! except that a zero byte anywhere in a sequence ends the string. Anything
//! the decoder cannot make sense of ends the stream: there is no replacement
//! character and no error, just fewer codepoints.

use std::iter::FusedIterator;

/// Codepoints decoded from a UTF-8 byte slice, stopping at the first
/// malformed or truncated sequence or at a NUL.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    rest: &'a [u8],
}

impl<'a> Codepoints<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    /// Bytes not yet consumed. Empty once decoding has stopped.
    pub fn remainder(&self) -> &'a [u8] {
        self.rest
    }
}

impl Iterator for Codepoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        match decode_one(self.rest) {
            Some((codepoint, len)) => {
                self.rest = &self.rest[len..];
                Some(codepoint)
            }
            None => {
                self.rest = &[];
                None
            }
        }
    }
}

impl FusedIterator for Codepoints<'_> {}

/// Decode the sequence at the start of `s`, returning the codepoint and the
/// number of bytes it used.
fn decode_one(s: &[u8]) -> Option<(u32, usize)> {
    let lead = *s.first()?;
    let cont = |i: usize| u32::from(s[i] & 0x3F);

    let len = match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return None,
    };
    // A NUL anywhere in the sequence ends the string, as with C strings
    let seq = s.get(..len)?;
    if seq.contains(&0) {
        return None;
    }

    let codepoint = match len {
        1 => u32::from(lead),
        2 => (u32::from(lead & 0x1F) << 6) | cont(1),
        3 => (u32::from(lead & 0x0F) << 12) | (cont(1) << 6) | cont(2),
        _ => (u32::from(lead & 0x07) << 18) | (cont(1) << 12) | (cont(2) << 6) | cont(3),
    };
    // Overlong encodings of NUL (E0 80 80) terminate too
    if codepoint == 0 {
        return None;
    }
    Some((codepoint, len))
}
