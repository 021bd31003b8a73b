//! Integration tests for text rendered with a real outline font.
//!
//! Tests the complete flow:
//! 1. Load DejaVu Sans Mono from `tests/fixtures`
//! 2. Rasterize single glyphs through `FontFace`
//! 3. Measure and draw lines through `TextRenderer`

use std::path::PathBuf;

use glint_core::{
    FontFace, GlyphError, GlyphRasterizer, PixelBuffer, TextError, TextExtent, TextRenderer,
};

const SIZE: u32 = 18;
const INK: [u8; 3] = [255, 255, 255];

fn font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf")
}

fn face() -> FontFace {
    let mut face = FontFace::from_file(font_path()).unwrap();
    face.set_pixel_size(SIZE);
    face
}

fn renderer() -> TextRenderer {
    let mut text = TextRenderer::new();
    text.set_font(font_path()).unwrap();
    text
}

/// Top-down rows that received any ink
fn inked_rows(buffer: &PixelBuffer) -> Vec<u32> {
    (0..buffer.height())
        .filter(|&row| buffer.row(row).chunks_exact(4).any(|p| p != [0, 0, 0, 0]))
        .map(|row| buffer.height() - row - 1)
        .collect()
}

// ============================================================================
// Glyphs
// ============================================================================

#[test]
fn test_glyph_bitmap_and_metrics() {
    let mut face = face();
    let glyph = face.rasterize('H' as u32).unwrap();

    assert!(glyph.width > 0 && glyph.height > 0);
    assert_eq!(glyph.pitch, glyph.width as usize);
    assert_eq!(glyph.coverage.len(), glyph.pitch * glyph.height as usize);
    assert!(glyph.coverage.iter().any(|&c| c == 255));

    // Cap height sits above the baseline, below the em box
    assert!(glyph.bearing_top > 0 && glyph.bearing_top <= SIZE as i32);
    assert!(glyph.bearing_left >= 0);

    // 1233/2048 em at 18 px is 10.84 px, in 26.6 fixed point
    assert!((10 << 6..11 << 6).contains(&glyph.advance), "{}", glyph.advance);
    assert_eq!(glyph.advance_px(), 10);
}

#[test]
fn test_space_is_blank_with_advance() {
    let mut face = face();
    let space = face.rasterize(' ' as u32).unwrap();

    assert!(space.coverage.iter().all(|&c| c == 0));
    assert!(space.width == 0 || space.height == 0 || space.coverage.is_empty());
    assert!(space.advance_px() > 0);
    assert_eq!(space.advance, face.rasterize('H' as u32).unwrap().advance);
}

#[test]
fn test_pixel_size_scales_glyphs() {
    let mut face = face();
    let small = face.rasterize('H' as u32).unwrap();
    face.set_pixel_size(SIZE * 2);
    let large = face.rasterize('H' as u32).unwrap();

    assert!(large.height > small.height);
    assert!(large.advance > small.advance);
}

#[test]
fn test_surrogate_is_invalid_codepoint() {
    let mut face = face();
    assert_eq!(
        face.rasterize(0xD800),
        Err(GlyphError::InvalidCodepoint(0xD800))
    );
    assert_eq!(
        face.rasterize(0x110000),
        Err(GlyphError::InvalidCodepoint(0x110000))
    );
}

// ============================================================================
// Lines
// ============================================================================

#[test]
fn test_pen_is_sum_of_whole_pixel_advances() {
    let line = "Hi, glint!";
    let mut face = face();
    let expected: i32 = line
        .chars()
        .map(|c| face.rasterize(c as u32).unwrap().advance_px())
        .sum();

    let mut text = renderer();
    assert_eq!(
        text.measure(line, SIZE).unwrap(),
        TextExtent {
            width: expected,
            count: line.chars().count(),
        }
    );
}

#[test]
fn test_measure_matches_draw() {
    let mut text = renderer();
    let measured = text.measure("glint text", SIZE).unwrap();
    assert_eq!(measured.count, 10);

    let mut canvas = PixelBuffer::new(256, 32);
    let drawn = text.draw(&mut canvas, "glint text", SIZE, INK, 255, (4, 0)).unwrap();
    assert_eq!(drawn, measured);

    assert!(!inked_rows(&canvas).is_empty());
}

#[test]
fn test_glyph_placed_from_bearing_top() {
    let glyph = face().rasterize('H' as u32).unwrap();
    let top = SIZE as i32 - glyph.bearing_top - 1 + 2;
    let bottom = top + glyph.height as i32 - 1;

    let mut text = renderer();
    let mut canvas = PixelBuffer::new(32, 32);
    text.draw(&mut canvas, "H", SIZE, INK, 255, (0, 2)).unwrap();

    let rows = inked_rows(&canvas);
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|&row| (top..=bottom).contains(&(row as i32))), "{rows:?}");
}

#[test]
fn test_set_font_bytes_matches_file() {
    let mut from_file = renderer();
    let mut from_bytes = TextRenderer::new();
    from_bytes
        .set_font_bytes(std::fs::read(font_path()).unwrap())
        .unwrap();

    assert_eq!(
        from_file.measure("same", SIZE).unwrap(),
        from_bytes.measure("same", SIZE).unwrap()
    );
}

#[test]
fn test_lone_surrogate_stops_draw() {
    let mut text = renderer();
    let mut canvas = PixelBuffer::new(64, 32);

    // ED A0 80 decodes leniently to U+D800
    match text.draw(&mut canvas, b"ab\xED\xA0\x80c", SIZE, INK, 255, (0, 0)) {
        Err(TextError::GlyphRenderFailure {
            codepoint,
            drawn,
            source,
        }) => {
            assert_eq!(codepoint, 0xD800);
            assert_eq!(drawn.count, 2);
            assert_eq!(drawn, text.measure("ab", SIZE).unwrap());
            assert_eq!(source, GlyphError::InvalidCodepoint(0xD800));
        }
        other => panic!("expected GlyphRenderFailure, got {other:?}"),
    }
    assert!(!inked_rows(&canvas).is_empty());
}
