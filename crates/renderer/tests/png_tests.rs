//! Tests for PNG encoding functionality.
//!
//! Covers format selection, the pHYs resolution chunk, decoding the output
//! with the `image` crate, and byte-for-byte determinism.

use renderer::png::{create_png, create_png_auto, create_png_indexed};

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

// ============================================================================
// Helper functions
// ============================================================================

/// Chunk types in file order.
fn chunk_types(png: &[u8]) -> Vec<String> {
    let mut types = Vec::new();
    let mut pos = 8;
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes([png[pos], png[pos + 1], png[pos + 2], png[pos + 3]]) as usize;
        types.push(String::from_utf8_lossy(&png[pos + 4..pos + 8]).into_owned());
        pos += 12 + len;
    }
    types
}

/// Payload of the first chunk of `kind`.
fn chunk_data<'a>(png: &'a [u8], kind: &str) -> Option<&'a [u8]> {
    let mut pos = 8;
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes([png[pos], png[pos + 1], png[pos + 2], png[pos + 3]]) as usize;
        if &png[pos + 4..pos + 8] == kind.as_bytes() {
            return Some(&png[pos + 8..pos + 8 + len]);
        }
        pos += 12 + len;
    }
    None
}

/// Map-like image: white page, a few flat colors, a black frame.
fn figure_like_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let px = if x == 10 || y == 10 || x == width - 10 || y == height - 10 {
                [0, 0, 0, 255]
            } else if x > 10 && y > 10 && x < width - 10 && y < height - 10 {
                match (x / 16 + y / 16) % 3 {
                    0 => [59, 76, 192, 255],
                    1 => [221, 221, 221, 255],
                    _ => [180, 4, 38, 255],
                }
            } else {
                [255, 255, 255, 255]
            };
            pixels.extend_from_slice(&px);
        }
    }
    pixels
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_signature_and_ihdr() {
    let pixels = figure_like_pixels(64, 48);
    let png = create_png_auto(&pixels, 64, 48, None).unwrap();

    assert_eq!(&png[0..8], &SIGNATURE);
    let ihdr = chunk_data(&png, "IHDR").unwrap();
    assert_eq!(u32::from_be_bytes([ihdr[0], ihdr[1], ihdr[2], ihdr[3]]), 64);
    assert_eq!(u32::from_be_bytes([ihdr[4], ihdr[5], ihdr[6], ihdr[7]]), 48);
    assert_eq!(ihdr[8], 8);
}

#[test]
fn test_chunk_order_with_dpi() {
    let pixels = figure_like_pixels(64, 64);
    let png = create_png_auto(&pixels, 64, 64, Some(300.0)).unwrap();

    assert_eq!(chunk_types(&png), ["IHDR", "pHYs", "PLTE", "IDAT", "IEND"]);
}

#[test]
fn test_phys_records_dpi() {
    let pixels = figure_like_pixels(32, 32);
    let png = create_png(&pixels, 32, 32, Some(300.0)).unwrap();

    let phys = chunk_data(&png, "pHYs").unwrap();
    assert_eq!(phys.len(), 9);
    // 300 dpi = 11811 pixels per meter
    assert_eq!(u32::from_be_bytes([phys[0], phys[1], phys[2], phys[3]]), 11811);
    assert_eq!(u32::from_be_bytes([phys[4], phys[5], phys[6], phys[7]]), 11811);
    assert_eq!(phys[8], 1);
}

#[test]
fn test_no_phys_without_dpi() {
    let pixels = figure_like_pixels(32, 32);
    let png = create_png(&pixels, 32, 32, None).unwrap();
    assert!(chunk_data(&png, "pHYs").is_none());
}

#[test]
fn test_trns_only_with_transparency() {
    let opaque = create_png_indexed(1, 1, &[(1, 2, 3, 255)], &[0], None).unwrap();
    assert!(chunk_data(&opaque, "tRNS").is_none());

    let clear = create_png_indexed(1, 2, &[(1, 2, 3, 255), (0, 0, 0, 0)], &[0, 1], None).unwrap();
    assert_eq!(chunk_data(&clear, "tRNS").unwrap(), &[255, 0]);
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_indexed_decodes_to_same_pixels() {
    let (width, height) = (100, 80);
    let pixels = figure_like_pixels(width, height);
    let png = create_png_auto(&pixels, width, height, Some(300.0)).unwrap();

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (100, 80));
    assert_eq!(decoded.as_raw(), &pixels);
}

#[test]
fn test_rgba_decodes_to_same_pixels() {
    let mut pixels = Vec::with_capacity(300 * 4);
    for i in 0..300u32 {
        pixels.extend_from_slice(&[(i % 256) as u8, (i / 2 % 256) as u8, (i / 3 % 256) as u8, 255]);
    }

    let png = create_png_auto(&pixels, 20, 15, None).unwrap();
    assert_eq!(chunk_types(&png), ["IHDR", "IDAT", "IEND"]);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw(), &pixels);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_large_image_is_deterministic() {
    // Above the parallel extraction threshold
    let pixels = figure_like_pixels(256, 256);

    let first = create_png_auto(&pixels, 256, 256, Some(300.0)).unwrap();
    for _ in 0..3 {
        assert_eq!(create_png_auto(&pixels, 256, 256, Some(300.0)).unwrap(), first);
    }
}

#[test]
fn test_wrong_buffer_length_rejected() {
    let pixels = figure_like_pixels(16, 16);
    assert!(create_png_auto(&pixels, 16, 17, None).is_err());
}
