//! PNG encoding for rendered figures.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the image has ≤256 unique
//!   colors, which is the common case for wireframe plots.
//! - **RGBA PNG (color type 6)**: fallback for anti-aliased or shaded images
//!   with more colors.
//!
//! Output is deterministic: the palette order depends only on the pixel
//! values, never on thread scheduling. A `pHYs` chunk records the dpi when
//! one is given.

use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const METERS_PER_INCH: f32 = 0.0254;

type Palette = Vec<(u8, u8, u8, u8)>;

/// Create a PNG image with automatic format selection.
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`, `height`: image size in pixels
/// - `dpi`: resolution written to the `pHYs` chunk
pub fn create_png_auto(
    pixels: &[u8],
    width: usize,
    height: usize,
    dpi: Option<f32>,
) -> Result<Vec<u8>, String> {
    check_len(pixels.len(), width, height, 4)?;

    let palette_result = if width * height >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices, dpi),
        None => create_png(pixels, width, height, dpi),
    }
}

fn check_len(len: usize, width: usize, height: usize, bytes_per_pixel: usize) -> Result<(), String> {
    let expected = width * height * bytes_per_pixel;
    if len != expected {
        return Err(format!(
            "expected {} bytes for {}x{} image, got {}",
            expected, width, height, len
        ));
    }
    Ok(())
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([r, g, b, a])
}

#[inline(always)]
fn unpack_color(packed: u32) -> (u8, u8, u8, u8) {
    let [r, g, b, a] = packed.to_be_bytes();
    (r, g, b, a)
}

/// Sequential palette extraction; palette is in first-seen order.
fn extract_palette_sequential(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(unpack_color(packed));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Parallel palette extraction for larger images.
///
/// 1. Collect unique colors per chunk in parallel.
/// 2. Merge, sort and check the count.
/// 3. Map each pixel to its palette index in parallel.
///
/// The palette is sorted by packed value so the result does not depend on
/// how the work was split.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    let chunk_pixels = (pixels.len() / 4 / rayon::current_num_threads()).max(256);
    let chunk_size = chunk_pixels * 4;

    let mut unique_colors: Vec<u32> = pixels
        .par_chunks(chunk_size)
        .flat_map_iter(|chunk| {
            let mut local: Vec<u32> = Vec::with_capacity(MAX_PALETTE_SIZE);
            let mut seen: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for pixel in chunk.chunks_exact(4) {
                let packed = pack_color(pixel[0], pixel[1], pixel[2], pixel[3]);
                if seen.insert(packed, ()).is_none() {
                    local.push(packed);
                    // More than a full palette in one chunk already fails
                    if local.len() > MAX_PALETTE_SIZE {
                        break;
                    }
                }
            }
            local
        })
        .collect();

    unique_colors.sort_unstable();
    unique_colors.dedup();
    if unique_colors.len() > MAX_PALETTE_SIZE {
        return None;
    }

    let color_to_index: HashMap<u32, u8> = unique_colors
        .iter()
        .enumerate()
        .map(|(i, packed)| (*packed, i as u8))
        .collect();
    let palette: Palette = unique_colors.iter().map(|p| unpack_color(*p)).collect();

    let indices: Vec<u8> = pixels
        .par_chunks(4)
        .map(|p| {
            color_to_index
                .get(&pack_color(p[0], p[1], p[2], p[3]))
                .copied()
                .unwrap_or(0)
        })
        .collect();

    Some((palette, indices))
}

fn start_png(png: &mut Vec<u8>, width: usize, height: usize, color_type: u8, dpi: Option<f32>) {
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(color_type);
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(png, b"IHDR", &ihdr_data);

    if let Some(dpi) = dpi {
        write_chunk(png, b"pHYs", &phys_data(dpi));
    }
}

/// `pHYs` payload: pixels per meter on both axes, unit = meter.
fn phys_data(dpi: f32) -> [u8; 9] {
    let ppm = (dpi / METERS_PER_INCH).round() as u32;
    let mut data = [0u8; 9];
    data[0..4].copy_from_slice(&ppm.to_be_bytes());
    data[4..8].copy_from_slice(&ppm.to_be_bytes());
    data[8] = 1;
    data
}

fn finish_png(
    png: &mut Vec<u8>,
    data: &[u8],
    row_bytes: usize,
    height: usize,
) -> Result<(), String> {
    let idat_data = deflate_scanlines(data, row_bytes, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(png, b"IDAT", &idat_data);
    write_chunk(png, b"IEND", &[]);
    Ok(())
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
    dpi: Option<f32>,
) -> Result<Vec<u8>, String> {
    check_len(indices.len(), width, height, 1)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(format!("palette must have 1..=256 entries, got {}", palette.len()));
    }

    let mut png = Vec::new();
    start_png(&mut png, width, height, 3, dpi);

    let plte_data: Vec<u8> = palette.iter().flat_map(|(r, g, b, _)| [*r, *g, *b]).collect();
    write_chunk(&mut png, b"PLTE", &plte_data);

    // tRNS only if any color has alpha < 255
    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    finish_png(&mut png, indices, width, height)?;
    Ok(png)
}

/// Create a PNG image from RGBA pixel data (color type 6).
pub fn create_png(
    pixels: &[u8],
    width: usize,
    height: usize,
    dpi: Option<f32>,
) -> Result<Vec<u8>, String> {
    check_len(pixels.len(), width, height, 4)?;

    let mut png = Vec::new();
    start_png(&mut png, width, height, 6, dpi);
    finish_png(&mut png, pixels, width * 4, height)?;
    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix every row with filter byte 0 and zlib-compress.
fn deflate_scanlines(
    data: &[u8],
    row_bytes: usize,
    height: usize,
) -> Result<Vec<u8>, std::io::Error> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes.max(1)).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
