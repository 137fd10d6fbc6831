//! Minimal PNG encoding for RGBA rasters.
//!
//! Color type 6 (RGBA, 8-bit), filter 0 on every scanline, zlib via flate2,
//! chunk CRCs via crc32fast. Heatmap rasters are small (one pixel per grid
//! cell), so no palette or filter heuristics are needed.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;
use thiserror::Error;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[derive(Debug, Error)]
pub enum PngError {
    #[error("pixel buffer length {len} does not match {width}x{height} RGBA")]
    BadDimensions {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("deflate failed: {0}")]
    Deflate(String),
}

/// Encode an RGBA pixel buffer as a PNG image.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, PngError> {
    if pixels.len() != width * height * 4 || width == 0 || height == 0 {
        return Err(PngError::BadDimensions {
            len: pixels.len(),
            width,
            height,
        });
    }

    let mut png = Vec::with_capacity(pixels.len() / 4 + 64);
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR: dimensions, 8-bit depth, color type 6 (RGBA).
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);
    write_chunk(&mut png, b"IHDR", &ihdr);

    // IDAT: each scanline prefixed with filter byte 0, zlib-compressed.
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    for scanline in pixels.chunks_exact(width * 4) {
        encoder
            .write_all(&[0])
            .and_then(|_| encoder.write_all(scanline))
            .map_err(|e| PngError::Deflate(e.to_string()))?;
    }
    let idat = encoder
        .finish()
        .map_err(|e| PngError::Deflate(e.to_string()))?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_and_ihdr() {
        let pixels = vec![255u8; 3 * 2 * 4];
        let png = encode_rgba(&pixels, 3, 2).unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
        // IHDR length + type
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        // Width 3, height 2
        assert_eq!(&png[16..20], &3u32.to_be_bytes());
        assert_eq!(&png[20..24], &2u32.to_be_bytes());
        // Bit depth 8, color type 6
        assert_eq!(png[24], 8);
        assert_eq!(png[25], 6);
        // Trailer
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        assert!(matches!(
            encode_rgba(&[0u8; 10], 3, 2),
            Err(PngError::BadDimensions { .. })
        ));
        assert!(encode_rgba(&[], 0, 0).is_err());
    }
}
