//! Legend strip rendering.

use crate::scale::ColorScale;

/// Render a horizontal legend strip for a color scale as an RGBA buffer.
///
/// Column 0 samples the scale at its first stop, the last column at its
/// last stop; every row repeats the same gradient. The strip is pure
/// presentation of [`ColorScale::color_at`], so legends and heatmaps can
/// never disagree about a value's color.
pub fn render_strip(scale: &ColorScale, width: usize, height: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; width * height * 4];
    if width == 0 || height == 0 {
        return pixels;
    }

    let (min, max) = scale.domain();
    let span = max - min;

    let mut row = Vec::with_capacity(width * 4);
    for col in 0..width {
        let t = if width == 1 {
            0.0
        } else {
            col as f64 / (width - 1) as f64
        };
        let color = scale.color_at(min + t * span);
        row.extend_from_slice(&[color.r, color.g, color.b, 255]);
    }

    for out in pixels.chunks_exact_mut(width * 4) {
        out.copy_from_slice(&row);
    }

    pixels
}
