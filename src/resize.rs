//! Nearest-neighbor resampling of the input onto a bounded working size.
//!
//! Clustering cost is proportional to the working pixel count, so the input
//! is always mapped to an image whose longest side equals `max_side`. This
//! is applied unconditionally; inputs smaller than the budget are scaled up,
//! which keeps per-cluster weights stable regardless of input size.

use image::RgbaImage;

use crate::error::PalettizeError;

/// Resample `source` so its longest side equals `max_side`, copying pixels
/// verbatim (no interpolation).
///
/// Both destination dimensions must come out at least 2: the sampling
/// coordinates are normalized as `x / (width - 1)`, and centroid reseeding
/// draws coordinates from `[0, dim - 1)`.
pub fn fit_to_max_side(source: &RgbaImage, max_side: u32) -> Result<RgbaImage, PalettizeError> {
    let (sw, sh) = source.dimensions();
    if sw == 0 || sh == 0 {
        return Err(PalettizeError::EmptyImage {
            width: sw,
            height: sh,
        });
    }

    let factor = max_side as f32 / sw.max(sh) as f32;
    let dw = (sw as f32 * factor).round() as u32;
    let dh = (sh as f32 * factor).round() as u32;
    if dw < 2 || dh < 2 {
        return Err(PalettizeError::DegenerateImage {
            width: dw,
            height: dh,
        });
    }

    if (dw, dh) == (sw, sh) {
        return Ok(source.clone());
    }

    let mut dest = RgbaImage::new(dw, dh);
    for (x, y, pixel) in dest.enumerate_pixels_mut() {
        let u = x as f32 / (dw - 1) as f32;
        let v = y as f32 / (dh - 1) as f32;
        let sx = (u * (sw - 1) as f32).round() as u32;
        let sy = (v * (sh - 1) as f32).round() as u32;
        *pixel = *source.get_pixel(sx, sy);
    }

    Ok(dest)
}
