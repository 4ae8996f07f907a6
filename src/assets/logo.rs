//! Logo background removal.
//!
//! The background color is sampled as the average of the four image corners;
//! every pixel within a tolerance-derived Euclidean RGB distance of it gets
//! a graduated alpha proportional to its distance. The routine is a pure
//! function of (pixels, tolerance), so recomputation on a config change is
//! idempotent: same inputs, bit-identical mask.

use std::sync::Arc;

use crate::assets::decode::PreparedImage;

/// Produce a background-keyed copy of `image` at `tolerance_pct` (50-100).
///
/// Higher tolerance keeps more of the image: the distance threshold shrinks
/// linearly from 170 down to 20 as tolerance rises.
pub fn key_out_background(image: &PreparedImage, tolerance_pct: f32) -> PreparedImage {
    let mut rgba = image.rgba8.as_ref().clone();
    let (w, h) = (image.width as usize, image.height as usize);
    if w == 0 || h == 0 || rgba.len() < w * h * 4 {
        return image.clone();
    }

    let bg = corner_average(&rgba, w, h);
    let tolerance = tolerance_pct.clamp(50.0, 100.0);
    let threshold = ((100.0 - tolerance) / 100.0) * 150.0 + 20.0;

    for px in rgba.chunks_exact_mut(4) {
        let dr = f32::from(px[0]) - bg[0];
        let dg = f32::from(px[1]) - bg[1];
        let db = f32::from(px[2]) - bg[2];
        let diff = (dr * dr + dg * dg + db * db).sqrt();

        if diff < threshold {
            // Graduated alpha for a soft edge instead of a hard cutout.
            let alpha = ((diff / threshold) * 255.0).clamp(0.0, 255.0);
            px[3] = alpha.round() as u8;
        }
    }

    PreparedImage {
        width: image.width,
        height: image.height,
        rgba8: Arc::new(rgba),
    }
}

fn corner_average(rgba: &[u8], w: usize, h: usize) -> [f32; 3] {
    let corners = [
        0,
        (w - 1) * 4,
        (h - 1) * w * 4,
        ((h - 1) * w + (w - 1)) * 4,
    ];
    let mut sum = [0.0f32; 3];
    for idx in corners {
        sum[0] += f32::from(rgba[idx]);
        sum[1] += f32::from(rgba[idx + 1]);
        sum[2] += f32::from(rgba[idx + 2]);
    }
    [
        (sum[0] / 4.0).round(),
        (sum[1] / 4.0).round(),
        (sum[2] / 4.0).round(),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/assets/logo.rs"]
mod tests;
