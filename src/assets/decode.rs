use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::SoniformResult;

/// A decoded raster image in straight-alpha RGBA8.
///
/// Straight alpha is kept because the logo background-removal pass operates
/// on source channel values; premultiplication happens when an image is
/// turned into a rasterizer paint.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8 bytes.
    pub rgba8: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Aspect ratio (width / height); 1.0 for degenerate heights.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode encoded image bytes (PNG/JPEG/...) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> SoniformResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PreparedImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Multiply RGB by alpha in place, converting straight RGBA8 to premultiplied.
pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
