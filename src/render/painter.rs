//! Vector drawing layer over `vello_cpu`.
//!
//! The rasterizer fills; it does not stroke. Strokes and glows are expanded
//! into fill outlines with `kurbo::stroke` before submission, which keeps
//! the backend surface small and the output deterministic.

use std::sync::Arc;

use crate::assets::decode::{PreparedImage, premultiply_rgba8_in_place};
use crate::foundation::core::{Affine, BezPath, Rect, Rgb8, Vec2};
use crate::foundation::error::{SoniformError, SoniformResult};

/// A decoded image wrapped as a rasterizer paint.
#[derive(Clone)]
pub(crate) struct ImagePaint {
    pub(crate) paint: vello_cpu::Image,
    pub(crate) w: u32,
    pub(crate) h: u32,
}

impl ImagePaint {
    /// Premultiply a straight-alpha image and wrap it as a paint.
    pub(crate) fn from_straight(image: &PreparedImage) -> SoniformResult<Self> {
        let mut bytes = image.rgba8.as_ref().clone();
        premultiply_rgba8_in_place(&mut bytes);
        let paint = rgba_premul_to_image(&bytes, image.width, image.height)?;
        Ok(Self {
            paint,
            w: image.width,
            h: image.height,
        })
    }

    /// Wrap already-premultiplied bytes as a paint.
    pub(crate) fn from_premul(bytes: &[u8], w: u32, h: u32) -> SoniformResult<Self> {
        Ok(Self {
            paint: rgba_premul_to_image(bytes, w, h)?,
            w,
            h,
        })
    }
}

/// Scoped vector-draw pass; one `Painter` is reused across frames.
pub(crate) struct Painter {
    ctx: vello_cpu::RenderContext,
    base: Affine,
}

impl Painter {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            base: Affine::IDENTITY,
        }
    }

    /// Start a pass. `offset` is the camera-shake translation; it applies to
    /// everything drawn until `finish_into`, and is dropped afterwards so
    /// shake never accumulates across frames.
    pub(crate) fn begin(&mut self, offset: Vec2) {
        self.ctx.reset();
        self.base = Affine::translate(offset);
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.base));
    }

    /// Set a solid paint with straight alpha in [0, 1].
    pub(crate) fn set_solid(&mut self, color: Rgb8, alpha: f32) {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, a,
            ));
    }

    /// Set an image paint.
    pub(crate) fn set_image(&mut self, image: &ImagePaint) {
        self.ctx.set_paint(image.paint.clone());
    }

    /// Fill an axis-aligned rect with the current paint.
    pub(crate) fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    /// Fill a path with the current paint.
    pub(crate) fn fill_path(&mut self, path: &BezPath) {
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Stroke a path with round caps/joins by filling its expanded outline.
    pub(crate) fn stroke_path(&mut self, path: &BezPath, width: f64) {
        let style = kurbo::Stroke::new(width.max(0.1))
            .with_caps(kurbo::Cap::Round)
            .with_join(kurbo::Join::Round);
        let outline = kurbo::stroke(
            path.elements().iter().copied(),
            &style,
            &kurbo::StrokeOpts::default(),
            0.1,
        );
        self.fill_path(&outline);
    }

    /// Stroke with a soft glow: two widened low-alpha passes underneath the
    /// main stroke. An approximation of canvas shadow-blur, tuned by eye.
    pub(crate) fn stroke_glow(
        &mut self,
        path: &BezPath,
        width: f64,
        color: Rgb8,
        alpha: f32,
        glow_px: f64,
    ) {
        if glow_px > 0.0 {
            self.set_solid(color, alpha * 0.15);
            self.stroke_path(path, width + glow_px * 1.6);
            self.set_solid(color, alpha * 0.3);
            self.stroke_path(path, width + glow_px * 0.7);
        }
        self.set_solid(color, alpha);
        self.stroke_path(path, width);
    }

    /// Fill a rect with a soft glow halo underneath.
    pub(crate) fn fill_rect_glow(&mut self, rect: Rect, color: Rgb8, alpha: f32, glow_px: f64) {
        if glow_px > 0.0 {
            self.set_solid(color, alpha * 0.2);
            self.fill_rect(rect.inflate(glow_px * 0.8, glow_px * 0.8));
        }
        self.set_solid(color, alpha);
        self.fill_rect(rect);
    }

    /// Group subsequent draws under a uniform opacity until `pop_opacity`.
    pub(crate) fn push_opacity(&mut self, alpha: f32) {
        self.ctx.push_opacity_layer(alpha.clamp(0.0, 1.0));
    }

    /// Close the group opened by `push_opacity`.
    pub(crate) fn pop_opacity(&mut self) {
        self.ctx.pop_layer();
    }

    /// Draw an image scaled into `dst`, preserving nothing (caller decides
    /// the aspect ratio of `dst`).
    pub(crate) fn draw_image(&mut self, image: &ImagePaint, dst: Rect) {
        if image.w == 0 || image.h == 0 {
            return;
        }
        let local = Affine::translate(Vec2::new(dst.x0, dst.y0))
            * Affine::scale_non_uniform(
                dst.width() / f64::from(image.w),
                dst.height() / f64::from(image.h),
            );
        self.ctx.set_transform(affine_to_cpu(self.base * local));
        self.set_image(image);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.w),
            f64::from(image.h),
        ));
        self.ctx.set_transform(affine_to_cpu(self.base));
    }

    /// Run `f` with `local` composed onto the pass transform, restoring the
    /// pass transform afterwards even though `f` may draw freely.
    pub(crate) fn with_local_transform(&mut self, local: Affine, f: impl FnOnce(&mut Self)) {
        self.ctx.set_transform(affine_to_cpu(self.base * local));
        f(self);
        self.ctx.set_transform(affine_to_cpu(self.base));
    }

    /// Flush the pass into `dst`, replacing its contents.
    pub(crate) fn finish_into(&mut self, dst: &mut vello_cpu::Pixmap) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(dst);
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SoniformResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SoniformError::evaluation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SoniformError::evaluation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SoniformError::evaluation("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

pub(crate) fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> SoniformResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Build a 1px-tall horizontal strip paint; `column` returns straight RGBA
/// for each x. Used for gradient and rainbow strokes: a single row extends
/// vertically under any sampler mode, giving a pure horizontal gradient.
pub(crate) fn hstrip_image(
    width: u32,
    mut column: impl FnMut(u32) -> [u8; 4],
) -> SoniformResult<vello_cpu::Image> {
    let w = width.max(1);
    let mut bytes = vec![0u8; w as usize * 4];
    for x in 0..w {
        let [r, g, b, a] = column(x);
        let premul = crate::foundation::core::Rgba8Premul::from_straight_rgba(r, g, b, a);
        let i = x as usize * 4;
        bytes[i] = premul.r;
        bytes[i + 1] = premul.g;
        bytes[i + 2] = premul.b;
        bytes[i + 3] = premul.a;
    }
    rgba_premul_to_image(&bytes, w, 1)
}
