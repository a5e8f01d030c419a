use crate::foundation::core::{Affine, Point, Rect, Rgba8, SurfaceSize};
use crate::foundation::error::{FoldError, FoldResult};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{DrawSurface, RadialGradient};
use std::collections::HashMap;
use std::sync::Arc;

const GRADIENT_CACHE_CAPACITY: usize = 8;

struct Raster {
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    width: u16,
    height: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    x0: i64,
    y0: i64,
    w: u32,
    h: u32,
    // center.x, center.y, inner_radius, outer_radius, alpha, transform coefficients
    bits: [u64; 11],
    inner: [u8; 4],
    outer: [u8; 4],
}

/// CPU raster surface powered by `vello_cpu`.
///
/// The backing pixmap is `ceil(width * scale) x ceil(height * scale)` device pixels. A
/// zero-sized surface keeps no raster at all: draw calls are dropped and [`CpuSurface::frame`]
/// returns an empty frame.
pub struct CpuSurface {
    size: SurfaceSize,
    raster: Option<Raster>,
    transform: Affine,
    alpha: f64,
    opaque: bool,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("size", &self.size)
            .field("backing_px", &self.size.backing_px())
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Create a surface of `width x height` logical units at device pixel ratio `scale`.
    pub fn new(width: f64, height: f64, scale: f64) -> FoldResult<Self> {
        let size = SurfaceSize::new(width, height, scale);
        Ok(Self {
            size,
            raster: Raster::for_size(size)?,
            transform: Affine::IDENTITY,
            alpha: 1.0,
            opaque: false,
            gradient_cache: HashMap::new(),
        })
    }

    /// Reallocate the backing raster for a new size. Pixel content is discarded.
    pub fn resize(&mut self, width: f64, height: f64, scale: f64) -> FoldResult<()> {
        let size = SurfaceSize::new(width, height, scale);
        if size == self.size {
            return Ok(());
        }
        self.raster = Raster::for_size(size)?;
        self.size = size;
        self.gradient_cache.clear();
        tracing::debug!(
            width = size.width,
            height = size.height,
            scale = size.scale,
            "cpu surface resized"
        );
        Ok(())
    }

    /// Read back the last finished frame as premultiplied RGBA8.
    pub fn frame(&self) -> FrameRGBA {
        match &self.raster {
            None => FrameRGBA::empty(),
            Some(r) => FrameRGBA {
                width: u32::from(r.width),
                height: u32::from(r.height),
                data: r.pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            },
        }
    }

    fn paint_color(&self, color: Rgba8) -> vello_cpu::peniko::Color {
        let c = color.scale_alpha(self.alpha);
        vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl Raster {
    fn for_size(size: SurfaceSize) -> FoldResult<Option<Self>> {
        let (w, h) = size.backing_px();
        if w == 0 || h == 0 {
            return Ok(None);
        }
        let width: u16 = w
            .try_into()
            .map_err(|_| FoldError::render("surface width exceeds u16"))?;
        let height: u16 = h
            .try_into()
            .map_err(|_| FoldError::render("surface height exceeds u16"))?;
        Ok(Some(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            width,
            height,
        }))
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn begin_frame(&mut self) -> FoldResult<()> {
        self.transform = Affine::IDENTITY;
        self.alpha = 1.0;
        self.opaque = false;
        if let Some(r) = self.raster.as_mut() {
            r.ctx.reset();
            r.pixmap.data_as_u8_slice_mut().fill(0);
        }
        Ok(())
    }

    fn clear(&mut self, color: Rgba8) {
        self.set_transform(self.size.device_transform());
        self.set_alpha(1.0);
        self.fill_rect(self.size.rect(), color);
        self.opaque = color.a == 255;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let paint = self.paint_color(color);
        let transform = affine_to_cpu(self.transform);
        let Some(r) = self.raster.as_mut() else {
            return;
        };
        r.ctx.set_transform(transform);
        r.ctx.set_paint(paint);
        r.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        if points.len() < 3 {
            return;
        }
        let paint = self.paint_color(color);
        let transform = affine_to_cpu(self.transform);
        let Some(r) = self.raster.as_mut() else {
            return;
        };
        let mut path = polyline_to_cpu(points);
        path.close_path();
        r.ctx.set_transform(transform);
        r.ctx.set_paint(paint);
        r.ctx.fill_path(&path);
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) {
        if points.len() < 2 || width.is_nan() || width <= 0.0 {
            return;
        }
        let paint = self.paint_color(color);
        let transform = affine_to_cpu(self.transform);
        let Some(r) = self.raster.as_mut() else {
            return;
        };
        let path = polyline_to_cpu(points);
        r.ctx.set_transform(transform);
        r.ctx.set_paint(paint);
        r.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        r.ctx.stroke_path(&path);
    }

    fn fill_radial_gradient(&mut self, rect: Rect, gradient: &RadialGradient) -> FoldResult<()> {
        let Some(r) = self.raster.as_mut() else {
            return Ok(());
        };
        if self.transform.determinant().abs() < 1e-12 {
            return Ok(());
        }

        // Bake the gradient over the covered device pixels, then draw it as an image paint.
        let bounds = Rect::new(0.0, 0.0, f64::from(r.width), f64::from(r.height));
        let dev = self.transform.transform_rect_bbox(rect).intersect(bounds);
        let x0 = dev.x0.floor();
        let y0 = dev.y0.floor();
        let w = (dev.x1.ceil() - x0).max(0.0) as u32;
        let h = (dev.y1.ceil() - y0).max(0.0) as u32;
        if w == 0 || h == 0 {
            return Ok(());
        }

        let c = self.transform.as_coeffs();
        let key = GradientKey {
            x0: x0 as i64,
            y0: y0 as i64,
            w,
            h,
            bits: [
                gradient.center.x.to_bits(),
                gradient.center.y.to_bits(),
                gradient.inner_radius.to_bits(),
                gradient.outer_radius.to_bits(),
                self.alpha.to_bits(),
                c[0].to_bits(),
                c[1].to_bits(),
                c[2].to_bits(),
                c[3].to_bits(),
                c[4].to_bits(),
                c[5].to_bits(),
            ],
            inner: [
                gradient.inner.r,
                gradient.inner.g,
                gradient.inner.b,
                gradient.inner.a,
            ],
            outer: [
                gradient.outer.r,
                gradient.outer.g,
                gradient.outer.b,
                gradient.outer.a,
            ],
        };

        let image = match self.gradient_cache.get(&key).cloned() {
            Some(img) => img,
            None => {
                let inverse = self.transform.inverse();
                let mut bytes = vec![0u8; (w as usize) * (h as usize) * 4];
                for (i, px) in bytes.chunks_exact_mut(4).enumerate() {
                    let x = (i % w as usize) as f64;
                    let y = (i / w as usize) as f64;
                    let p = inverse * Point::new(x0 + x + 0.5, y0 + y + 0.5);
                    let color = gradient.color_at(p).scale_alpha(self.alpha);
                    px.copy_from_slice(&color.to_premul());
                }
                let img = rgba_premul_to_image(&bytes, w, h)?;
                if self.gradient_cache.len() >= GRADIENT_CACHE_CAPACITY {
                    self.gradient_cache.clear();
                }
                self.gradient_cache.insert(key, img.clone());
                img
            }
        };

        r.ctx.set_transform(vello_cpu::kurbo::Affine::translate((x0, y0)));
        r.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        r.ctx.set_paint(image);
        r.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        Ok(())
    }

    fn end_frame(&mut self) -> FoldResult<()> {
        if let Some(r) = self.raster.as_mut() {
            r.ctx.flush();
            r.ctx.render_to_pixmap(&mut r.pixmap);
            // u8 compositing over an opaque clear can round alpha down to 253..254
            if self.opaque {
                for px in r.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
                    px[3] = 255;
                }
            }
        }
        Ok(())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn polyline_to_cpu(points: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for (i, p) in points.iter().enumerate() {
        let p = vello_cpu::kurbo::Point::new(p.x, p.y);
        if i == 0 {
            out.move_to(p);
        } else {
            out.line_to(p);
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> FoldResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FoldError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FoldError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FoldError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> FoldResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
