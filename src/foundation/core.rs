use crate::foundation::error::{FoldError, FoldResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Absolute 0-based index of a rendered frame, as seen by frame sinks.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> FoldResult<Self> {
        if den == 0 {
            return Err(FoldError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FoldError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Measured size of a drawing surface.
///
/// `width`/`height` are logical units; element layout and pointer coordinates live in this
/// space. `scale` is the device pixel ratio applied uniformly to every draw call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Device pixel ratio.
    pub scale: f64,
}

impl SurfaceSize {
    /// Create a size, clamping non-finite or negative extents to zero and non-positive scales
    /// to `1.0`.
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        fn extent(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }

        Self {
            width: extent(width),
            height: extent(height),
            scale: if scale.is_finite() && scale > 0.0 {
                scale
            } else {
                1.0
            },
        }
    }

    /// Zero-sized surface at scale 1.
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Return `true` when either extent is zero.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Backing raster size in device pixels (`ceil(extent * scale)`).
    pub fn backing_px(self) -> (u32, u32) {
        let px = |v: f64| (v * self.scale).ceil().clamp(0.0, f64::from(u32::MAX)) as u32;
        (px(self.width), px(self.height))
    }

    /// Logical rectangle covering the whole surface.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Transform mapping logical coordinates onto the backing raster.
    pub fn device_transform(self) -> Affine {
        Affine::scale(self.scale)
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::empty()
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Multiply alpha by `factor` (clamped into `[0, 1]`).
    pub fn scale_alpha(self, factor: f64) -> Self {
        let f = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: (f64::from(self.a) * f).round() as u8,
            ..self
        }
    }

    /// Replace alpha with `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { a: 255, ..self }.scale_alpha(alpha)
    }

    /// Convert to premultiplied RGBA8 bytes.
    pub fn to_premul(self) -> [u8; 4] {
        use crate::foundation::math::mul_div255_u8;
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
