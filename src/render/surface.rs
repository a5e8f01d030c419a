use crate::foundation::core::{Affine, Point, Rect, Rgba8, SurfaceSize};
use crate::foundation::error::FoldResult;

/// Radial gradient between two colors, interpolated linearly in straight-alpha space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    /// Gradient center.
    pub center: Point,
    /// Distance at which the outer color starts to blend in.
    pub inner_radius: f64,
    /// Distance at which the outer color is reached.
    pub outer_radius: f64,
    /// Color inside `inner_radius`.
    pub inner: Rgba8,
    /// Color at and beyond `outer_radius`.
    pub outer: Rgba8,
}

impl RadialGradient {
    /// Straight-alpha color at `p`.
    pub fn color_at(&self, p: Point) -> Rgba8 {
        let d = (p - self.center).hypot();
        let span = self.outer_radius - self.inner_radius;
        let t = if span <= 0.0 {
            if d >= self.outer_radius { 1.0 } else { 0.0 }
        } else {
            ((d - self.inner_radius) / span).clamp(0.0, 1.0)
        };
        let lerp = |a: u8, b: u8| -> u8 {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgba8::rgba(
            lerp(self.inner.r, self.outer.r),
            lerp(self.inner.g, self.outer.g),
            lerp(self.inner.b, self.outer.b),
            lerp(self.inner.a, self.outer.a),
        )
    }
}

/// A 2D drawing target the animation renders into.
///
/// Coordinates passed to the drawing calls are mapped through the current transform. The
/// current alpha multiplies the alpha of every color drawn until it is changed.
pub trait DrawSurface {
    /// Current logical size and device pixel ratio.
    fn size(&self) -> SurfaceSize;

    /// Called before the first draw call of a frame.
    fn begin_frame(&mut self) -> FoldResult<()> {
        Ok(())
    }

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Replace the current global alpha (`0..=1`).
    fn set_alpha(&mut self, alpha: f64);

    /// Cover the whole surface with `color` at full alpha, leaving the device transform current.
    ///
    /// An opaque clear marks the frame as opaque: everything composited on top keeps alpha 255.
    fn clear(&mut self, color: Rgba8) {
        self.set_transform(self.size().device_transform());
        self.set_alpha(1.0);
        self.fill_rect(self.size().rect(), color);
    }

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Fill a closed polygon. Fewer than three points draw nothing.
    fn fill_polygon(&mut self, points: &[Point], color: Rgba8);

    /// Stroke an open polyline. Fewer than two points draw nothing.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8);

    /// Fill `rect` with a radial gradient.
    fn fill_radial_gradient(&mut self, rect: Rect, gradient: &RadialGradient) -> FoldResult<()>;

    /// Called after the last draw call of a frame.
    fn end_frame(&mut self) -> FoldResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
