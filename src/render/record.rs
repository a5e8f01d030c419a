use crate::foundation::core::{Affine, Point, Rect, Rgba8, SurfaceSize};
use crate::foundation::error::FoldResult;
use crate::render::surface::{DrawSurface, RadialGradient};

/// One recorded draw call, with the transform and alpha that were current when it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// [`DrawSurface::fill_rect`].
    FillRect {
        /// Rectangle in transform space.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
        /// Current transform.
        transform: Affine,
        /// Current alpha.
        alpha: f64,
    },
    /// [`DrawSurface::fill_polygon`].
    FillPolygon {
        /// Polygon vertices in transform space.
        points: Vec<Point>,
        /// Fill color.
        color: Rgba8,
        /// Current transform.
        transform: Affine,
        /// Current alpha.
        alpha: f64,
    },
    /// [`DrawSurface::stroke_polyline`].
    StrokePolyline {
        /// Polyline vertices in transform space.
        points: Vec<Point>,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
        /// Current transform.
        transform: Affine,
        /// Current alpha.
        alpha: f64,
    },
    /// [`DrawSurface::fill_radial_gradient`].
    RadialGradient {
        /// Filled rectangle in transform space.
        rect: Rect,
        /// Gradient parameters.
        gradient: RadialGradient,
        /// Current transform.
        transform: Affine,
    },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// `begin_frame` clears the previous frame's commands.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    transform: Affine,
    alpha: f64,
    commands: Vec<DrawCommand>,
    frames_begun: u64,
    frames_ended: u64,
}

impl RecordingSurface {
    /// Create a recording surface of the given logical size.
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            size: SurfaceSize::new(width, height, scale),
            transform: Affine::IDENTITY,
            alpha: 1.0,
            commands: Vec::new(),
            frames_begun: 0,
            frames_ended: 0,
        }
    }

    /// Change the reported size. Takes effect for the engine on its next `on_resize`.
    pub fn resize(&mut self, width: f64, height: f64, scale: f64) {
        self.size = SurfaceSize::new(width, height, scale);
    }

    /// Commands recorded since the last `begin_frame`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded polygon fills, in draw order.
    pub fn polygons(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPolygon { .. }))
    }

    /// Number of frames started and finished.
    pub fn frame_counts(&self) -> (u64, u64) {
        (self.frames_begun, self.frames_ended)
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn begin_frame(&mut self) -> FoldResult<()> {
        self.commands.clear();
        self.transform = Affine::IDENTITY;
        self.alpha = 1.0;
        self.frames_begun += 1;
        Ok(())
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            transform: self.transform,
            alpha: self.alpha,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
            transform: self.transform,
            alpha: self.alpha,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            width,
            color,
            transform: self.transform,
            alpha: self.alpha,
        });
    }

    fn fill_radial_gradient(&mut self, rect: Rect, gradient: &RadialGradient) -> FoldResult<()> {
        self.commands.push(DrawCommand::RadialGradient {
            rect,
            gradient: *gradient,
            transform: self.transform,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> FoldResult<()> {
        self.frames_ended += 1;
        Ok(())
    }
}
