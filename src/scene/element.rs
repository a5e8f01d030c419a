use crate::foundation::core::{Point, Rgba8, Vec2};

/// Per-axis sinusoidal oscillation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    /// Peak offset in logical pixels.
    pub amplitude: f64,
    /// Radians per frame.
    pub frequency: f64,
    /// Phase shift in radians.
    pub phase: f64,
}

impl Oscillation {
    /// Zero-amplitude oscillation.
    pub const NONE: Self = Self {
        amplitude: 0.0,
        frequency: 0.0,
        phase: 0.0,
    };
}

/// One folding square.
///
/// Fields under "static" never change within an epoch; the dynamic ones are rewritten in
/// place by the update step every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorativeElement {
    // static
    /// Epoch this element was generated in.
    pub epoch: u64,
    /// Creation index inside the epoch, before layer sorting.
    pub index: usize,
    /// Edge length.
    pub size: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Front face opacity.
    pub opacity: f64,
    /// Draw layer in `0..=2`, back to front.
    pub layer: u8,
    /// Radians added to `rotation` per frame.
    pub rotation_speed: f64,
    /// Radians added to `fold_phase` per frame.
    pub fold_speed: f64,
    /// Horizontal oscillation (sine).
    pub osc_x: Oscillation,
    /// Vertical oscillation (cosine).
    pub osc_y: Oscillation,

    // dynamic
    /// Resting position before oscillation.
    pub base: Point,
    /// Position used for drawing and pointer interaction.
    pub display: Point,
    /// Current rotation in radians.
    pub rotation: f64,
    /// Fold phase in `[0, TAU)`.
    pub fold_phase: f64,
}

impl DecorativeElement {
    /// Oscillation offset at frame `t`.
    pub fn oscillation(&self, t: u64) -> Vec2 {
        let t = t as f64;
        Vec2::new(
            (t * self.osc_x.frequency + self.osc_x.phase).sin() * self.osc_x.amplitude,
            (t * self.osc_y.frequency + self.osc_y.phase).cos() * self.osc_y.amplitude,
        )
    }

    /// Signed fold amount in `[-0.5, 0.5]` derived from the fold phase.
    pub fn fold_amount(&self) -> f64 {
        self.fold_phase.sin() * 0.5
    }

    /// Padded bounds `[-size, w+size] x [-size, h+size]` the base position must stay in.
    pub fn padded_bounds(&self, width: f64, height: f64) -> (Point, Point) {
        (
            Point::new(-self.size, -self.size),
            Point::new(width + self.size, height + self.size),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/element.rs"]
mod tests;
