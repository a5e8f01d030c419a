use crate::foundation::core::Rgba8;
use crate::foundation::error::{FoldError, FoldResult};
use crate::scene::color::ColorDef;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Smallest non-zero grid spacing, in logical pixels.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Colors used by the background animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Opaque background fill.
    pub background: ColorDef,
    /// Element colors; one is picked per element at creation.
    pub palette: Vec<ColorDef>,
    /// Overlay grid line color (alpha comes from `EngineConfig::grid_alpha`).
    pub grid: ColorDef,
    /// Fold crease line color.
    pub crease: ColorDef,
    /// Vignette edge color (alpha comes from `EngineConfig::vignette_strength`).
    pub vignette: ColorDef,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: ColorDef(Rgba8::rgb(0x0a, 0x0a, 0x0f)),
            palette: vec![
                ColorDef(Rgba8::rgb(0x63, 0x66, 0xf1)),
                ColorDef(Rgba8::rgb(0x8b, 0x5c, 0xf6)),
                ColorDef(Rgba8::rgb(0xec, 0x48, 0x99)),
                ColorDef(Rgba8::rgb(0x06, 0xb6, 0xd4)),
                ColorDef(Rgba8::rgb(0x10, 0xb9, 0x81)),
                ColorDef(Rgba8::rgb(0xf5, 0x9e, 0x0b)),
            ],
            grid: ColorDef(Rgba8::rgb(0xff, 0xff, 0xff)),
            crease: ColorDef(Rgba8::rgb(0xff, 0xff, 0xff)),
            vignette: ColorDef(Rgba8::rgb(0x00, 0x00, 0x00)),
        }
    }
}

/// Tunables for element generation, the per-frame update and the renderer.
///
/// Ranges are `[min, max]` pairs; element parameters are sampled uniformly inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of decorative elements per epoch.
    pub element_count: usize,
    /// Pointer repulsion radius in logical pixels.
    pub interaction_radius: f64,
    /// Scale applied to the repulsion nudge.
    pub repulsion_strength: f64,
    /// Drift magnitude in logical pixels per frame.
    pub drift_speed: f64,
    /// How fast the drift direction turns, in radians per frame.
    pub drift_frequency: f64,
    /// Fold amount above which the back face and crease are drawn.
    pub fold_threshold: f64,
    /// Element edge length.
    pub size: [f64; 2],
    /// Element opacity.
    pub opacity: [f64; 2],
    /// Maximum absolute angular velocity, radians per frame.
    pub rotation_speed: f64,
    /// Fold phase rate, radians per frame.
    pub fold_speed: [f64; 2],
    /// Oscillation amplitude per axis, logical pixels.
    pub oscillation_amplitude: [f64; 2],
    /// Oscillation frequency per axis, radians per frame.
    pub oscillation_frequency: [f64; 2],
    /// Distance between grid lines; `0` disables the grid.
    pub grid_spacing: f64,
    /// Grid line wave amplitude.
    pub grid_wave_amplitude: f64,
    /// Grid line alpha.
    pub grid_alpha: f64,
    /// Vignette alpha at the surface corners.
    pub vignette_strength: f64,
    /// Colors.
    pub theme: Theme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            element_count: 40,
            interaction_radius: 150.0,
            repulsion_strength: 0.5,
            drift_speed: 0.1,
            drift_frequency: 0.001,
            fold_threshold: 0.1,
            size: [20.0, 60.0],
            opacity: [0.1, 0.4],
            rotation_speed: 0.01,
            fold_speed: [0.01, 0.03],
            oscillation_amplitude: [10.0, 30.0],
            oscillation_frequency: [0.005, 0.015],
            grid_spacing: 60.0,
            grid_wave_amplitude: 2.0,
            grid_alpha: 0.04,
            vignette_strength: 0.6,
            theme: Theme::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> FoldResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| FoldError::serde(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FoldResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FoldError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON rendering of this config.
    pub fn to_json_pretty(&self) -> FoldResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FoldError::serde(format!("serialize engine config: {e}")))
    }

    /// Check every field for finiteness and sane ranges.
    pub fn validate(&self) -> FoldResult<()> {
        non_negative("interaction_radius", self.interaction_radius)?;
        non_negative("repulsion_strength", self.repulsion_strength)?;
        non_negative("drift_speed", self.drift_speed)?;
        finite("drift_frequency", self.drift_frequency)?;
        non_negative("rotation_speed", self.rotation_speed)?;
        non_negative("grid_spacing", self.grid_spacing)?;
        if self.grid_spacing > 0.0 && self.grid_spacing < MIN_GRID_SPACING {
            return Err(FoldError::validation(format!(
                "grid_spacing must be 0 (no grid) or >= {MIN_GRID_SPACING}"
            )));
        }
        non_negative("grid_wave_amplitude", self.grid_wave_amplitude)?;
        unit("grid_alpha", self.grid_alpha)?;
        unit("vignette_strength", self.vignette_strength)?;

        if !(0.0..0.5).contains(&self.fold_threshold) {
            return Err(FoldError::validation(
                "fold_threshold must be in [0, 0.5): fold amount never exceeds 0.5",
            ));
        }

        span("size", self.size)?;
        if self.size[0] <= 0.0 {
            return Err(FoldError::validation("size min must be > 0"));
        }
        span("opacity", self.opacity)?;
        unit("opacity max", self.opacity[1])?;
        span("fold_speed", self.fold_speed)?;
        span("oscillation_amplitude", self.oscillation_amplitude)?;
        span("oscillation_frequency", self.oscillation_frequency)?;

        if self.element_count > 0 && self.theme.palette.is_empty() {
            return Err(FoldError::validation(
                "theme.palette must contain at least one color",
            ));
        }
        Ok(())
    }
}

fn finite(field: &str, v: f64) -> FoldResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(FoldError::validation(format!("{field} must be finite")))
    }
}

fn non_negative(field: &str, v: f64) -> FoldResult<()> {
    finite(field, v)?;
    if v < 0.0 {
        return Err(FoldError::validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

fn unit(field: &str, v: f64) -> FoldResult<()> {
    non_negative(field, v)?;
    if v > 1.0 {
        return Err(FoldError::validation(format!("{field} must be <= 1")));
    }
    Ok(())
}

fn span(field: &str, [lo, hi]: [f64; 2]) -> FoldResult<()> {
    non_negative(field, lo)?;
    non_negative(field, hi)?;
    if lo > hi {
        return Err(FoldError::validation(format!(
            "{field} range must be [min, max] with min <= max"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
