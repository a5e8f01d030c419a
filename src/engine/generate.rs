use crate::foundation::core::{Point, Rgba8, SurfaceSize};
use crate::foundation::rng::RandomSource;
use crate::scene::config::EngineConfig;
use crate::scene::element::{DecorativeElement, Oscillation};
use std::f64::consts::TAU;

/// Number of draw layers; layers are `0..LAYERS`.
pub(crate) const LAYERS: usize = 3;

/// Build a fresh element set for `size`, sorted ascending by layer.
///
/// Base positions are uniform over the (unpadded) surface. The sort is stable, so elements
/// sharing a layer keep their creation order.
pub(crate) fn generate_elements(
    cfg: &EngineConfig,
    size: SurfaceSize,
    epoch: u64,
    rng: &mut dyn RandomSource,
) -> Vec<DecorativeElement> {
    let mut elements = (0..cfg.element_count)
        .map(|index| {
            let edge = rng.range(cfg.size[0], cfg.size[1]);
            let base = Point::new(rng.range(0.0, size.width), rng.range(0.0, size.height));
            let color = pick_color(cfg, rng);
            let opacity = rng.range(cfg.opacity[0], cfg.opacity[1]);
            let layer = rng.index(LAYERS) as u8;
            let rotation = rng.range(0.0, TAU);
            let rotation_speed = rng.range(-cfg.rotation_speed, cfg.rotation_speed);
            let fold_phase = rng.range(0.0, TAU);
            let fold_speed = rng.range(cfg.fold_speed[0], cfg.fold_speed[1]);
            let osc_x = oscillation(cfg, rng);
            let osc_y = oscillation(cfg, rng);

            let mut el = DecorativeElement {
                epoch,
                index,
                size: edge,
                color,
                opacity,
                layer,
                rotation_speed,
                fold_speed,
                osc_x,
                osc_y,
                base,
                display: base,
                rotation,
                fold_phase,
            };
            el.display = base + el.oscillation(0);
            el
        })
        .collect::<Vec<_>>();

    elements.sort_by_key(|el| el.layer);
    elements
}

fn pick_color(cfg: &EngineConfig, rng: &mut dyn RandomSource) -> Rgba8 {
    let palette = &cfg.theme.palette;
    palette
        .get(rng.index(palette.len()))
        .map(|c| c.rgba8())
        .unwrap_or(Rgba8::rgb(255, 255, 255))
}

fn oscillation(cfg: &EngineConfig, rng: &mut dyn RandomSource) -> Oscillation {
    Oscillation {
        amplitude: rng.range(cfg.oscillation_amplitude[0], cfg.oscillation_amplitude[1]),
        frequency: rng.range(cfg.oscillation_frequency[0], cfg.oscillation_frequency[1]),
        phase: rng.range(0.0, TAU),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/generate.rs"]
mod tests;
