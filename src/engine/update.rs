use crate::foundation::core::{Point, SurfaceSize, Vec2};
use crate::foundation::math::{wrap_padded, wrap_phase};
use crate::scene::config::EngineConfig;
use crate::scene::element::DecorativeElement;

/// Advance one element to frame `t`.
///
/// Motion is purely positional: drift and pointer repulsion nudge `base` directly, and the
/// displayed position is always `base + oscillation(t)`. The padded wrap runs after every
/// nudge, so `base` is inside the padded bounds when this returns.
pub(crate) fn step_element(
    el: &mut DecorativeElement,
    t: u64,
    size: SurfaceSize,
    pointer: Option<Point>,
    cfg: &EngineConfig,
) {
    let osc = el.oscillation(t);

    el.base += drift(t, el.index, cfg);
    wrap_base(el, size);

    el.rotation += el.rotation_speed;
    el.fold_phase = wrap_phase(el.fold_phase + el.fold_speed);

    el.display = el.base + osc;
    if let Some(push) = pointer.and_then(|p| repulsion(el.display, p, cfg)) {
        el.base += push;
        wrap_base(el, size);
    }

    el.display = el.base + osc;
}

/// Slow drift for frame `t`; `index` decorrelates elements.
pub(crate) fn drift(t: u64, index: usize, cfg: &EngineConfig) -> Vec2 {
    let angle = t as f64 * cfg.drift_frequency + index as f64;
    Vec2::new(angle.sin(), angle.cos()) * cfg.drift_speed
}

/// Positional nudge pushing `display` away from `pointer`.
///
/// `None` outside the interaction radius and when the two points coincide.
pub(crate) fn repulsion(display: Point, pointer: Point, cfg: &EngineConfig) -> Option<Vec2> {
    let radius = cfg.interaction_radius;
    let away = display - pointer;
    let dist = away.hypot();
    if dist.is_nan() || dist <= 0.0 || dist >= radius {
        return None;
    }
    let force = (radius - dist) / radius;
    Some(away / dist * force * cfg.repulsion_strength)
}

fn wrap_base(el: &mut DecorativeElement, size: SurfaceSize) {
    let (lo, hi) = el.padded_bounds(size.width, size.height);
    el.base.x = wrap_padded(el.base.x, lo.x, hi.x);
    el.base.y = wrap_padded(el.base.y, lo.y, hi.y);
}

#[cfg(test)]
#[path = "../../tests/unit/engine/update.rs"]
mod tests;
