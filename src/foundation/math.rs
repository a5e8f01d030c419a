use std::f64::consts::TAU;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Wrap `phase` into `[0, TAU)`.
///
/// Values that land exactly on `TAU` after float rounding are folded back to `0.0`.
pub(crate) fn wrap_phase(phase: f64) -> f64 {
    if !phase.is_finite() {
        return 0.0;
    }
    let w = phase.rem_euclid(TAU);
    if w >= TAU { 0.0 } else { w }
}

/// Teleport `v` to the opposite edge of `[lo, hi]` when it leaves the interval.
pub(crate) fn wrap_padded(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        hi
    } else if v > hi {
        lo
    } else {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
