use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
}

#[test]
fn wrap_phase_stays_in_range() {
    assert_eq!(wrap_phase(0.0), 0.0);
    assert!((wrap_phase(TAU + 0.25) - 0.25).abs() < 1e-12);
    assert_eq!(wrap_phase(TAU), 0.0);
    assert_eq!(wrap_phase(f64::INFINITY), 0.0);
    let w = wrap_phase(-1e-18);
    assert!((0.0..TAU).contains(&w));
}

#[test]
fn wrap_padded_teleports_to_opposite_edge() {
    assert_eq!(wrap_padded(-31.0, -30.0, 830.0), 830.0);
    assert_eq!(wrap_padded(831.0, -30.0, 830.0), -30.0);
    assert_eq!(wrap_padded(400.0, -30.0, 830.0), 400.0);
    assert_eq!(wrap_padded(-30.0, -30.0, 830.0), -30.0);
}
