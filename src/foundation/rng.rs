use std::time::{SystemTime, UNIX_EPOCH};

/// Source of uniform random numbers used when generating element sets.
///
/// Production engines use an entropy-seeded [`Rng64`]; tests pass a fixed seed so that
/// trajectories are reproducible.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform sample in `[lo, hi)`. Returns `lo` for empty or inverted ranges.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform index in `[0, n)`. Returns 0 when `n == 0`.
    fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f64() * n as f64) as usize).min(n - 1)
    }
}

/// SplitMix64 generator.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Deterministic generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator seeded from the system clock.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos ^ u64::from(std::process::id()).rotate_left(32))
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for Rng64 {
    fn next_f64(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
