// Copyright 2026 Pax Foundation. All rights reserved.
// Pax Protocol Simulation Suite ("The Dovecote") - Randomness Strategy

//! Injectable randomness for reward and score assignment.
//!
//! The simulator never calls a global RNG. It draws from a [`RandomSource`]
//! supplied at construction, so tests can inject a fixed sequence and assert
//! exact outputs instead of ranges.

// ─── RandomSource ────────────────────────────────────────────────────────────

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in `[lo, hi)`.
    fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }
}

// ─── SplitMix64 (all targets, WASM default) ──────────────────────────────────

/// Seedable SplitMix64 generator. The WASM build has no OS entropy source,
/// so the browser surface seeds one of these from the host.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn seed_from(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix64 {
    fn next_unit(&mut self) -> f64 {
        // Top 53 bits give a uniform double in [0, 1).
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

// ─── ChaChaSource (native default) ───────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
pub use native::ChaChaSource;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::RandomSource;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Seedable ChaCha8 source, same PRNG family the scenario runner uses.
    #[derive(Debug, Clone)]
    pub struct ChaChaSource {
        rng: ChaCha8Rng,
    }

    impl ChaChaSource {
        pub fn seed_from(seed: u64) -> Self {
            Self { rng: ChaCha8Rng::seed_from_u64(seed) }
        }
    }

    impl RandomSource for ChaChaSource {
        fn next_unit(&mut self) -> f64 {
            self.rng.gen::<f64>()
        }
    }
}

// ─── FixedSource (tests) ─────────────────────────────────────────────────────

/// Replays a fixed sequence of unit draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
