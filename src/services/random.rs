// src/services/random.rs
//
// The random source a field draws from. Fields take any `RngCore`
// so tests can hand in a seeded or stepping generator.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub type RandomSource = Box<dyn RngCore>;

/// Entropy-seeded source for live animations.
pub fn entropy_source() -> RandomSource {
    Box::new(StdRng::from_entropy())
}

/// Reproducible source for tests and recordings.
pub fn seeded_source(seed: u64) -> RandomSource {
    Box::new(StdRng::seed_from_u64(seed))
}

/// Uniform draw from an inclusive `[low, high]` pair.
pub fn in_range(rng: &mut dyn RngCore, range: [f32; 2]) -> f32 {
    let [low, high] = range;
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}

/// True with probability `p` (clamped to 0..=1).
pub fn chance(rng: &mut dyn RngCore, p: f32) -> bool {
    if p <= 0.0 {
        return false;
    }
    rng.gen::<f32>() < p.min(1.0)
}

/// Uniform index into a non-empty collection of `len` items.
pub fn pick_index(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}
