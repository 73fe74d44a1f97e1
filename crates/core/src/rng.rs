//! RNG module - seeded random stream for board generation
//!
//! Board generation only ever asks for a float in `[0, 1)`. That narrow
//! contract is captured by [`RandomSource`], so any seeded generator can be
//! plugged in without touching the shuffling code.
//!
//! [`SeededRng`] is the default implementation: the seed string is folded into
//! a `u64` with FNV-1a and used to seed a ChaCha8 stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Stable 64-bit FNV-1a over the seed bytes.
///
/// `DefaultHasher` is not used since its output is not guaranteed stable across
/// Rust versions/platforms, and shared seeds must keep producing the same board.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut h = OFFSET_BASIS;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(PRIME);
    }
    h
}

/// Deterministic generator built from a seed string
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Create a new RNG for the given seed string
    pub fn new(seed: &str) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(fnv1a64(seed.as_bytes())),
        }
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

/// Build the random stream for a seed string.
pub fn create_rng(seed: &str) -> SeededRng {
    SeededRng::new(seed)
}

/// Pick an index in `[0, bound)` as `floor(next * bound)`.
pub fn next_index<R: RandomSource + ?Sized>(rng: &mut R, bound: usize) -> usize {
    let j = (rng.next_f64() * bound as f64) as usize;
    // Guards against a misbehaving source returning exactly 1.0.
    j.min(bound.saturating_sub(1))
}

/// Shuffle a slice in place using Fisher-Yates
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = next_index(rng, i + 1);
        slice.swap(i, j);
    }
}
