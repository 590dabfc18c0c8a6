//! Seedable jitter source for the textured brushes.
//!
//! Brush randomness only ever affects pixels, never the stored stroke data,
//! so there is no reproducibility contract across renders. Render calls take
//! an explicit `Jitter` so tests can pin a seed and get exact pixels back.

use std::sync::atomic::{AtomicU32, Ordering};

/// Small splitmix-style random stream over a `u32` seed.
#[derive(Debug, Clone)]
pub struct Jitter {
    state: u32,
}

impl Jitter {
    /// Create a stream from a fixed seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a stream from process-wide entropy.
    ///
    /// Uses a counter mixed through an avalanche so it works on every
    /// platform without a system RNG.
    pub fn from_entropy() -> Self {
        static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);
        let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new(mix(counter.wrapping_mul(0x9E37_79B9)))
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9E37_79B9);
        mix(self.state)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        // 24 mantissa bits keep the conversion exact.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform offset in `[-amplitude/2, amplitude/2)`.
    pub fn amplitude(&mut self, amplitude: f32) -> f32 {
        (self.next_f32() - 0.5) * amplitude
    }

    /// Uniform angle in `[0, 2*pi)`.
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * std::f32::consts::TAU
    }
}

fn mix(value: u32) -> u32 {
    let mut x = value;
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Jitter::new(42);
        let mut b = Jitter::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Jitter::new(1);
        let mut b = Jitter::new(2);
        let same = (0..16).filter(|_| a.next_f32() == b.next_f32()).count();
        assert!(same < 16);
    }

    #[test]
    fn test_ranges() {
        let mut jitter = Jitter::new(7);
        for _ in 0..256 {
            let v = jitter.next_f32();
            assert!((0.0..1.0).contains(&v));

            let offset = jitter.amplitude(0.5);
            assert!((-0.25..0.25).contains(&offset));

            let angle = jitter.angle();
            assert!((0.0..std::f32::consts::TAU).contains(&angle));
        }
    }

    #[test]
    fn test_entropy_streams_distinct() {
        let mut a = Jitter::from_entropy();
        let mut b = Jitter::from_entropy();
        assert_ne!(a.next_u32(), b.next_u32());
    }
}
