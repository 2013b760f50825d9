//! Single-event-upset injection.
//!
//! Each call draws one Bernoulli trial; on success one bit, chosen
//! uniformly from the low 32 bits, is flipped. The generator belongs to the
//! owning ALU and advances on every call, so consecutive calls are
//! independent draws. Seeding it makes a run reproducible.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Default per-call flip probability.
pub const DEFAULT_FLIP_PROBABILITY: f64 = 1e-6;

/// Number of low-order bits eligible for a flip.
const FLIP_WIDTH: u32 = 32;

/// Seeded bit-flip generator.
#[derive(Clone, Debug)]
pub struct FaultInjector {
    rng: ChaCha8Rng,
    probability: f64,
}

impl FaultInjector {
    /// Creates an injector seeded from the thread-local entropy source.
    pub fn from_entropy(probability: f64) -> Self {
        Self::with_seed(rand::random(), probability)
    }

    /// Creates a deterministic injector.
    ///
    /// `probability` is clamped into `[0, 1]`; NaN disables injection.
    pub fn with_seed(seed: u64, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            probability,
        }
    }

    /// Per-call flip probability.
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Possibly flips one low bit of `value`.
    ///
    /// # Returns
    ///
    /// `(value, flipped)`; `value` is unchanged when `flipped` is false.
    pub fn inject(&mut self, value: u64) -> (u64, bool) {
        if !self.rng.gen_bool(self.probability) {
            return (value, false);
        }
        let bit = self.rng.gen_range(0..FLIP_WIDTH);
        trace!(bit, value = format_args!("{value:#x}"), "injected bit flip");
        (value ^ (1u64 << bit), true)
    }
}
