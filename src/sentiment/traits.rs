// Noise source trait — the injectable randomness behind sentiment jitter.
//
// The scorer adds a small random perturbation to every result. Routing that
// through a trait lets tests pin the draw (ZeroNoise, FixedNoise) while the
// CLI uses a real generator (RandNoise), optionally seeded for replays.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in a closed range.
pub trait NoiseSource: Send + Sync {
    /// Draw a value in `[low, high]`.
    fn uniform(&self, low: f64, high: f64) -> f64;
}

/// `rand`-backed noise. The generator sits behind a Mutex so a single
/// source can be shared across the intake pipeline and the watch loop.
pub struct RandNoise {
    rng: Mutex<StdRng>,
}

impl RandNoise {
    /// Seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NoiseSource for RandNoise {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(low..=high)
    }
}

/// Contributes nothing: every draw is 0 (clamped into the requested range).
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        0.0_f64.clamp(low, high)
    }
}

/// Always draws the same value (clamped into the requested range).
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.0.clamp(low, high)
    }
}
