//! Seeded RNG wrappers.
//!
//! Every traffic vehicle draws from its own `SmallRng`, seeded from the run
//! seed and its id:
//!
//!   seed = global_seed XOR (vehicle_id * GOLDEN_GAMMA)
//!
//! Multiplying by the golden-ratio constant scatters neighbouring ids across
//! the seed space.  No two vehicles share state, so parallel and sequential
//! traffic stepping draw identical numbers.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleId;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Random stream owned by one traffic vehicle (brake jitter).
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ u64::from(vehicle.0).wrapping_mul(GOLDEN_GAMMA);
        Self(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// `true` with probability `p`, clamped to `[0, 1]`.  `p` must not be NaN.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Single-threaded stream for drawing whole scenarios.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }
}
