//! Seeded random number generation.
//!
//! The whole simulation draws from a single generator owned by the
//! ecosystem, so a run is reproducible from its seed and the generator state
//! is saved along with the rest of the world.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Random number generator used by the simulation.
pub type SimRng = Xoshiro256StarStar;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}
