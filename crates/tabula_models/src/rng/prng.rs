//! Seeded pseudo-random number generator for path blocks.
//!
//! This module provides [`PricerRng`], a seeded PRNG wrapper with batch
//! normal sampling, and [`stream_seed`], which derives independent seeds for
//! each (asset, path block) pair from one run seed. Assets are keyed by
//! [`unit_stream_key`], a hash of the unit name.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// SplitMix64 finaliser.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Stable 64-bit key of a unit name (FNV-1a, then SplitMix64).
///
/// Depends only on the name, so a unit keeps its draws when other units are
/// added to or removed from the market data.
///
/// # Examples
///
/// ```rust
/// use tabula_models::rng::unit_stream_key;
///
/// assert_eq!(unit_stream_key("SPX"), unit_stream_key("SPX"));
/// assert_ne!(unit_stream_key("SPX"), unit_stream_key("NDX"));
/// ```
pub fn unit_stream_key(unit: &str) -> u64 {
    let hash = unit.bytes().fold(0xCBF2_9CE4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01B3)
    });
    splitmix64(hash)
}

/// Derive the seed of stream `(asset, block)` from the run seed.
///
/// Distinct `(asset, block)` pairs give unrelated seeds; the mapping depends
/// only on its inputs, so a block keeps its draws when paths are added.
///
/// # Examples
///
/// ```rust
/// use tabula_models::rng::stream_seed;
///
/// assert_eq!(stream_seed(1, 0, 3), stream_seed(1, 0, 3));
/// assert_ne!(stream_seed(1, 0, 3), stream_seed(1, 1, 3));
/// assert_ne!(stream_seed(1, 0, 3), stream_seed(2, 0, 3));
/// ```
#[inline]
pub fn stream_seed(seed: u64, asset: u64, block: u64) -> u64 {
    splitmix64(splitmix64(splitmix64(seed) ^ asset) ^ block)
}

/// Monte Carlo random number generator.
///
/// Provides seeded, reproducible normal sampling. Each path block owns one
/// instance, so no generator is ever shared between threads.
///
/// # Examples
///
/// ```rust
/// use tabula_models::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
/// let n: f64 = rng.gen_normal();
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Debug, Clone)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed always produces the same sequence.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates the generator of stream `(asset, block)` under run seed `seed`.
    #[inline]
    pub fn for_block(seed: u64, asset: u64, block: u64) -> Self {
        Self::from_seed(stream_seed(seed, asset, block))
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single standard normal variate.
    ///
    /// Uses the Ziggurat sampler behind `rand_distr::StandardNormal`.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.gen_normal();
        }
    }
}
