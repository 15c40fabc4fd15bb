//! Random number generation.
//!
//! Every run owns its generators; there is no global RNG. Paths are split
//! into fixed blocks and each (asset, block) pair draws from its own
//! [`PricerRng`] seeded by [`stream_seed`].

mod prng;

pub use prng::{stream_seed, unit_stream_key, PricerRng};
