//! Read-only seams through which external settings and randomness reach the
//! progression rules.
mod config;
mod rng;

pub use config::ConfigOracle;
pub use rng::{PcgRandom, RandomSource};
