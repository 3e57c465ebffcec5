//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through a [`RandomSource`].

mod xorshift;

pub use xorshift::RngManager;

use crate::core::SimTime;

/// Inclusive lower bound of the uniform draw used for yellow decisions
pub const YELLOW_DRAW_LOWER: i64 = 0;

/// Inclusive upper bound of the uniform draw used for yellow decisions
///
/// With draws in `[0, 99]` and "advance iff draw < percent", a percentage
/// of 0 never advances and 100 always advances.
pub const YELLOW_DRAW_UPPER: i64 = 99;

/// Sampling capability the controller needs from a random generator
///
/// The controller reseeds once at setup and then samples once per
/// scheduled arrival and once per yellow decision. Implementations must
/// be deterministic for a given seed.
pub trait RandomSource {
    /// Reset the generator to the stream identified by `seed`
    fn reseed(&mut self, seed: u64);

    /// Sample a normally distributed interval, rounded to whole time units
    ///
    /// The result is always >= 1 so that a direction never schedules an
    /// arrival simultaneous with (or before) the one being dispatched.
    fn sample_bounded_normal(&mut self, mean: f64, std_dev: f64) -> SimTime;

    /// Sample an integer uniformly from `[lower, upper]` (both inclusive)
    fn sample_uniform(&mut self, lower: i64, upper: i64) -> i64;
}
