//! Simulation configuration
//!
//! A [`SimulationConfig`] is read-only once validated. The controller
//! never applies part of a configuration: if any field is invalid the
//! whole value is rejected and no simulation state is created.
//!
//! Configurations can be built in code, deserialized from JSON, or
//! parsed from the plain-text parameter format (see [`params`]).

pub mod fingerprint;
pub mod params;

pub use fingerprint::fingerprint;
pub use params::parse_params;

use crate::arrivals::ArrivalConfig;
use crate::core::SimTime;
use crate::models::{Direction, DirectionMap};
use crate::signal::SignalTimings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more fields failed validation; every failure is listed
    #[error("invalid simulation configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    /// Parameter file could not be read field by field
    #[error("parameter file line {line}: unable to read {field}: {reason}")]
    Parse {
        line: usize,
        field: &'static str,
        reason: String,
    },

    /// JSON configuration could not be deserialized
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete, flat simulation configuration
///
/// # Fields
///
/// * `seed` - Seed for the deterministic random source
/// * `stop_time` - Events after this time are never dispatched
/// * `ew_green` / `ew_yellow` - East-west light durations
/// * `ns_green` / `ns_yellow` - North-south light durations
/// * `east` .. `south` - Per-direction inter-arrival distributions
/// * `yellow_advance_percent` - Chance (0..=100) a driver runs a yellow
///
/// # Example
///
/// ```rust
/// use intersection_sim_core::config::SimulationConfig;
///
/// let mut config = SimulationConfig::example();
/// assert!(config.validate().is_ok());
///
/// config.yellow_advance_percent = 101;
/// assert!(config.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub seed: u64,
    pub stop_time: SimTime,
    pub ew_green: SimTime,
    pub ew_yellow: SimTime,
    pub ns_green: SimTime,
    pub ns_yellow: SimTime,
    pub east: ArrivalConfig,
    pub west: ArrivalConfig,
    pub north: ArrivalConfig,
    pub south: ArrivalConfig,
    pub yellow_advance_percent: i64,
}

impl SimulationConfig {
    /// A small, valid configuration useful for demos and tests
    pub fn example() -> Self {
        Self {
            seed: 1,
            stop_time: 100,
            ew_green: 10,
            ew_yellow: 3,
            ns_green: 10,
            ns_yellow: 3,
            east: ArrivalConfig::new(5.0, 1.0),
            west: ArrivalConfig::new(5.0, 1.0),
            north: ArrivalConfig::new(8.0, 2.0),
            south: ArrivalConfig::new(8.0, 2.0),
            yellow_advance_percent: 50,
        }
    }

    /// Deserialize a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, reporting all failures at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Every range failure, in field order
    pub(crate) fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.stop_time <= 0 {
            problems.push(format!("stop_time must be > 0 (got {})", self.stop_time));
        }

        for (name, value) in [
            ("ew_green", self.ew_green),
            ("ew_yellow", self.ew_yellow),
            ("ns_green", self.ns_green),
            ("ns_yellow", self.ns_yellow),
        ] {
            if value <= 0 {
                problems.push(format!("{} must be > 0 (got {})", name, value));
            }
        }

        for direction in Direction::ALL {
            let arrival = self.arrival(direction);
            // Negated comparisons also reject NaN
            if !(arrival.mean.is_finite() && arrival.mean > 0.0) {
                problems.push(format!(
                    "{} arrival mean must be finite and > 0 (got {})",
                    direction, arrival.mean
                ));
            }
            if !(arrival.std_dev.is_finite() && arrival.std_dev >= 0.0) {
                problems.push(format!(
                    "{} arrival std_dev must be finite and >= 0 (got {})",
                    direction, arrival.std_dev
                ));
            }
        }

        if !(0..=100).contains(&self.yellow_advance_percent) {
            problems.push(format!(
                "yellow_advance_percent must be within [0, 100] (got {})",
                self.yellow_advance_percent
            ));
        }

        problems
    }

    /// Inter-arrival distribution for `direction`
    pub fn arrival(&self, direction: Direction) -> &ArrivalConfig {
        match direction {
            Direction::East => &self.east,
            Direction::West => &self.west,
            Direction::North => &self.north,
            Direction::South => &self.south,
        }
    }

    /// All four arrival distributions
    pub fn arrivals(&self) -> DirectionMap<ArrivalConfig> {
        DirectionMap::from_fn(|direction| *self.arrival(direction))
    }

    /// Light durations as a [`SignalTimings`]
    pub fn timings(&self) -> SignalTimings {
        SignalTimings::new(self.ew_green, self.ew_yellow, self.ns_green, self.ns_yellow)
    }
}
