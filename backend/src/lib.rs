//! Intersection Simulator Core - Rust Engine
//!
//! Discrete-event simulation of a single signalized four-way intersection
//! with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Simulated clock
//! - **models**: Domain types (Direction, Vehicle, ApproachQueue, EventLog)
//! - **events**: Scheduled event kinds and the ordered timeline
//! - **signal**: Light phases and timing arithmetic
//! - **policy**: Green and yellow queue-draining rules
//! - **arrivals**: Inter-arrival sampling and vehicle creation
//! - **config**: Configuration, validation, parameter files, fingerprint
//! - **orchestrator**: Dispatch loop, statistics, observers
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All times are integer time units (`i64`)
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Every arrived vehicle is either queued or advanced, never both
//! 4. Simultaneous events are dispatched in the order they were scheduled

// Module declarations
pub mod arrivals;
pub mod config;
pub mod core;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;
pub mod signal;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, ArrivalGenerator};
pub use config::{ConfigError, SimulationConfig};
pub use core::{SimClock, SimTime};
pub use events::{EventKind, ScheduledEvent, Timeline};
pub use models::{
    ApproachQueue, Axis, Direction, DirectionMap, DirectionParseError, Event, EventLog, Vehicle,
    VehicleId,
};
pub use orchestrator::{
    DispatchRecord, HaltReason, IntersectionController, SimulationError, SimulationObserver,
    SimulationStatistics, StepOutcome,
};
pub use rng::{RandomSource, RngManager};
pub use signal::{Phase, SignalColor, SignalTimings};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn intersection_sim_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::intersection::PyIntersection>()?;
    Ok(())
}
