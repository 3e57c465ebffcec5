//! Orchestrator - the discrete-event dispatch loop
//!
//! See `engine.rs` for the controller and `statistics.rs` for the
//! snapshots it hands to callers and observers.

pub mod engine;
pub mod statistics;

// Re-export main types for convenience
pub use engine::{HaltReason, IntersectionController, SimulationError, StepOutcome};
pub use statistics::{
    DirectionCounters, DirectionStatistics, DispatchRecord, SimulationObserver,
    SimulationStatistics,
};
