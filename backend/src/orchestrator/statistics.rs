//! Run statistics and dispatch observation
//!
//! Everything here is read-only with respect to the simulation: records
//! and statistics are snapshots handed out by the controller, and
//! observers cannot reach back into controller state.

use super::engine::HaltReason;
use crate::core::SimTime;
use crate::events::EventKind;
use crate::models::{DirectionMap, Event};
use crate::signal::{Phase, SignalColor};
use serde::Serialize;

/// Lifetime counters for one approach
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectionCounters {
    /// Arrival events dispatched
    pub arrivals: u64,

    /// Vehicles advanced while their axis concluded a green interval
    pub advanced_on_green: u64,

    /// Vehicles advanced while their axis concluded a yellow interval
    pub advanced_on_yellow: u64,
}

impl DirectionCounters {
    /// Record one advanced vehicle
    pub fn record_advance(&mut self, color: SignalColor) {
        match color {
            SignalColor::Green => self.advanced_on_green += 1,
            SignalColor::Yellow => self.advanced_on_yellow += 1,
        }
    }

    /// Total vehicles advanced
    pub fn advanced(&self) -> u64 {
        self.advanced_on_green + self.advanced_on_yellow
    }
}

/// Snapshot taken after each dispatched event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRecord {
    /// Time the event was dispatched
    pub time: SimTime,

    /// Kind of the dispatched event
    pub kind: EventKind,

    /// Light phase after dispatch
    pub phase: Phase,

    /// Queue lengths after dispatch
    pub queue_lengths: DirectionMap<usize>,

    /// Longest queue lengths so far
    pub max_queue_lengths: DirectionMap<usize>,

    /// Cumulative vehicles advanced
    pub total_advanced: DirectionMap<u64>,
}

/// End-of-run figures for one approach
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectionStatistics {
    pub arrivals: u64,
    pub advanced: u64,
    pub advanced_on_green: u64,
    pub advanced_on_yellow: u64,
    pub max_queue_length: usize,
    pub final_queue_length: usize,
}

/// Statistics for a whole run (or for the run so far)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStatistics {
    /// SHA-256 fingerprint of the configuration
    pub config_fingerprint: String,

    /// Time of the last dispatched event
    pub final_time: SimTime,

    /// Number of events dispatched
    pub events_dispatched: u64,

    /// Light phase at the end
    pub phase: Phase,

    /// Why dispatching stopped, if it has
    pub halt: Option<HaltReason>,

    /// Per-direction figures
    pub directions: DirectionMap<DirectionStatistics>,
}

impl SimulationStatistics {
    /// Vehicles advanced across all approaches
    pub fn total_advanced(&self) -> u64 {
        self.directions.iter().map(|(_, s)| s.advanced).sum()
    }

    /// Vehicles that arrived across all approaches
    pub fn total_arrivals(&self) -> u64 {
        self.directions.iter().map(|(_, s)| s.arrivals).sum()
    }
}

/// Receives a snapshot after every dispatched event
///
/// Observers are purely observational: they see copies of state and the
/// event log entries produced by the dispatch, and cannot mutate the
/// simulation.
pub trait SimulationObserver {
    /// Called after each dispatched event
    ///
    /// # Arguments
    ///
    /// * `record` - State snapshot after the dispatch
    /// * `events` - Log entries produced while dispatching
    fn on_dispatch(&mut self, record: &DispatchRecord, events: &[Event]);

    /// Called once when [`super::IntersectionController::run`] finishes
    fn on_finish(&mut self, _statistics: &SimulationStatistics) {}
}
