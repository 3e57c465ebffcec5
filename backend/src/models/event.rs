//! Event logging for simulation replay and auditing.
//!
//! This module defines the Event enum which captures every state change
//! the controller makes. Events enable:
//! - Deterministic replay checks (two runs, same log)
//! - Debugging (understand what happened and when)
//! - Reporting (per-event trace output)
//!
//! Not to be confused with [`crate::events::ScheduledEvent`], which is a
//! *future* happening waiting on the timeline. An [`Event`] records
//! something that already happened.
//!
//! # Example
//!
//! ```rust
//! use intersection_sim_core::models::{Direction, Event, VehicleId};
//!
//! let event = Event::Arrival {
//!     time: 10,
//!     vehicle_id: VehicleId(42),
//!     direction: Direction::East,
//!     queue_length: 3,
//! };
//!
//! assert_eq!(event.time(), 10);
//! assert_eq!(event.event_type(), "Arrival");
//! ```

use super::vehicle::{Direction, VehicleId};
use crate::core::SimTime;
use crate::events::EventKind;
use crate::signal::{Phase, SignalColor};
use serde::Serialize;

/// Simulation event capturing a state change.
///
/// All events include the simulated time at which they happened.
/// Events are logged in dispatch order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A future event was put on the timeline
    Scheduled {
        time: SimTime,
        occurs_at: SimTime,
        kind: EventKind,
    },

    /// A vehicle joined an approach queue
    Arrival {
        time: SimTime,
        vehicle_id: VehicleId,
        direction: Direction,
        queue_length: usize,
    },

    /// The light entered a new phase
    LightChange {
        time: SimTime,
        from: Phase,
        to: Phase,
    },

    /// A vehicle advanced through the intersection
    Advance {
        time: SimTime,
        vehicle_id: VehicleId,
        direction: Direction,
        color: SignalColor,
        /// Time spent queued
        waited: SimTime,
    },

    /// The next driver declined to run the yellow
    YellowRefused {
        time: SimTime,
        direction: Direction,
        queue_length: usize,
    },

    /// One direction finished draining for a light change
    DrainSummary {
        time: SimTime,
        direction: Direction,
        color: SignalColor,
        advanced: usize,
        remaining: usize,
    },
}

impl Event {
    /// Get the simulated time when this event happened
    pub fn time(&self) -> SimTime {
        match self {
            Event::Scheduled { time, .. } => *time,
            Event::Arrival { time, .. } => *time,
            Event::LightChange { time, .. } => *time,
            Event::Advance { time, .. } => *time,
            Event::YellowRefused { time, .. } => *time,
            Event::DrainSummary { time, .. } => *time,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Scheduled { .. } => "Scheduled",
            Event::Arrival { .. } => "Arrival",
            Event::LightChange { .. } => "LightChange",
            Event::Advance { .. } => "Advance",
            Event::YellowRefused { .. } => "YellowRefused",
            Event::DrainSummary { .. } => "DrainSummary",
        }
    }

    /// Get the direction if the event relates to one approach
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Event::Arrival { direction, .. } => Some(*direction),
            Event::Advance { direction, .. } => Some(*direction),
            Event::YellowRefused { direction, .. } => Some(*direction),
            Event::DrainSummary { direction, .. } => Some(*direction),
            Event::Scheduled { kind, .. } => kind.arrival_direction(),
            Event::LightChange { .. } => None,
        }
    }

    /// Get the vehicle ID if the event relates to a specific vehicle
    pub fn vehicle_id(&self) -> Option<VehicleId> {
        match self {
            Event::Arrival { vehicle_id, .. } => Some(*vehicle_id),
            Event::Advance { vehicle_id, .. } => Some(*vehicle_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around `Vec<Event>` with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events logged at or after position `start` (for incremental readers)
    pub fn since(&self, start: usize) -> &[Event] {
        self.events.get(start..).unwrap_or(&[])
    }

    /// Get events at a specific time
    pub fn events_at_time(&self, time: SimTime) -> Vec<&Event> {
        self.events.iter().filter(|e| e.time() == time).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific direction
    pub fn events_for_direction(&self, direction: Direction) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.direction() == Some(direction))
            .collect()
    }

    /// Get events for a specific vehicle
    pub fn events_for_vehicle(&self, vehicle_id: VehicleId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.vehicle_id() == Some(vehicle_id))
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
