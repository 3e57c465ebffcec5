//! Event kinds dispatched by the intersection controller
//!
//! # Design Principles
//!
//! 1. **Closed set**: four arrivals and four light changes, nothing else
//! 2. **Immutable**: a scheduled event never changes after creation
//! 3. **Self-describing**: every kind knows its direction or target phase

use crate::core::SimTime;
use crate::models::Direction;
use crate::signal::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    ArriveEast,
    ArriveWest,
    ArriveNorth,
    ArriveSouth,
    ChangeToYellowEW,
    ChangeToGreenNS,
    ChangeToYellowNS,
    ChangeToGreenEW,
}

impl EventKind {
    /// Arrival event for `direction`
    pub fn arrival(direction: Direction) -> Self {
        match direction {
            Direction::East => EventKind::ArriveEast,
            Direction::West => EventKind::ArriveWest,
            Direction::North => EventKind::ArriveNorth,
            Direction::South => EventKind::ArriveSouth,
        }
    }

    /// Light change event that enters `phase`
    pub fn change_to(phase: Phase) -> Self {
        match phase {
            Phase::GreenEW => EventKind::ChangeToGreenEW,
            Phase::YellowEW => EventKind::ChangeToYellowEW,
            Phase::GreenNS => EventKind::ChangeToGreenNS,
            Phase::YellowNS => EventKind::ChangeToYellowNS,
        }
    }

    /// Direction of an arrival event
    pub fn arrival_direction(self) -> Option<Direction> {
        match self {
            EventKind::ArriveEast => Some(Direction::East),
            EventKind::ArriveWest => Some(Direction::West),
            EventKind::ArriveNorth => Some(Direction::North),
            EventKind::ArriveSouth => Some(Direction::South),
            _ => None,
        }
    }

    /// Phase entered by a light change event
    pub fn target_phase(self) -> Option<Phase> {
        match self {
            EventKind::ChangeToYellowEW => Some(Phase::YellowEW),
            EventKind::ChangeToGreenNS => Some(Phase::GreenNS),
            EventKind::ChangeToYellowNS => Some(Phase::YellowNS),
            EventKind::ChangeToGreenEW => Some(Phase::GreenEW),
            _ => None,
        }
    }

    pub fn is_arrival(self) -> bool {
        self.arrival_direction().is_some()
    }

    /// Variant name, e.g. `"ChangeToYellowEW"`
    pub fn name(self) -> &'static str {
        match self {
            EventKind::ArriveEast => "ArriveEast",
            EventKind::ArriveWest => "ArriveWest",
            EventKind::ArriveNorth => "ArriveNorth",
            EventKind::ArriveSouth => "ArriveSouth",
            EventKind::ChangeToYellowEW => "ChangeToYellowEW",
            EventKind::ChangeToGreenNS => "ChangeToGreenNS",
            EventKind::ChangeToYellowNS => "ChangeToYellowNS",
            EventKind::ChangeToGreenEW => "ChangeToGreenEW",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ArriveEast => f.write_str("East-Bound Arrival"),
            EventKind::ArriveWest => f.write_str("West-Bound Arrival"),
            EventKind::ArriveNorth => f.write_str("North-Bound Arrival"),
            EventKind::ArriveSouth => f.write_str("South-Bound Arrival"),
            EventKind::ChangeToYellowEW => f.write_str("Light Change to EW Yellow"),
            EventKind::ChangeToGreenNS => f.write_str("Light Change to NS Green"),
            EventKind::ChangeToYellowNS => f.write_str("Light Change to NS Yellow"),
            EventKind::ChangeToGreenEW => f.write_str("Light Change to EW Green"),
        }
    }
}

/// An event waiting on the timeline
///
/// # Example
///
/// ```rust
/// use intersection_sim_core::events::{EventKind, ScheduledEvent};
///
/// let event = ScheduledEvent::new(10, EventKind::ChangeToYellowEW);
/// assert_eq!(event.occurs_at(), 10);
/// assert_eq!(event.to_string(), "Event Type: Light Change to EW Yellow Time: 10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    occurs_at: SimTime,
    kind: EventKind,
}

impl ScheduledEvent {
    pub fn new(occurs_at: SimTime, kind: EventKind) -> Self {
        Self { occurs_at, kind }
    }

    pub fn occurs_at(&self) -> SimTime {
        self.occurs_at
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl fmt::Display for ScheduledEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event Type: {} Time: {}", self.kind, self.occurs_at)
    }
}
