//! Traffic light phase state machine
//!
//! The light cycles through four phases in a fixed order:
//!
//! ```text
//! GreenEW → YellowEW → GreenNS → YellowNS → GreenEW → …
//! ```
//!
//! There is no terminal phase. Each light-change event enters the next
//! phase and schedules the change after it, so the cycle only stops when
//! the controller stops dispatching.
//!
//! # Drain rule
//!
//! A light change drains the axis whose right of way is *ending*:
//!
//! | entered phase | axis drained | policy | capacity |
//! |---|---|---|---|
//! | YellowEW | EW | green | EW green duration |
//! | GreenNS  | EW | yellow | EW yellow duration |
//! | YellowNS | NS | green | NS green duration |
//! | GreenEW  | NS | yellow | NS yellow duration |

use crate::core::SimTime;
use crate::events::EventKind;
use crate::models::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Colour shown to the axis that currently has right of way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalColor {
    Green,
    Yellow,
}

impl fmt::Display for SignalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalColor::Green => f.write_str("green"),
            SignalColor::Yellow => f.write_str("yellow"),
        }
    }
}

/// Current state of the traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    GreenEW,
    YellowEW,
    GreenNS,
    YellowNS,
}

impl Phase {
    /// The full cycle, starting from the initial phase
    pub const CYCLE: [Phase; 4] = [Phase::GreenEW, Phase::YellowEW, Phase::GreenNS, Phase::YellowNS];

    /// Phase every simulation starts in
    pub const INITIAL: Phase = Phase::GreenEW;

    /// Successor in the cycle
    pub fn next(self) -> Phase {
        match self {
            Phase::GreenEW => Phase::YellowEW,
            Phase::YellowEW => Phase::GreenNS,
            Phase::GreenNS => Phase::YellowNS,
            Phase::YellowNS => Phase::GreenEW,
        }
    }

    /// Axis holding right of way during this phase
    pub fn axis(self) -> Axis {
        match self {
            Phase::GreenEW | Phase::YellowEW => Axis::EastWest,
            Phase::GreenNS | Phase::YellowNS => Axis::NorthSouth,
        }
    }

    pub fn color(self) -> SignalColor {
        match self {
            Phase::GreenEW | Phase::GreenNS => SignalColor::Green,
            Phase::YellowEW | Phase::YellowNS => SignalColor::Yellow,
        }
    }

    /// Event that ends this phase
    pub fn exit_event(self) -> EventKind {
        EventKind::change_to(self.next())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.color() {
            SignalColor::Green => "Green",
            SignalColor::Yellow => "Yellow",
        };
        write!(f, "{} {}", self.axis().short_label(), label)
    }
}

/// What a light change must drain, and under which policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainPlan {
    pub axis: Axis,
    pub color: SignalColor,
    /// Maximum vehicles advanced per direction of the axis
    pub capacity: usize,
}

/// Configured green/yellow durations for both axes
///
/// # Example
///
/// ```rust
/// use intersection_sim_core::signal::{Phase, SignalTimings};
/// use intersection_sim_core::models::Axis;
///
/// let timings = SignalTimings::new(10, 3, 12, 4);
/// assert_eq!(timings.duration(Phase::GreenEW), 10);
/// assert_eq!(timings.red(Axis::EastWest), 16);
/// assert_eq!(timings.cycle_length(), 29);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTimings {
    pub ew_green: SimTime,
    pub ew_yellow: SimTime,
    pub ns_green: SimTime,
    pub ns_yellow: SimTime,
}

impl SignalTimings {
    pub fn new(ew_green: SimTime, ew_yellow: SimTime, ns_green: SimTime, ns_yellow: SimTime) -> Self {
        Self {
            ew_green,
            ew_yellow,
            ns_green,
            ns_yellow,
        }
    }

    pub fn green(&self, axis: Axis) -> SimTime {
        match axis {
            Axis::EastWest => self.ew_green,
            Axis::NorthSouth => self.ns_green,
        }
    }

    pub fn yellow(&self, axis: Axis) -> SimTime {
        match axis {
            Axis::EastWest => self.ew_yellow,
            Axis::NorthSouth => self.ns_yellow,
        }
    }

    /// Time an axis waits while the crossing axis has green and yellow
    pub fn red(&self, axis: Axis) -> SimTime {
        let other = axis.other();
        self.green(other).saturating_add(self.yellow(other))
    }

    /// How long the light stays in `phase`
    pub fn duration(&self, phase: Phase) -> SimTime {
        match phase.color() {
            SignalColor::Green => self.green(phase.axis()),
            SignalColor::Yellow => self.yellow(phase.axis()),
        }
    }

    pub fn cycle_length(&self) -> SimTime {
        self.ew_green
            .saturating_add(self.ew_yellow)
            .saturating_add(self.ns_green)
            .saturating_add(self.ns_yellow)
    }

    /// Drain performed by the light change that enters `entered`
    pub fn drain_plan(&self, entered: Phase) -> DrainPlan {
        match entered.color() {
            // Entering yellow: the same axis concludes its green interval
            SignalColor::Yellow => {
                let axis = entered.axis();
                DrainPlan {
                    axis,
                    color: SignalColor::Green,
                    capacity: to_capacity(self.green(axis)),
                }
            }
            // Entering green: the crossing axis concludes its yellow interval
            SignalColor::Green => {
                let axis = entered.axis().other();
                DrainPlan {
                    axis,
                    color: SignalColor::Yellow,
                    capacity: to_capacity(self.yellow(axis)),
                }
            }
        }
    }
}

fn to_capacity(duration: SimTime) -> usize {
    usize::try_from(duration).unwrap_or(0)
}
