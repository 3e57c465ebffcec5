//! Vehicle advancement policies
//!
//! A light change drains the approach queues of the axis whose right of
//! way is ending. How many vehicles go is decided by an [`AdvancePolicy`]:
//!
//! 1. **GreenPolicy**: deterministic, advance until capacity or empty
//! 2. **YellowPolicy**: one uniform draw per vehicle; the first refusal
//!    ends the drain for that direction
//!
//! Both directions of an axis are drained independently with the same
//! capacity, East before West and North before South.
//!
//! # Policy Interface
//!
//! ```rust
//! use intersection_sim_core::policy::{AdvancePolicy, DrainOutcome};
//! use intersection_sim_core::models::ApproachQueue;
//! use intersection_sim_core::rng::RandomSource;
//! use intersection_sim_core::signal::SignalColor;
//!
//! struct NobodyMoves;
//!
//! impl AdvancePolicy for NobodyMoves {
//!     fn color(&self) -> SignalColor {
//!         SignalColor::Yellow
//!     }
//!
//!     fn drain(
//!         &self,
//!         queue: &mut ApproachQueue,
//!         _capacity: usize,
//!         _rng: &mut dyn RandomSource,
//!     ) -> DrainOutcome {
//!         DrainOutcome::new(queue.direction(), self.color())
//!     }
//! }
//! ```

mod green;
mod yellow;

pub use green::GreenPolicy;
pub use yellow::YellowPolicy;

use crate::models::{ApproachQueue, Direction, Vehicle};
use crate::rng::RandomSource;
use crate::signal::SignalColor;

/// Result of draining one approach queue
#[derive(Debug, Clone, PartialEq)]
pub struct DrainOutcome {
    /// Direction that was drained
    pub direction: Direction,

    /// Signal colour the vehicles advanced on
    pub color: SignalColor,

    /// Vehicles that advanced, in queue order
    pub advanced: Vec<Vehicle>,

    /// Whether a driver declined to advance (yellow only)
    pub refused: bool,

    /// Queue length after draining
    pub remaining: usize,
}

impl DrainOutcome {
    /// Empty outcome for `direction`
    pub fn new(direction: Direction, color: SignalColor) -> Self {
        Self {
            direction,
            color,
            advanced: Vec::new(),
            refused: false,
            remaining: 0,
        }
    }

    /// Number of vehicles advanced
    pub fn count(&self) -> usize {
        self.advanced.len()
    }
}

/// Decides which queued vehicles advance when a light interval concludes
pub trait AdvancePolicy {
    /// Colour this policy models
    fn color(&self) -> SignalColor;

    /// Advance vehicles from `queue`, at most `capacity` of them
    ///
    /// # Arguments
    ///
    /// * `queue` - Approach queue to drain (front first)
    /// * `capacity` - Per-direction limit for this interval
    /// * `rng` - Random source for stochastic policies
    fn drain(
        &self,
        queue: &mut ApproachQueue,
        capacity: usize,
        rng: &mut dyn RandomSource,
    ) -> DrainOutcome;
}
