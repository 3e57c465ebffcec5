//! Advance on yellow
//!
//! While the queue is non-empty and the capacity is not used up, draw a
//! uniform integer in `[YELLOW_DRAW_LOWER, YELLOW_DRAW_UPPER]`. The front
//! vehicle advances iff the draw is below the configured percentage.
//! The first refusal ends the drain for this direction, even with
//! vehicles and capacity left.

use super::{AdvancePolicy, DrainOutcome};
use crate::models::ApproachQueue;
use crate::rng::{RandomSource, YELLOW_DRAW_LOWER, YELLOW_DRAW_UPPER};
use crate::signal::SignalColor;
use log::trace;

/// Probabilistic yellow-interval drain
#[derive(Debug, Clone, Copy)]
pub struct YellowPolicy {
    /// Chance (0..=100) that a driver runs the yellow
    advance_percent: i64,
}

impl YellowPolicy {
    pub fn new(advance_percent: i64) -> Self {
        Self { advance_percent }
    }

    pub fn advance_percent(&self) -> i64 {
        self.advance_percent
    }

    fn driver_advances(&self, rng: &mut dyn RandomSource) -> bool {
        rng.sample_uniform(YELLOW_DRAW_LOWER, YELLOW_DRAW_UPPER) < self.advance_percent
    }
}

impl AdvancePolicy for YellowPolicy {
    fn color(&self) -> SignalColor {
        SignalColor::Yellow
    }

    fn drain(
        &self,
        queue: &mut ApproachQueue,
        capacity: usize,
        rng: &mut dyn RandomSource,
    ) -> DrainOutcome {
        let mut outcome = DrainOutcome::new(queue.direction(), self.color());

        while !queue.is_empty() && outcome.count() < capacity {
            if !self.driver_advances(rng) {
                if let Some(vehicle) = queue.front() {
                    trace!(
                        "car #{} will NOT advance {} on yellow",
                        vehicle.id(),
                        queue.direction().bound_label()
                    );
                }
                outcome.refused = true;
                break;
            }
            if let Some(vehicle) = queue.dequeue() {
                trace!("car #{} advances {} on yellow", vehicle.id(), vehicle.origin().bound_label());
                outcome.advanced.push(vehicle);
            }
        }

        outcome.remaining = queue.len();
        outcome
    }
}
