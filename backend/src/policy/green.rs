//! Advance on green
//!
//! Every waiting vehicle goes, up to the capacity of the interval. No
//! randomness and no early stop.

use super::{AdvancePolicy, DrainOutcome};
use crate::models::ApproachQueue;
use crate::rng::RandomSource;
use crate::signal::SignalColor;

/// Deterministic green-interval drain
#[derive(Debug, Clone, Copy, Default)]
pub struct GreenPolicy;

impl GreenPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl AdvancePolicy for GreenPolicy {
    fn color(&self) -> SignalColor {
        SignalColor::Green
    }

    fn drain(
        &self,
        queue: &mut ApproachQueue,
        capacity: usize,
        _rng: &mut dyn RandomSource,
    ) -> DrainOutcome {
        let mut outcome = DrainOutcome::new(queue.direction(), self.color());

        while outcome.count() < capacity {
            match queue.dequeue() {
                Some(vehicle) => outcome.advanced.push(vehicle),
                None => break,
            }
        }

        outcome.remaining = queue.len();
        outcome
    }
}
