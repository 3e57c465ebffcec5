//! Approach queues
//!
//! One FIFO per compass direction. Besides the vehicles themselves the
//! queue keeps the longest length it has ever held, which is reported as
//! the "longest queue" statistic.
//!
//! # Critical Invariants
//!
//! 1. `max_observed_length()` never decreases
//! 2. `max_observed_length() >= len()` at all times

use super::vehicle::{Direction, Vehicle};
use std::collections::VecDeque;

/// FIFO of vehicles waiting on one approach
///
/// # Example
///
/// ```rust
/// use intersection_sim_core::models::{ApproachQueue, Direction, Vehicle, VehicleId};
///
/// let mut queue = ApproachQueue::new(Direction::East);
/// queue.enqueue(Vehicle::new(VehicleId(1), Direction::East, 3));
/// queue.enqueue(Vehicle::new(VehicleId(2), Direction::East, 4));
/// assert_eq!(queue.len(), 2);
///
/// let first = queue.dequeue().unwrap();
/// assert_eq!(first.id(), VehicleId(1));
/// assert_eq!(queue.max_observed_length(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ApproachQueue {
    direction: Direction,
    vehicles: VecDeque<Vehicle>,
    max_observed_length: usize,
}

impl ApproachQueue {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            vehicles: VecDeque::new(),
            max_observed_length: 0,
        }
    }

    /// Direction this queue serves
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Append a vehicle to the back of the queue
    pub fn enqueue(&mut self, vehicle: Vehicle) {
        self.vehicles.push_back(vehicle);
        self.max_observed_length = self.max_observed_length.max(self.vehicles.len());
    }

    /// Remove the front vehicle, or `None` (without touching state) if empty
    pub fn dequeue(&mut self) -> Option<Vehicle> {
        self.vehicles.pop_front()
    }

    /// Vehicle that would advance next
    pub fn front(&self) -> Option<&Vehicle> {
        self.vehicles.front()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Longest length this queue has ever reached
    pub fn max_observed_length(&self) -> usize {
        self.max_observed_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleId;

    fn car(id: u64) -> Vehicle {
        Vehicle::new(VehicleId(id), Direction::West, id as i64)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = ApproachQueue::new(Direction::West);
        for id in 1..=3 {
            queue.enqueue(car(id));
        }
        let ids: Vec<u64> = std::iter::from_fn(|| queue.dequeue())
            .map(|v| v.id().0)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_dequeue_empty_leaves_state_alone() {
        let mut queue = ApproachQueue::new(Direction::West);
        queue.enqueue(car(1));
        queue.dequeue();

        assert!(queue.dequeue().is_none());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.max_observed_length(), 1);
    }

    #[test]
    fn test_max_length_survives_drain() {
        let mut queue = ApproachQueue::new(Direction::West);
        for id in 1..=4 {
            queue.enqueue(car(id));
        }
        queue.dequeue();
        queue.dequeue();
        queue.enqueue(car(5));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.max_observed_length(), 4);
    }
}
