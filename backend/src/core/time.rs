//! Time management for the simulation
//!
//! The simulation operates on a logical integer clock. Time only moves
//! when the controller dispatches an event, and it never moves backwards.

use serde::{Deserialize, Serialize};

/// Logical simulation time (integer time units, never negative once running)
pub type SimTime = i64;

/// Instant used for events whose time does not fit in a [`SimTime`]
///
/// Never dispatched, whatever the stop time.
pub const NEVER: SimTime = SimTime::MAX;

/// Tracks the current simulated time against the configured stop time
///
/// # Example
/// ```
/// use intersection_sim_core::SimClock;
///
/// let mut clock = SimClock::new(100);
/// assert_eq!(clock.now(), 0);
///
/// clock.advance_to(10);
/// assert_eq!(clock.now(), 10);
/// assert!(!clock.is_past_stop(100));
/// assert!(clock.is_past_stop(101));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Time of the most recently dispatched event
    now: SimTime,
    /// Events occurring strictly after this time are never dispatched
    stop_time: SimTime,
}

impl SimClock {
    /// Create a clock at time zero
    ///
    /// # Arguments
    /// * `stop_time` - Last time at which events may still be dispatched
    ///
    /// # Panics
    /// Panics if `stop_time` is not positive. Configuration validation
    /// rejects such values long before a clock is built.
    pub fn new(stop_time: SimTime) -> Self {
        assert!(stop_time > 0, "stop_time must be positive");
        Self { now: 0, stop_time }
    }

    /// Move the clock forward to `time`
    ///
    /// # Panics
    /// Panics if `time` is earlier than the current time. The timeline
    /// only ever yields events in non-decreasing order, so this firing
    /// means the ordering invariant has been broken.
    pub fn advance_to(&mut self, time: SimTime) {
        assert!(
            time >= self.now,
            "clock cannot move backwards (now {}, requested {})",
            self.now,
            time
        );
        self.now = time;
    }

    /// Current simulated time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Configured stop time
    pub fn stop_time(&self) -> SimTime {
        self.stop_time
    }

    /// Whether an event occurring at `time` falls after the stop time
    pub fn is_past_stop(&self, time: SimTime) -> bool {
        time > self.stop_time || time == NEVER
    }

    /// Time `delay` units from now, saturating to [`NEVER`] on overflow
    pub fn after(&self, delay: SimTime) -> SimTime {
        self.now.checked_add(delay).unwrap_or(NEVER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "stop_time must be positive")]
    fn test_zero_stop_time_panics() {
        SimClock::new(0);
    }

    #[test]
    #[should_panic(expected = "clock cannot move backwards")]
    fn test_backwards_advance_panics() {
        let mut clock = SimClock::new(50);
        clock.advance_to(20);
        clock.advance_to(19);
    }

    #[test]
    fn test_after_saturates_to_never() {
        let mut clock = SimClock::new(SimTime::MAX);
        clock.advance_to(SimTime::MAX - 5);

        assert_eq!(clock.after(4), SimTime::MAX - 1);
        assert_eq!(clock.after(10), NEVER);
        assert!(!clock.is_past_stop(SimTime::MAX - 1));
        assert!(clock.is_past_stop(NEVER));
    }

    #[test]
    fn test_advance_to_same_time_is_allowed() {
        let mut clock = SimClock::new(50);
        clock.advance_to(20);
        clock.advance_to(20);
        assert_eq!(clock.now(), 20);
    }
}
