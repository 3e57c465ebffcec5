//! Orchestrator Engine
//!
//! Discrete-event loop for one signalized four-way intersection:
//! - Vehicle arrivals (self-perpetuating per direction)
//! - Light phase changes (self-perpetuating four-phase cycle)
//! - Queue draining on green and yellow
//! - Statistics and event logging
//!
//! # Architecture
//!
//! ```text
//! new(config)  validate, seed RNG, empty timeline
//! start()      schedule first arrival per direction + first light change
//! step()       pop earliest event
//!              ├─ none left          → Halted(NoEventScheduled)
//!              ├─ after stop time    → Halted(StopTimeReached)
//!              └─ otherwise          advance clock, dispatch, Continue
//! run()        start if needed, step until halted, return statistics
//! ```
//!
//! Dispatching an arrival enqueues a vehicle and schedules the next
//! arrival for that direction. Dispatching a light change enters the new
//! phase, drains the axis whose right of way is ending, and schedules the
//! following change. Nothing else ever puts events on the timeline.
//! An event whose time would overflow [`SimTime`] is parked at
//! [`NEVER`] and ends the run like any event after the stop time.
//!
//! The event log only holds the events of the current dispatch unless
//! full retention is requested with
//! [`with_event_log(true)`](IntersectionController::with_event_log).
//!
//! # Example
//!
//! ```rust
//! use intersection_sim_core::config::SimulationConfig;
//! use intersection_sim_core::orchestrator::IntersectionController;
//!
//! let mut controller = IntersectionController::new(SimulationConfig::example()).unwrap();
//! let stats = controller.run().unwrap();
//!
//! assert!(stats.final_time <= 100);
//! for (_, direction) in stats.directions.iter() {
//!     assert_eq!(direction.arrivals, direction.advanced + direction.final_queue_length as u64);
//! }
//! ```

use super::statistics::{
    DirectionCounters, DirectionStatistics, DispatchRecord, SimulationObserver,
    SimulationStatistics,
};
use crate::arrivals::ArrivalGenerator;
use crate::config::{fingerprint, ConfigError, SimulationConfig};
use crate::core::{SimClock, SimTime, NEVER};
use crate::events::{EventKind, ScheduledEvent, Timeline};
use crate::models::{ApproachQueue, Direction, DirectionMap, Event, EventLog};
use crate::policy::{AdvancePolicy, DrainOutcome, GreenPolicy, YellowPolicy};
use crate::rng::{RandomSource, RngManager};
use crate::signal::{Phase, SignalColor, SignalTimings};
use log::{debug, info, trace, warn};
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Result Types
// ============================================================================

/// Simulation error types
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration failed validation; no simulation state was created
    #[error("simulation is not set up properly: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The timeline emptied before the stop time
    #[error("no event scheduled (timeline empty at time {time})")]
    NoEventScheduled { time: SimTime },

    /// Arrival requested for a direction that does not exist
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    /// `start()` was called on a controller that already started
    #[error("simulation already started")]
    AlreadyStarted,
}

/// Why the dispatch loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HaltReason {
    /// The earliest event falls after the stop time (normal end)
    StopTimeReached { next_event: ScheduledEvent },

    /// Nothing left on the timeline (a logic error: both arrivals and
    /// light changes perpetuate themselves)
    NoEventScheduled { time: SimTime },
}

impl HaltReason {
    /// Whether the halt indicates a fault rather than a normal end
    pub fn is_abnormal(&self) -> bool {
        matches!(self, HaltReason::NoEventScheduled { .. })
    }
}

/// Result of a single [`IntersectionController::step`]
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// One event was dispatched
    Continue(DispatchRecord),

    /// Nothing was dispatched and nothing ever will be
    Halted(HaltReason),
}

impl StepOutcome {
    pub fn is_halted(&self) -> bool {
        matches!(self, StepOutcome::Halted(_))
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Owns all simulation state and runs the dispatch loop
///
/// # Determinism
///
/// All randomness goes through one [`RandomSource`], seeded once at
/// construction, and the timeline breaks ties by insertion order.
/// Same seed + same config = identical dispatch sequence.
pub struct IntersectionController {
    /// Validated configuration
    config: SimulationConfig,

    /// Light durations derived from the config
    timings: SignalTimings,

    /// Current simulated time and stop time
    clock: SimClock,

    /// Seeded random source
    rng: Box<dyn RandomSource>,

    /// Future events
    timeline: Timeline,

    /// One FIFO per approach
    approaches: DirectionMap<ApproachQueue>,

    /// Current light phase
    phase: Phase,

    /// Inter-arrival sampling and vehicle IDs
    arrivals: ArrivalGenerator,

    /// Lifetime throughput counters
    counters: DirectionMap<DirectionCounters>,

    green_policy: GreenPolicy,
    yellow_policy: YellowPolicy,

    /// State changes of the current dispatch, or of the whole run when
    /// `retain_event_log` is set
    event_log: EventLog,
    retain_event_log: bool,

    /// Notified after each dispatch and at the end of `run`
    observers: Vec<Box<dyn SimulationObserver>>,

    /// SHA-256 of the configuration
    fingerprint: String,

    started: bool,
    halted: Option<HaltReason>,
    events_dispatched: u64,
}

impl IntersectionController {
    /// Create a controller using the built-in xorshift generator
    ///
    /// # Returns
    ///
    /// * `Ok(IntersectionController)` - Ready to `start()` or `run()`
    /// * `Err(SimulationError::InvalidConfig)` - Some field failed validation
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rng = RngManager::new(config.seed);
        Self::with_random_source(config, Box::new(rng))
    }

    /// Create a controller drawing from a caller-supplied random source
    ///
    /// The source is reseeded with `config.seed` exactly once.
    pub fn with_random_source(
        config: SimulationConfig,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        rng.reseed(config.seed);

        let fingerprint = fingerprint(&config);
        let timings = config.timings();
        let clock = SimClock::new(config.stop_time);
        let arrivals = ArrivalGenerator::new(config.arrivals());
        let yellow_policy = YellowPolicy::new(config.yellow_advance_percent);

        Ok(Self {
            config,
            timings,
            clock,
            rng,
            timeline: Timeline::new(),
            approaches: DirectionMap::from_fn(ApproachQueue::new),
            phase: Phase::INITIAL,
            arrivals,
            counters: DirectionMap::default(),
            green_policy: GreenPolicy::new(),
            yellow_policy,
            event_log: EventLog::new(),
            retain_event_log: false,
            observers: Vec::new(),
            fingerprint,
            started: false,
            halted: None,
            events_dispatched: 0,
        })
    }

    /// Keep every event of the run in the event log
    ///
    /// Off by default: observers still see each dispatch's events, but the
    /// log is cleared once they have been notified.
    pub fn with_event_log(mut self, retain: bool) -> Self {
        self.retain_event_log = retain;
        self
    }

    /// Register an observer for dispatch records
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn timings(&self) -> &SignalTimings {
        &self.timings
    }

    /// Current simulated time
    pub fn current_time(&self) -> SimTime {
        self.clock.now()
    }

    /// Current light phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Approach queue for `direction`
    pub fn queue(&self, direction: Direction) -> &ApproachQueue {
        &self.approaches[direction]
    }

    /// Lifetime counters for `direction`
    pub fn counters(&self, direction: Direction) -> &DirectionCounters {
        &self.counters[direction]
    }

    /// Get reference to event log
    ///
    /// Holds the whole run only for controllers built
    /// [`with_event_log(true)`](Self::with_event_log).
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Events still waiting on the timeline, in dispatch order
    pub fn pending_events(&self) -> Vec<ScheduledEvent> {
        self.timeline.pending()
    }

    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Why dispatching stopped, if it has
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halted
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Seed the self-perpetuating streams: one arrival per direction
    /// (East, West, North, South) then the first light change
    pub fn start(&mut self) -> Result<(), SimulationError> {
        if self.started {
            return Err(SimulationError::AlreadyStarted);
        }
        self.started = true;

        info!(
            "starting simulation: stop time {}, seed {}, fingerprint {}",
            self.clock.stop_time(),
            self.config.seed,
            &self.fingerprint[..12]
        );

        for direction in Direction::ALL {
            self.schedule_arrival(direction);
        }
        self.schedule_light_change();
        Ok(())
    }

    /// Schedule the next arrival for `direction`
    pub fn schedule_arrival(&mut self, direction: Direction) {
        let interval = self.arrivals.next_interval(direction, self.rng.as_mut());
        self.schedule(self.clock.after(interval), EventKind::arrival(direction));
    }

    /// Schedule the next arrival for a direction given by name
    ///
    /// Unknown names are reported and leave the simulation untouched.
    pub fn schedule_arrival_named(&mut self, name: &str) -> Result<(), SimulationError> {
        match name.parse::<Direction>() {
            Ok(direction) => {
                self.schedule_arrival(direction);
                Ok(())
            }
            Err(_) => {
                warn!("ignoring arrival request for invalid direction {:?}", name);
                Err(SimulationError::InvalidDirection(name.to_string()))
            }
        }
    }

    /// Schedule the change that ends the current phase
    pub fn schedule_light_change(&mut self) {
        let occurs_at = self.clock.after(self.timings.duration(self.phase));
        self.schedule(occurs_at, self.phase.exit_event());
    }

    fn schedule(&mut self, occurs_at: SimTime, kind: EventKind) {
        let time = self.clock.now();
        if occurs_at == NEVER {
            debug!("time {}: {} overflows the clock, never dispatched", time, kind);
        }
        trace!("time {}: scheduled {} at {}", time, kind, occurs_at);
        self.timeline.schedule(occurs_at, kind);
        self.event_log.log(Event::Scheduled {
            time,
            occurs_at,
            kind,
        });
    }

    // ========================================================================
    // Dispatch Loop
    // ========================================================================

    /// Dispatch the earliest event
    ///
    /// # Returns
    ///
    /// * `StepOutcome::Continue(record)` - An event was dispatched
    /// * `StepOutcome::Halted(reason)` - Nothing dispatched. Once halted,
    ///   every further call returns the same reason.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.halted {
            return StepOutcome::Halted(reason);
        }

        let event = match self.timeline.pop_earliest() {
            Some(event) => event,
            None => {
                let time = self.clock.now();
                warn!("time {}: no event scheduled, halting", time);
                return self.halt(HaltReason::NoEventScheduled { time });
            }
        };

        if self.clock.is_past_stop(event.occurs_at()) {
            info!(
                "next event occurs after the simulation end time ({})",
                event
            );
            return self.halt(HaltReason::StopTimeReached { next_event: event });
        }

        let log_start = self.event_log.len();
        self.clock.advance_to(event.occurs_at());
        self.events_dispatched += 1;
        debug!("handling {}", event);

        let kind = event.kind();
        if let Some(direction) = kind.arrival_direction() {
            self.handle_arrival(direction);
        } else if let Some(entered) = kind.target_phase() {
            self.handle_light_change(entered);
        }

        let record = self.dispatch_record(kind);
        let events = self.event_log.since(log_start);
        for observer in self.observers.iter_mut() {
            observer.on_dispatch(&record, events);
        }
        if !self.retain_event_log {
            self.event_log.clear();
        }
        StepOutcome::Continue(record)
    }

    /// Run to completion
    ///
    /// Starts the simulation if `start()` has not been called, then steps
    /// until halted. Observers receive the final statistics either way.
    ///
    /// # Returns
    ///
    /// * `Ok(stats)` - Stopped at the first event after the stop time
    /// * `Err(SimulationError::NoEventScheduled)` - The timeline emptied
    pub fn run(&mut self) -> Result<SimulationStatistics, SimulationError> {
        if !self.started {
            self.start()?;
        }

        let reason = loop {
            if let StepOutcome::Halted(reason) = self.step() {
                break reason;
            }
        };

        let stats = self.statistics();
        for observer in self.observers.iter_mut() {
            observer.on_finish(&stats);
        }
        info!(
            "simulation finished at time {} after {} events ({} vehicles advanced)",
            stats.final_time,
            stats.events_dispatched,
            stats.total_advanced()
        );

        match reason {
            HaltReason::NoEventScheduled { time } => Err(SimulationError::NoEventScheduled { time }),
            HaltReason::StopTimeReached { .. } => Ok(stats),
        }
    }

    fn halt(&mut self, reason: HaltReason) -> StepOutcome {
        self.halted = Some(reason);
        StepOutcome::Halted(reason)
    }

    // ========================================================================
    // Event Handlers
    // ========================================================================

    fn handle_arrival(&mut self, direction: Direction) {
        let time = self.clock.now();
        let vehicle = self.arrivals.create_vehicle(direction, time);
        let vehicle_id = vehicle.id();

        let queue = &mut self.approaches[direction];
        queue.enqueue(vehicle);
        let queue_length = queue.len();
        self.counters[direction].arrivals += 1;

        debug!(
            "time {}: car #{} arrives {} - queue length: {}",
            time,
            vehicle_id,
            direction.bound_label(),
            queue_length
        );
        self.event_log.log(Event::Arrival {
            time,
            vehicle_id,
            direction,
            queue_length,
        });

        self.schedule_arrival(direction);
    }

    fn handle_light_change(&mut self, entered: Phase) {
        let time = self.clock.now();
        let from = self.phase;
        self.phase = entered;
        self.event_log.log(Event::LightChange {
            time,
            from,
            to: entered,
        });

        let plan = self.timings.drain_plan(entered);
        debug!(
            "time {}: advancing cars on {} {}",
            time,
            plan.axis.label(),
            plan.color
        );

        let green = self.green_policy;
        let yellow = self.yellow_policy;
        let policy: &dyn AdvancePolicy = match plan.color {
            SignalColor::Green => &green,
            SignalColor::Yellow => &yellow,
        };

        for direction in plan.axis.directions() {
            let outcome = policy.drain(
                &mut self.approaches[direction],
                plan.capacity,
                self.rng.as_mut(),
            );
            self.record_drain(outcome);
        }

        self.schedule_light_change();
    }

    fn record_drain(&mut self, outcome: DrainOutcome) {
        let time = self.clock.now();
        let direction = outcome.direction;
        let advanced = outcome.count();

        for vehicle in &outcome.advanced {
            self.counters[direction].record_advance(outcome.color);
            self.event_log.log(Event::Advance {
                time,
                vehicle_id: vehicle.id(),
                direction,
                color: outcome.color,
                waited: time - vehicle.arrival_time(),
            });
        }

        if outcome.refused {
            self.event_log.log(Event::YellowRefused {
                time,
                direction,
                queue_length: outcome.remaining,
            });
        }

        debug!(
            "{} cars advanced on {}: {} remaining queue: {}",
            direction.bound_label(),
            outcome.color,
            advanced,
            outcome.remaining
        );
        self.event_log.log(Event::DrainSummary {
            time,
            direction,
            color: outcome.color,
            advanced,
            remaining: outcome.remaining,
        });
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    fn dispatch_record(&self, kind: EventKind) -> DispatchRecord {
        DispatchRecord {
            time: self.clock.now(),
            kind,
            phase: self.phase,
            queue_lengths: self.approaches.map(|q| q.len()),
            max_queue_lengths: self.approaches.map(|q| q.max_observed_length()),
            total_advanced: self.counters.map(|c| c.advanced()),
        }
    }

    /// Statistics for the run so far
    pub fn statistics(&self) -> SimulationStatistics {
        let directions = DirectionMap::from_fn(|direction| {
            let counters = &self.counters[direction];
            let queue = &self.approaches[direction];
            DirectionStatistics {
                arrivals: counters.arrivals,
                advanced: counters.advanced(),
                advanced_on_green: counters.advanced_on_green,
                advanced_on_yellow: counters.advanced_on_yellow,
                max_queue_length: queue.max_observed_length(),
                final_queue_length: queue.len(),
            }
        });

        SimulationStatistics {
            config_fingerprint: self.fingerprint.clone(),
            final_time: self.clock.now(),
            events_dispatched: self.events_dispatched,
            phase: self.phase,
            halt: self.halted,
            directions,
        }
    }
}

// Manual Debug implementation (random source and observers don't implement Debug)
impl std::fmt::Debug for IntersectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntersectionController")
            .field("current_time", &self.clock.now())
            .field("stop_time", &self.clock.stop_time())
            .field("phase", &self.phase)
            .field("pending_events", &self.timeline.len())
            .field("events_dispatched", &self.events_dispatched)
            .field("halted", &self.halted)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> SimulationConfig {
        SimulationConfig {
            stop_time: 60,
            ..SimulationConfig::example()
        }
    }

    #[test]
    fn test_controller_creation() {
        let controller = IntersectionController::new(create_test_config()).unwrap();

        assert_eq!(controller.current_time(), 0);
        assert_eq!(controller.phase(), Phase::GreenEW);
        assert!(!controller.is_started());
        assert!(controller.pending_events().is_empty());
        assert_eq!(controller.event_log().len(), 0);
    }

    #[test]
    fn test_invalid_config_refused() {
        let mut config = create_test_config();
        config.ew_green = 0;

        let result = IntersectionController::new(config);
        assert!(matches!(
            result.unwrap_err(),
            SimulationError::InvalidConfig(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_start_schedules_five_events() {
        let mut controller = IntersectionController::new(create_test_config()).unwrap();
        controller.start().unwrap();

        let pending = controller.pending_events();
        assert_eq!(pending.len(), 5);
        assert!(pending
            .iter()
            .any(|e| e.kind() == EventKind::ChangeToYellowEW && e.occurs_at() == 10));
        for direction in Direction::ALL {
            assert!(pending.iter().any(|e| e.kind() == EventKind::arrival(direction)));
        }
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut controller = IntersectionController::new(create_test_config()).unwrap();
        controller.start().unwrap();
        assert!(matches!(controller.start(), Err(SimulationError::AlreadyStarted)));
    }

    #[test]
    fn test_invalid_direction_is_noop() {
        let mut controller = IntersectionController::new(create_test_config()).unwrap();
        let before = controller.event_log().len();

        let result = controller.schedule_arrival_named("up");
        assert!(matches!(result, Err(SimulationError::InvalidDirection(_))));
        assert!(controller.pending_events().is_empty());
        assert_eq!(controller.event_log().len(), before);

        controller.schedule_arrival_named("west").unwrap();
        assert_eq!(controller.pending_events().len(), 1);
    }

    #[test]
    fn test_halt_is_latched() {
        let mut controller = IntersectionController::new(create_test_config()).unwrap();
        controller.run().unwrap();

        let reason = controller.halt_reason().unwrap();
        assert!(!reason.is_abnormal());
        assert_eq!(controller.step(), StepOutcome::Halted(reason));
        assert_eq!(controller.step(), StepOutcome::Halted(reason));
    }

    #[test]
    fn test_event_log_cleared_after_each_dispatch() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct ArrivalCounter(Rc<Cell<usize>>);

        impl SimulationObserver for ArrivalCounter {
            fn on_dispatch(&mut self, _record: &DispatchRecord, events: &[Event]) {
                let arrivals = events.iter().filter(|e| e.event_type() == "Arrival").count();
                self.0.set(self.0.get() + arrivals);
            }
        }

        let config = SimulationConfig {
            stop_time: 10_000,
            ..create_test_config()
        };
        let seen = Rc::new(Cell::new(0));
        let mut controller = IntersectionController::new(config).unwrap();
        controller.add_observer(Box::new(ArrivalCounter(Rc::clone(&seen))));
        controller.start().unwrap();

        while let StepOutcome::Continue(_) = controller.step() {
            assert_eq!(controller.event_log().len(), 0);
        }

        let arrivals: u64 = Direction::ALL
            .iter()
            .map(|d| controller.counters(*d).arrivals)
            .sum();
        assert!(arrivals > 1_000);
        assert_eq!(seen.get() as u64, arrivals);
    }

    #[test]
    fn test_event_log_retained_on_request() {
        let mut controller = IntersectionController::new(create_test_config())
            .unwrap()
            .with_event_log(true);
        controller.run().unwrap();

        let arrivals: u64 = Direction::ALL
            .iter()
            .map(|d| controller.counters(*d).arrivals)
            .sum();
        assert_eq!(
            controller.event_log().events_of_type("Arrival").len() as u64,
            arrivals
        );
    }
}
