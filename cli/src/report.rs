//! Console reporting
//!
//! Parameter and statistics blocks, plus a per-dispatch trace printed by
//! [`ConsoleObserver`].

use intersection_sim_core::{
    Direction, DispatchRecord, Event, HaltReason, ScheduledEvent, SignalColor, SignalTimings,
    SimulationConfig, SimulationObserver, SimulationStatistics,
};

/// Render the parameter block
pub fn format_parameters(config: &SimulationConfig) -> String {
    let timings = config.timings();
    let mut out = String::new();

    out.push_str("===== Begin Simulation Parameters =====\n");
    out.push_str(&format!("  Random generator seed: {}\n", config.seed));
    out.push_str(&format!("  Simulation end time: {}\n", config.stop_time));
    out.push_str(&format!(
        "  East-West Timing - Green: {} Yellow: {} Red: {}\n",
        config.ew_green,
        config.ew_yellow,
        timings.red(Direction::East.axis())
    ));
    out.push_str(&format!(
        "  North-South Timing - Green: {} Yellow: {} Red: {}\n",
        config.ns_green,
        config.ns_yellow,
        timings.red(Direction::North.axis())
    ));
    out.push_str("  Arrival Distributions:\n");
    for direction in Direction::ALL {
        let arrival = config.arrival(direction);
        out.push_str(&format!(
            "    {} - Mean: {} StdDev: {}\n",
            capitalize(direction.as_str()),
            arrival.mean,
            arrival.std_dev
        ));
    }
    out.push_str(&format!(
        "  Percentage cars advancing through yellow: {}\n",
        config.yellow_advance_percent
    ));
    out.push_str("===== End Simulation Parameters =====\n");
    out
}

/// Render the statistics block
pub fn format_statistics(stats: &SimulationStatistics) -> String {
    let mut out = String::new();

    out.push_str("===== Begin Simulation Statistics =====\n");
    for (direction, figures) in stats.directions.iter() {
        out.push_str(&format!(
            "  Longest {} queue: {}\n",
            direction.bound_label(),
            figures.max_queue_length
        ));
    }
    for (direction, figures) in stats.directions.iter() {
        out.push_str(&format!(
            "  Total cars advanced {}: {}\n",
            direction.bound_label(),
            figures.advanced
        ));
    }
    out.push_str("===== End Simulation Statistics =====\n");
    out
}

/// Prints a trace of every dispatched event to stdout
pub struct ConsoleObserver {
    timings: SignalTimings,
}

impl ConsoleObserver {
    pub fn new(timings: SignalTimings) -> Self {
        Self { timings }
    }

    /// Lines printed for one dispatch
    pub fn format_dispatch(&self, record: &DispatchRecord, events: &[Event]) -> Vec<String> {
        let handled = ScheduledEvent::new(record.time, record.kind);
        let mut lines = vec![String::new(), format!("Handling {}", handled)];
        lines.extend(self.format_events(events));
        lines
    }

    /// Lines printed for a run of events, in order
    pub fn format_events(&self, events: &[Event]) -> Vec<String> {
        let mut lines = Vec::new();

        for event in events {
            match event {
                Event::Arrival {
                    time,
                    vehicle_id,
                    direction,
                    queue_length,
                } => lines.push(format!(
                    "Time: {} Car #{} arrives {} - queue length: {}",
                    time,
                    vehicle_id,
                    direction.bound_label(),
                    queue_length
                )),
                Event::LightChange { to, .. } => {
                    let plan = self.timings.drain_plan(*to);
                    lines.push(format!(
                        "Advancing cars on {} {}",
                        plan.axis.label(),
                        plan.color
                    ));
                }
                Event::Advance {
                    vehicle_id,
                    direction,
                    color,
                    ..
                } => {
                    if *color == SignalColor::Yellow {
                        lines.push(format!(
                            "  Next {} car will advance on yellow",
                            direction.bound_label()
                        ));
                    }
                    lines.push(format!(
                        "  Car #{} advances {}",
                        vehicle_id,
                        direction.bound_label()
                    ));
                }
                Event::YellowRefused { direction, .. } => lines.push(format!(
                    "  Next {} car will NOT advance on yellow",
                    direction.bound_label()
                )),
                Event::DrainSummary {
                    direction,
                    color,
                    advanced,
                    remaining,
                    ..
                } => {
                    // A yellow drain that empties its queue ran out of cars
                    if *color == SignalColor::Yellow && *remaining == 0 {
                        lines.push(format!(
                            "  No {} cars waiting to advance on yellow",
                            direction.bound_label()
                        ));
                    }
                    lines.push(format!(
                        "{} cars advanced on {}: {} Remaining queue: {}",
                        capitalize(direction.bound_label()),
                        color,
                        advanced,
                        remaining
                    ));
                }
                Event::Scheduled {
                    time,
                    occurs_at,
                    kind,
                } => lines.push(format!(
                    "Time: {} Scheduled {}",
                    time,
                    ScheduledEvent::new(*occurs_at, *kind)
                )),
            }
        }
        lines
    }
}

impl SimulationObserver for ConsoleObserver {
    fn on_dispatch(&mut self, record: &DispatchRecord, events: &[Event]) {
        for line in self.format_dispatch(record, events) {
            println!("{}", line);
        }
    }

    fn on_finish(&mut self, statistics: &SimulationStatistics) {
        if let Some(HaltReason::StopTimeReached { next_event }) = statistics.halt {
            println!();
            println!(
                "Next event occurs AFTER the simulation end time ({})!",
                next_event
            );
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intersection_sim_core::{DirectionMap, EventKind, Phase, VehicleId};

    fn record(kind: EventKind, phase: Phase) -> DispatchRecord {
        DispatchRecord {
            time: 10,
            kind,
            phase,
            queue_lengths: DirectionMap::default(),
            max_queue_lengths: DirectionMap::default(),
            total_advanced: DirectionMap::default(),
        }
    }

    #[test]
    fn test_parameters_include_red_times() {
        let text = format_parameters(&SimulationConfig::example());
        assert!(text.starts_with("===== Begin Simulation Parameters =====\n"));
        assert!(text.contains("  East-West Timing - Green: 10 Yellow: 3 Red: 13\n"));
        assert!(text.contains("    North - Mean: 8 StdDev: 2\n"));
        assert!(text.ends_with("===== End Simulation Parameters =====\n"));
    }

    #[test]
    fn test_arrival_line() {
        let observer = ConsoleObserver::new(SimulationConfig::example().timings());
        let events = vec![Event::Arrival {
            time: 10,
            vehicle_id: VehicleId(3),
            direction: Direction::East,
            queue_length: 2,
        }];

        let lines = observer.format_dispatch(&record(EventKind::ArriveEast, Phase::GreenEW), &events);
        assert_eq!(lines[1], "Handling Event Type: East-Bound Arrival Time: 10");
        assert_eq!(lines[2], "Time: 10 Car #3 arrives east-bound - queue length: 2");
    }

    #[test]
    fn test_light_change_lines() {
        let observer = ConsoleObserver::new(SimulationConfig::example().timings());
        let events = vec![
            Event::LightChange {
                time: 10,
                from: Phase::GreenEW,
                to: Phase::YellowEW,
            },
            Event::DrainSummary {
                time: 10,
                direction: Direction::West,
                color: SignalColor::Green,
                advanced: 0,
                remaining: 0,
            },
        ];

        let lines =
            observer.format_dispatch(&record(EventKind::ChangeToYellowEW, Phase::YellowEW), &events);
        assert_eq!(lines[2], "Advancing cars on east-west green");
        assert_eq!(lines[3], "West-bound cars advanced on green: 0 Remaining queue: 0");
    }

    #[test]
    fn test_scheduled_line() {
        let observer = ConsoleObserver::new(SimulationConfig::example().timings());
        let events = vec![
            Event::Scheduled {
                time: 10,
                occurs_at: 16,
                kind: EventKind::ArriveNorth,
            },
            Event::Scheduled {
                time: 10,
                occurs_at: 13,
                kind: EventKind::ChangeToGreenNS,
            },
        ];

        let lines = observer.format_events(&events);
        assert_eq!(
            lines,
            vec![
                "Time: 10 Scheduled Event Type: North-Bound Arrival Time: 16",
                "Time: 10 Scheduled Event Type: Light Change to NS Green Time: 13",
            ]
        );
    }

    #[test]
    fn test_empty_yellow_queue_reported() {
        let observer = ConsoleObserver::new(SimulationConfig::example().timings());
        let summary = |direction, advanced, remaining| Event::DrainSummary {
            time: 13,
            direction,
            color: SignalColor::Yellow,
            advanced,
            remaining,
        };
        let events = vec![
            Event::LightChange {
                time: 13,
                from: Phase::YellowEW,
                to: Phase::GreenNS,
            },
            Event::Advance {
                time: 13,
                vehicle_id: VehicleId(4),
                direction: Direction::East,
                color: SignalColor::Yellow,
                waited: 2,
            },
            summary(Direction::East, 1, 0),
            Event::YellowRefused {
                time: 13,
                direction: Direction::West,
                queue_length: 2,
            },
            summary(Direction::West, 0, 2),
        ];

        let lines =
            observer.format_dispatch(&record(EventKind::ChangeToGreenNS, Phase::GreenNS), &events);
        assert_eq!(
            &lines[2..],
            &[
                "Advancing cars on east-west yellow",
                "  Next east-bound car will advance on yellow",
                "  Car #4 advances east-bound",
                "  No east-bound cars waiting to advance on yellow",
                "East-bound cars advanced on yellow: 1 Remaining queue: 0",
                "  Next west-bound car will NOT advance on yellow",
                "West-bound cars advanced on yellow: 0 Remaining queue: 2",
            ]
        );
    }
}
