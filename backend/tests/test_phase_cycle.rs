//! Light phase cycle tests
//!
//! The light walks GreenEW → YellowEW → GreenNS → YellowNS → GreenEW,
//! holding each phase for its configured duration.

use intersection_sim_core::models::Axis;
use intersection_sim_core::{
    Event, EventKind, IntersectionController, Phase, SignalColor, SignalTimings, SimulationConfig,
};

fn asymmetric_config() -> SimulationConfig {
    SimulationConfig {
        stop_time: 300,
        ew_green: 7,
        ew_yellow: 2,
        ns_green: 11,
        ns_yellow: 4,
        ..SimulationConfig::example()
    }
}

#[test]
fn test_cycle_returns_to_start() {
    let mut phase = Phase::INITIAL;
    for expected in Phase::CYCLE.iter().cycle().skip(1).take(8) {
        phase = phase.next();
        assert_eq!(phase, *expected);
    }
    assert_eq!(phase, Phase::INITIAL);
}

#[test]
fn test_exit_events() {
    assert_eq!(Phase::GreenEW.exit_event(), EventKind::ChangeToYellowEW);
    assert_eq!(Phase::YellowEW.exit_event(), EventKind::ChangeToGreenNS);
    assert_eq!(Phase::GreenNS.exit_event(), EventKind::ChangeToYellowNS);
    assert_eq!(Phase::YellowNS.exit_event(), EventKind::ChangeToGreenEW);
}

#[test]
fn test_drain_plans() {
    let timings = SignalTimings::new(7, 2, 11, 4);

    // Entering yellow concludes the same axis's green
    let plan = timings.drain_plan(Phase::YellowEW);
    assert_eq!((plan.axis, plan.color, plan.capacity), (Axis::EastWest, SignalColor::Green, 7));

    let plan = timings.drain_plan(Phase::YellowNS);
    assert_eq!((plan.axis, plan.color, plan.capacity), (Axis::NorthSouth, SignalColor::Green, 11));

    // Entering green concludes the crossing axis's yellow
    let plan = timings.drain_plan(Phase::GreenNS);
    assert_eq!((plan.axis, plan.color, plan.capacity), (Axis::EastWest, SignalColor::Yellow, 2));

    let plan = timings.drain_plan(Phase::GreenEW);
    assert_eq!((plan.axis, plan.color, plan.capacity), (Axis::NorthSouth, SignalColor::Yellow, 4));
}

#[test]
fn test_red_durations() {
    let timings = SignalTimings::new(7, 2, 11, 4);
    assert_eq!(timings.red(Axis::EastWest), 15);
    assert_eq!(timings.red(Axis::NorthSouth), 9);
    assert_eq!(timings.cycle_length(), 24);
}

#[test]
fn test_run_follows_cycle_with_configured_durations() {
    let config = asymmetric_config();
    let timings = config.timings();
    let mut controller = IntersectionController::new(config).unwrap().with_event_log(true);
    controller.run().unwrap();

    let changes: Vec<(i64, Phase, Phase)> = controller
        .event_log()
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::LightChange { time, from, to } => Some((*time, *from, *to)),
            _ => None,
        })
        .collect();

    assert!(changes.len() > 8);
    assert_eq!(changes[0], (7, Phase::GreenEW, Phase::YellowEW));

    let mut previous_time = 0;
    for (time, from, to) in &changes {
        assert_eq!(*to, from.next());
        assert_eq!(time - previous_time, timings.duration(*from));
        previous_time = *time;
    }

    let (_, _, last) = changes[changes.len() - 1];
    assert_eq!(controller.phase(), last);
}

#[test]
fn test_each_light_change_drains_one_axis() {
    let mut controller = IntersectionController::new(asymmetric_config())
        .unwrap()
        .with_event_log(true);
    controller.run().unwrap();

    let events = controller.event_log().events();
    for (idx, event) in events.iter().enumerate() {
        if let Event::LightChange { time, to, .. } = event {
            let expected_color = match to.color() {
                SignalColor::Yellow => SignalColor::Green,
                SignalColor::Green => SignalColor::Yellow,
            };
            let summaries: Vec<&Event> = events[idx + 1..]
                .iter()
                .take_while(|e| !matches!(e, Event::LightChange { .. }) && e.time() == *time)
                .filter(|e| matches!(e, Event::DrainSummary { .. }))
                .collect();

            assert_eq!(summaries.len(), 2, "light change at {}", time);
            for summary in summaries {
                if let Event::DrainSummary { color, .. } = summary {
                    assert_eq!(*color, expected_color);
                }
            }
        }
    }
}
