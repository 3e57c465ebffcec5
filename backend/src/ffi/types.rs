//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::arrivals::ArrivalConfig;
use crate::config::SimulationConfig;
use crate::models::Direction;
use crate::orchestrator::{DispatchRecord, HaltReason, SimulationStatistics};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing, or the conversion error
/// if it has the wrong type.
fn extract_required<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field with a default value if missing.
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to SimulationConfig
///
/// Arrival distributions are nested dicts: `{"mean": 5.0, "std_dev": 1.0}`.
/// `std_dev` defaults to 0.
///
/// # Errors
///
/// Returns PyErr if required fields are missing or have the wrong type.
/// Range checks happen later, when the controller is built.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    Ok(SimulationConfig {
        seed: extract_required(py_config, "seed")?,
        stop_time: extract_required(py_config, "stop_time")?,
        ew_green: extract_required(py_config, "ew_green")?,
        ew_yellow: extract_required(py_config, "ew_yellow")?,
        ns_green: extract_required(py_config, "ns_green")?,
        ns_yellow: extract_required(py_config, "ns_yellow")?,
        east: parse_arrival(py_config, Direction::East)?,
        west: parse_arrival(py_config, Direction::West)?,
        north: parse_arrival(py_config, Direction::North)?,
        south: parse_arrival(py_config, Direction::South)?,
        yellow_advance_percent: extract_required(py_config, "yellow_advance_percent")?,
    })
}

fn parse_arrival(py_config: &Bound<'_, PyDict>, direction: Direction) -> PyResult<ArrivalConfig> {
    let key = direction.as_str();
    let arrival: Bound<'_, PyDict> = py_config
        .get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .downcast_into()?;

    Ok(ArrivalConfig::new(
        extract_required(&arrival, "mean")?,
        extract_with_default(&arrival, "std_dev", 0.0)?,
    ))
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert DispatchRecord to Python dict
pub fn dispatch_record_to_py(py: Python, record: &DispatchRecord) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("time", record.time)?;
    dict.set_item("event", record.kind.name())?;
    dict.set_item("phase", record.phase.to_string())?;

    let queues = PyDict::new(py);
    let max_queues = PyDict::new(py);
    let advanced = PyDict::new(py);
    for direction in Direction::ALL {
        queues.set_item(direction.as_str(), record.queue_lengths[direction])?;
        max_queues.set_item(direction.as_str(), record.max_queue_lengths[direction])?;
        advanced.set_item(direction.as_str(), record.total_advanced[direction])?;
    }
    dict.set_item("queue_lengths", queues)?;
    dict.set_item("max_queue_lengths", max_queues)?;
    dict.set_item("total_advanced", advanced)?;

    Ok(dict.unbind())
}

/// Convert SimulationStatistics to Python dict
pub fn statistics_to_py(py: Python, stats: &SimulationStatistics) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("config_fingerprint", &stats.config_fingerprint)?;
    dict.set_item("final_time", stats.final_time)?;
    dict.set_item("events_dispatched", stats.events_dispatched)?;
    dict.set_item("phase", stats.phase.to_string())?;
    dict.set_item("halt", stats.halt.map(halt_label))?;
    dict.set_item("total_arrivals", stats.total_arrivals())?;
    dict.set_item("total_advanced", stats.total_advanced())?;

    let directions = PyDict::new(py);
    for (direction, figures) in stats.directions.iter() {
        let entry = PyDict::new(py);
        entry.set_item("arrivals", figures.arrivals)?;
        entry.set_item("advanced", figures.advanced)?;
        entry.set_item("advanced_on_green", figures.advanced_on_green)?;
        entry.set_item("advanced_on_yellow", figures.advanced_on_yellow)?;
        entry.set_item("max_queue_length", figures.max_queue_length)?;
        entry.set_item("final_queue_length", figures.final_queue_length)?;
        directions.set_item(direction.as_str(), entry)?;
    }
    dict.set_item("directions", directions)?;

    Ok(dict.unbind())
}

fn halt_label(reason: HaltReason) -> &'static str {
    match reason {
        HaltReason::StopTimeReached { .. } => "stop_time_reached",
        HaltReason::NoEventScheduled { .. } => "no_event_scheduled",
    }
}
