//! PyO3 wrapper for IntersectionController
//!
//! This module provides the Python interface to the Rust controller.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{dispatch_record_to_py, parse_simulation_config, statistics_to_py};
use crate::config::parse_params;
use crate::models::Direction;
use crate::orchestrator::{IntersectionController, SimulationError, StepOutcome};

/// Python wrapper for the Rust intersection controller
///
/// # Example (from Python)
///
/// ```python
/// from intersection_sim_core import Intersection
///
/// sim = Intersection.new({
///     "seed": 1,
///     "stop_time": 100,
///     "ew_green": 10, "ew_yellow": 3,
///     "ns_green": 10, "ns_yellow": 3,
///     "east": {"mean": 5.0, "std_dev": 1.0},
///     "west": {"mean": 5.0, "std_dev": 1.0},
///     "north": {"mean": 8.0, "std_dev": 2.0},
///     "south": {"mean": 8.0, "std_dev": 2.0},
///     "yellow_advance_percent": 50,
/// })
/// stats = sim.run()
/// print(stats["directions"]["east"]["advanced"])
/// ```
#[pyclass(name = "Intersection", unsendable)]
pub struct PyIntersection {
    inner: IntersectionController,
}

fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidConfig(_) | SimulationError::InvalidDirection(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

#[pymethods]
impl PyIntersection {
    /// Create a simulation from a configuration dict
    ///
    /// # Errors
    ///
    /// Raises ValueError if a field is missing, mistyped, or out of range.
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let config = parse_simulation_config(config)?;
        let inner = IntersectionController::new(config).map_err(to_py_err)?;
        Ok(PyIntersection { inner })
    }

    /// Create a simulation from parameter file text
    #[staticmethod]
    fn from_params(text: &str) -> PyResult<Self> {
        let config = parse_params(text).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let inner = IntersectionController::new(config).map_err(to_py_err)?;
        Ok(PyIntersection { inner })
    }

    /// Schedule the initial arrivals and light change
    fn start(&mut self) -> PyResult<()> {
        self.inner.start().map_err(to_py_err)
    }

    /// Dispatch one event
    ///
    /// # Returns
    ///
    /// A dict describing the dispatch, or None once the simulation halted.
    /// Starts the simulation on first call.
    fn step(&mut self, py: Python) -> PyResult<Option<Py<PyDict>>> {
        if !self.inner.is_started() {
            self.inner.start().map_err(to_py_err)?;
        }
        match self.inner.step() {
            StepOutcome::Continue(record) => Ok(Some(dispatch_record_to_py(py, &record)?)),
            StepOutcome::Halted(_) => Ok(None),
        }
    }

    /// Run to completion and return the statistics dict
    ///
    /// # Errors
    ///
    /// Raises RuntimeError if the timeline emptied before the stop time.
    fn run(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        let stats = self.inner.run().map_err(to_py_err)?;
        statistics_to_py(py, &stats)
    }

    /// Statistics for the run so far
    fn statistics(&self, py: Python) -> PyResult<Py<PyDict>> {
        statistics_to_py(py, &self.inner.statistics())
    }

    /// Schedule the next arrival for a direction name
    ///
    /// Raises ValueError for unknown names; the simulation is unchanged.
    fn schedule_arrival(&mut self, direction: &str) -> PyResult<()> {
        self.inner
            .schedule_arrival_named(direction)
            .map_err(to_py_err)
    }

    /// Current simulated time
    fn current_time(&self) -> i64 {
        self.inner.current_time()
    }

    /// Current light phase, e.g. "EW Green"
    fn phase(&self) -> String {
        self.inner.phase().to_string()
    }

    /// Current queue length for a direction name
    fn queue_length(&self, direction: &str) -> PyResult<usize> {
        let direction: Direction = direction
            .parse()
            .map_err(|e: crate::models::DirectionParseError| PyValueError::new_err(e.to_string()))?;
        Ok(self.inner.queue(direction).len())
    }

    /// SHA-256 fingerprint of the configuration
    fn fingerprint(&self) -> String {
        self.inner.fingerprint().to_string()
    }
}
