//! Domain models for the intersection simulator

pub mod approach;
pub mod event;
pub mod vehicle;

// Re-exports
pub use approach::ApproachQueue;
pub use event::{Event, EventLog};
pub use vehicle::{Axis, Direction, DirectionMap, DirectionParseError, Vehicle, VehicleId};
