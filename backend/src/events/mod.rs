//! Scheduled events and the time-ordered timeline
//!
//! - [`EventKind`]: what happens (an arrival or a light change)
//! - [`ScheduledEvent`]: an immutable (time, kind) pair
//! - [`Timeline`]: min-ordered collection with FIFO tie-break

pub mod timeline;
pub mod types;

pub use timeline::Timeline;
pub use types::{EventKind, ScheduledEvent};
