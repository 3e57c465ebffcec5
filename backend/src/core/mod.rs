//! Core primitives shared by every simulation module

pub mod time;

pub use time::{SimClock, SimTime, NEVER};
