//! Vehicles and compass directions
//!
//! A [`Vehicle`] is an immutable record of one crossing request. It is
//! created when its arrival event is dispatched, owned by the approach
//! queue for its origin direction, and consumed when it advances.

use crate::core::SimTime;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// One of the four approaches feeding the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    /// All directions, in the order arrivals are first scheduled
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// Axis whose light phase governs this approach
    pub fn axis(self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::EastWest,
            Direction::North | Direction::South => Axis::NorthSouth,
        }
    }

    /// Stable index into per-direction storage
    pub fn index(self) -> usize {
        match self {
            Direction::East => 0,
            Direction::West => 1,
            Direction::North => 2,
            Direction::South => 3,
        }
    }

    /// Lowercase name, e.g. `"east"`
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::West => "west",
            Direction::North => "north",
            Direction::South => "south",
        }
    }

    /// Label used in reports, e.g. `"east-bound"`
    pub fn bound_label(self) -> &'static str {
        match self {
            Direction::East => "east-bound",
            Direction::West => "west-bound",
            Direction::North => "north-bound",
            Direction::South => "south-bound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known direction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction: {0:?}")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}

/// An opposing pair of approaches that share one light phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    EastWest,
    NorthSouth,
}

impl Axis {
    /// Both directions of the axis, in drain order
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Axis::EastWest => [Direction::East, Direction::West],
            Axis::NorthSouth => [Direction::North, Direction::South],
        }
    }

    /// The crossing axis
    pub fn other(self) -> Axis {
        match self {
            Axis::EastWest => Axis::NorthSouth,
            Axis::NorthSouth => Axis::EastWest,
        }
    }

    /// Short label, `"EW"` or `"NS"`
    pub fn short_label(self) -> &'static str {
        match self {
            Axis::EastWest => "EW",
            Axis::NorthSouth => "NS",
        }
    }

    /// Long label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Axis::EastWest => "east-west",
            Axis::NorthSouth => "north-south",
        }
    }
}

/// Fixed-size storage holding one value per [`Direction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionMap<T>([T; 4]);

impl<T> DirectionMap<T> {
    /// Build a map by evaluating `f` once per direction
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self(Direction::ALL.map(&mut f))
    }

    /// Iterate `(direction, value)` pairs in [`Direction::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.0.iter())
    }

    /// Project every value through `f`
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> DirectionMap<U> {
        DirectionMap::from_fn(|direction| f(&self[direction]))
    }
}

impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.0[direction.index()]
    }
}

impl<T> IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.0[direction.index()]
    }
}

// Serialized as `{"east": .., "west": .., ...}` rather than a bare array
impl<T: Serialize> Serialize for DirectionMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (direction, value) in self.iter() {
            map.serialize_entry(direction.as_str(), value)?;
        }
        map.end()
    }
}

/// Monotonically increasing vehicle identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub u64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single crossing request
///
/// # Example
///
/// ```rust
/// use intersection_sim_core::models::{Direction, Vehicle, VehicleId};
///
/// let car = Vehicle::new(VehicleId(1), Direction::North, 42);
/// assert_eq!(car.origin(), Direction::North);
/// assert_eq!(car.arrival_time(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    origin: Direction,
    arrival_time: SimTime,
}

impl Vehicle {
    pub fn new(id: VehicleId, origin: Direction, arrival_time: SimTime) -> Self {
        Self {
            id,
            origin,
            arrival_time,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn origin(&self) -> Direction {
        self.origin
    }

    pub fn arrival_time(&self) -> SimTime {
        self.arrival_time
    }
}
