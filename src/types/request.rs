use anyhow::Context;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A hall call: someone on `floor` wants to travel in `direction`.
///
/// A trip's drop-off carries the floor its passenger boards at in `pickup`;
/// it only becomes a stop once that floor has been serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Request {
    pub floor: i32,
    pub direction: Direction,
    pub pickup: Option<i32>,
}

impl Request {
    pub fn new(floor: i32, direction: Direction) -> Self {
        Self {
            floor,
            direction,
            pickup: None,
        }
    }

    /// Holds this request back until `floor` has been serviced.
    pub fn after_pickup(mut self, floor: i32) -> Self {
        self.pickup = Some(floor);
        self
    }

    pub fn up(floor: i32) -> Self {
        Self::new(floor, Direction::Up)
    }

    pub fn down(floor: i32) -> Self {
        Self::new(floor, Direction::Down)
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Up => write!(f, "U{}", self.floor),
            Direction::Down => write!(f, "D{}", self.floor),
        }
    }
}

/// Parses the `U<n>` / `D<n>` call codes.
impl FromStr for Request {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        let value = value.trim();
        if value.len() < 2 {
            anyhow::bail!(
                "request too short: expected at least 2 characters, got {:?}",
                value
            );
        }

        let mut chars = value.chars();
        let code = chars.next();
        let num_str = chars.as_str();
        let floor = num_str
            .parse::<i32>()
            .context(format!("failed to parse '{num_str}' as a floor"))?;

        match code {
            Some('U' | 'u') => Ok(Request::up(floor)),
            Some('D' | 'd') => Ok(Request::down(floor)),
            other => anyhow::bail!("unknown request code: {other:?}"),
        }
    }
}

/// A passenger journey from one floor to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trip {
    pub from: i32,
    pub to: i32,
}

impl Trip {
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    /// Pickup and drop-off calls, both in the direction of travel. The
    /// drop-off waits for the pickup.
    pub fn requests(&self) -> Result<[Request; 2]> {
        let direction = match self.to.cmp(&self.from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => return Err(Error::EmptyTrip { floor: self.from }),
        };
        Ok([
            Request::new(self.from, direction),
            Request::new(self.to, direction).after_pickup(self.from),
        ])
    }
}

/// Parses `<from>:<to>`.
impl FromStr for Trip {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        let (from, to) = value
            .trim()
            .split_once(':')
            .with_context(|| format!("trip {value:?} is not of the form <from>:<to>"))?;
        let from = from
            .parse::<i32>()
            .context(format!("failed to parse '{from}' as a floor"))?;
        let to = to
            .parse::<i32>()
            .context(format!("failed to parse '{to}' as a floor"))?;
        Ok(Trip::new(from, to))
    }
}
