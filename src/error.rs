//! Error types for the simulator core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid request: floor {floor} is outside the building ({min}..={max})")]
    InvalidRequest { floor: i32, min: i32, max: i32 },

    #[error("invalid trip: already on floor {floor}")]
    EmptyTrip { floor: i32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
