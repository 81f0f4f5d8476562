//! Single-car elevator simulation: a batch of hall calls goes in, a SCAN
//! servicing order and a lazy stream of animation frames come out.

pub mod config;
pub mod context;
pub mod error;
pub mod queue;
pub mod render;
pub mod services;
pub mod simulation;
pub mod strategies;
pub mod strategy;
pub mod types;

pub use config::{SimulationConfig, StrategyKind};
pub use context::{ElevatorContext, Status};
pub use error::{Error, Result};
pub use simulation::{Frame, Frames, Simulation};
pub use strategy::{Stop, Strategy};
pub use types::request::{Direction, Request, Trip};
