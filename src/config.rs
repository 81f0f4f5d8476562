//! Simulation configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// Which scheduling discipline drives the car.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Directional sweep that only reverses once the current direction is exhausted.
    #[default]
    Scan,
    /// Every up call in ascending order, then every down call in descending order.
    TwoPhase,
}

impl std::str::FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value {
            "scan" => Ok(StrategyKind::Scan),
            "two-phase" => Ok(StrategyKind::TwoPhase),
            other => anyhow::bail!("unknown strategy {other:?}, expected scan or two-phase"),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Lowest valid floor (inclusive).
    pub min_floor: i32,

    /// Highest valid floor (inclusive).
    pub max_floor: i32,

    /// Floor the car waits at before the run starts.
    pub start_floor: i32,

    /// Frames emitted per floor of travel.
    pub steps_per_floor: u32,

    /// Delay between rendered frames, in milliseconds.
    pub frame_interval_ms: u64,

    /// Scheduling discipline.
    pub strategy: StrategyKind,

    /// Log level.
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_floor: 0,
            max_floor: 9,
            start_floor: 0,
            steps_per_floor: 1,
            frame_interval_ms: 10,
            strategy: StrategyKind::Scan,
            log_level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Load from a TOML configuration file.
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Set the inclusive floor range of the building.
    pub fn with_floors(mut self, min_floor: i32, max_floor: i32) -> Self {
        self.min_floor = min_floor;
        self.max_floor = max_floor;
        self
    }

    pub fn with_start_floor(mut self, floor: i32) -> Self {
        self.start_floor = floor;
        self
    }

    pub fn with_steps_per_floor(mut self, steps: u32) -> Self {
        self.steps_per_floor = steps;
        self
    }

    pub fn with_frame_interval_ms(mut self, millis: u64) -> Self {
        self.frame_interval_ms = millis;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_floor > self.max_floor {
            return Err(Error::InvalidConfig(format!(
                "min_floor {} is above max_floor {}",
                self.min_floor, self.max_floor
            )));
        }
        if !(self.min_floor..=self.max_floor).contains(&self.start_floor) {
            return Err(Error::InvalidConfig(format!(
                "start_floor {} is outside {}..={}",
                self.start_floor, self.min_floor, self.max_floor
            )));
        }
        if self.steps_per_floor == 0 {
            return Err(Error::InvalidConfig(
                "steps_per_floor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
