//! Turns a validated batch into stops and stops into frames.

use std::iter::FusedIterator;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::context::{ElevatorContext, Status};
use crate::error::Result;
use crate::strategy::{SharedStrategy, Stop, Strategy, strategy_for};
use crate::types::request::Request;

/// One rendered position of the car.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Zero-based position of this frame in the run.
    pub index: usize,
    /// Height of the car in floors; fractional between floors.
    pub position: f64,
    /// Last whole floor the car was level with.
    pub floor: i32,
    /// State of the car once this frame has been applied.
    pub status: Status,
    /// Floor the car is heading for.
    pub target: i32,
    /// Set on the frame where the doors open.
    pub serviced: Option<i32>,
}

/// A batch ready to run: validated queues, a parked car and a strategy.
///
/// Cloning a simulation before calling [`Simulation::frames`] is how a
/// consumer replays the same run.
#[derive(Debug, Clone)]
pub struct Simulation<S = SharedStrategy> {
    ctx: ElevatorContext,
    strategy: S,
    steps_per_floor: u32,
}

impl Simulation<SharedStrategy> {
    /// Builds a simulation with the strategy named in `config`.
    pub fn from_config(config: &SimulationConfig, requests: &[Request]) -> Result<Self> {
        Simulation::new(config, requests, strategy_for(config.strategy))
    }
}

impl<S: Strategy> Simulation<S> {
    pub fn new(config: &SimulationConfig, requests: &[Request], strategy: S) -> Result<Self> {
        let ctx = ElevatorContext::new(config, requests)?;
        Ok(Self {
            ctx,
            strategy,
            steps_per_floor: config.steps_per_floor,
        })
    }

    pub fn context(&self) -> &ElevatorContext {
        &self.ctx
    }

    /// Floors in the order they will be serviced. Does not consume the run.
    pub fn plan(&self) -> Vec<i32> {
        let mut ctx = self.ctx.clone();
        let mut order = Vec::with_capacity(ctx.queues().pending_floors());
        while let Some(stop) = self.strategy.next_stop(&ctx) {
            debug_assert!(ctx.queues().contains(stop.floor));
            ctx.set_current_floor(stop.floor);
            ctx.service_current_floor(stop.sweep);
            order.push(stop.floor);
        }
        order
    }

    pub fn frames(self) -> Frames<S> {
        let level = i64::from(self.ctx.current_floor()) * i64::from(self.steps_per_floor);
        Frames {
            ctx: self.ctx,
            strategy: self.strategy,
            steps_per_floor: i64::from(self.steps_per_floor),
            level,
            target: None,
            index: 0,
            done: false,
        }
    }
}

/// Lazy frame sequence. Every call to `next` moves the car one sub-step toward
/// its target; reaching it services the floor and the following call asks the
/// strategy for the next one.
#[derive(Debug)]
pub struct Frames<S = SharedStrategy> {
    ctx: ElevatorContext,
    strategy: S,
    steps_per_floor: i64,
    level: i64,
    target: Option<Stop>,
    index: usize,
    done: bool,
}

impl<S: Strategy> Frames<S> {
    pub fn context(&self) -> &ElevatorContext {
        &self.ctx
    }

    fn choose_target(&mut self) -> Option<Stop> {
        let stop = self.strategy.next_stop(&self.ctx)?;
        let current = self.ctx.current_floor();
        match stop.floor.cmp(&current) {
            std::cmp::Ordering::Greater => {
                info!(floor = stop.floor, "moving up to floor");
                self.ctx.set_status(Status::MovingUp);
            }
            std::cmp::Ordering::Less => {
                info!(floor = stop.floor, "moving down to floor");
                self.ctx.set_status(Status::MovingDown);
            }
            std::cmp::Ordering::Equal => {
                debug!(floor = current, "already at floor");
            }
        }
        self.target = Some(stop);
        Some(stop)
    }
}

impl<S: Strategy> Iterator for Frames<S> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }

        let stop = match self.target {
            Some(stop) => stop,
            None => match self.choose_target() {
                Some(stop) => stop,
                None => {
                    self.done = true;
                    self.ctx.set_status(Status::Idle);
                    info!(floor = self.ctx.current_floor(), "all requests processed");
                    return None;
                }
            },
        };

        let goal = i64::from(stop.floor) * self.steps_per_floor;
        match self.level.cmp(&goal) {
            std::cmp::Ordering::Less => self.level += 1,
            std::cmp::Ordering::Greater => self.level -= 1,
            std::cmp::Ordering::Equal => {}
        }
        if self.level.rem_euclid(self.steps_per_floor) == 0 {
            // Whole floors always fit: the level never leaves the building's i32 range.
            self.ctx
                .set_current_floor((self.level / self.steps_per_floor) as i32);
        }

        let serviced = if self.level == goal {
            self.ctx.service_current_floor(stop.sweep);
            self.target = None;
            debug!(floor = stop.floor, status = %self.ctx.status(), "serviced floor");
            Some(stop.floor)
        } else {
            None
        };

        let frame = Frame {
            index: self.index,
            position: self.level as f64 / self.steps_per_floor as f64,
            floor: self.ctx.current_floor(),
            status: self.ctx.status(),
            target: stop.floor,
            serviced,
        };
        self.index += 1;
        Some(frame)
    }
}

impl<S: Strategy> FusedIterator for Frames<S> {}
