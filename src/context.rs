use std::fmt;
use std::fmt::Display;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::queue::RequestQueues;
use crate::types::request::{Direction, Request};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    MovingUp,
    MovingDown,
}

impl Status {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Status::Idle => None,
            Status::MovingUp => Some(Direction::Up),
            Status::MovingDown => Some(Direction::Down),
        }
    }
}

impl From<Direction> for Status {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Status::MovingUp,
            Direction::Down => Status::MovingDown,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "IDLE"),
            Status::MovingUp => write!(f, "UP"),
            Status::MovingDown => write!(f, "DOWN"),
        }
    }
}

/// Everything the scheduler needs to know about the car, passed explicitly to
/// every scheduling and stepping call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorContext {
    current_floor: i32,
    status: Status,
    queues: RequestQueues,
}

impl ElevatorContext {
    /// Validates the config and the whole batch, then parks the car idle at
    /// the start floor.
    pub fn new(config: &SimulationConfig, requests: &[Request]) -> Result<Self> {
        config.validate()?;
        let queues = RequestQueues::build(requests, config.min_floor, config.max_floor)?;
        Ok(Self {
            current_floor: config.start_floor,
            status: Status::Idle,
            queues,
        })
    }

    pub fn current_floor(&self) -> i32 {
        self.current_floor
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn queues(&self) -> &RequestQueues {
        &self.queues
    }

    /// Idle with nothing left to serve.
    pub fn is_finished(&self) -> bool {
        self.status == Status::Idle && self.queues.is_empty()
    }

    pub(crate) fn set_current_floor(&mut self, floor: i32) {
        self.current_floor = floor;
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Opens the doors at the current floor: every call waiting here is
    /// cleared, then the car continues in `sweep` or parks when idle.
    pub(crate) fn service_current_floor(&mut self, sweep: Direction) {
        self.queues.service(self.current_floor);
        self.status = if self.queues.is_empty() {
            Status::Idle
        } else {
            Status::from(sweep)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn starts_idle_at_start_floor() {
        let config = SimulationConfig::default().with_start_floor(4);
        let ctx = ElevatorContext::new(&config, &[Request::up(7)]).unwrap();
        assert_eq!(ctx.current_floor(), 4);
        assert_eq!(ctx.status(), Status::Idle);
        assert!(!ctx.is_finished());
    }

    #[test]
    fn empty_batch_is_already_finished() {
        let ctx = ElevatorContext::new(&SimulationConfig::default(), &[]).unwrap();
        assert!(ctx.is_finished());
    }

    #[test]
    fn rejects_batch_with_invalid_floor() {
        let err = ElevatorContext::new(&SimulationConfig::default(), &[Request::down(42)])
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidRequest {
                floor: 42,
                min: 0,
                max: 9
            }
        );
    }

    #[test]
    fn servicing_last_call_parks_the_car() {
        let mut ctx =
            ElevatorContext::new(&SimulationConfig::default(), &[Request::up(0), Request::up(3)])
                .unwrap();
        ctx.service_current_floor(Direction::Up);
        assert_eq!(ctx.status(), Status::MovingUp);
        ctx.set_current_floor(3);
        ctx.service_current_floor(Direction::Up);
        assert!(ctx.is_finished());
    }
}
