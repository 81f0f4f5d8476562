use crate::context::ElevatorContext;
use crate::strategy::{Stop, Strategy};
use crate::types::request::Direction;

/// Drains every up call in ascending order, then every down call in
/// descending order, wherever the car happens to be. Passengers picked up
/// along the way are dropped off before the next pickup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPhaseStrategy;

impl Strategy for TwoPhaseStrategy {
    fn next_stop(&self, ctx: &ElevatorContext) -> Option<Stop> {
        let queues = ctx.queues();
        for direction in [Direction::Up, Direction::Down] {
            let next = queues.riding(direction).next().or_else(|| match direction {
                Direction::Up => queues.up().next(),
                Direction::Down => queues.down().next(),
            });
            if let Some(floor) = next {
                return Some(Stop::new(floor, direction));
            }
        }
        None
    }
}
