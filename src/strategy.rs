use std::fmt::Debug;
use std::sync::Arc;

use crate::config::StrategyKind;
use crate::context::ElevatorContext;
use crate::strategies::scan::ScanStrategy;
use crate::strategies::two_phase::TwoPhaseStrategy;
use crate::types::request::Direction;

/// The next floor to open the doors at, and the direction the car keeps
/// sweeping in once it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub floor: i32,
    pub sweep: Direction,
}

impl Stop {
    pub fn new(floor: i32, sweep: Direction) -> Self {
        Self { floor, sweep }
    }
}

/// Picks stops from the pending queues.
///
/// Implementations must only return floors that are still pending in the
/// context's queues, and must return `None` once both queues are empty.
pub trait Strategy: Send + Sync + Debug {
    fn next_stop(&self, ctx: &ElevatorContext) -> Option<Stop>;
}

pub type SharedStrategy = Arc<dyn Strategy>;

impl<T> Strategy for Arc<T>
where
    T: Strategy + ?Sized,
{
    fn next_stop(&self, ctx: &ElevatorContext) -> Option<Stop> {
        (**self).next_stop(ctx)
    }
}

pub fn strategy_for(kind: StrategyKind) -> SharedStrategy {
    match kind {
        StrategyKind::Scan => Arc::new(ScanStrategy),
        StrategyKind::TwoPhase => Arc::new(TwoPhaseStrategy),
    }
}
