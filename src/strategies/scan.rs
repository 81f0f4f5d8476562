use std::collections::BTreeSet;

use crate::context::ElevatorContext;
use crate::strategy::{Stop, Strategy};
use crate::types::request::Direction;

/// Directional sweep. The car keeps serving calls in its current direction
/// and only turns around once nothing is left ahead of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStrategy;

impl ScanStrategy {
    /// Nearest floor of `queue` at or beyond `from` when travelling in `direction`.
    fn ahead(queue: &BTreeSet<i32>, from: i32, direction: Direction) -> Option<i32> {
        match direction {
            Direction::Up => queue.range(from..).next().copied(),
            Direction::Down => queue.range(..=from).next_back().copied(),
        }
    }

    /// Floor of `queue` furthest along `direction`.
    fn furthest(queue: &BTreeSet<i32>, direction: Direction) -> Option<i32> {
        match direction {
            Direction::Up => queue.last().copied(),
            Direction::Down => queue.first().copied(),
        }
    }

    fn sweep(ctx: &ElevatorContext, direction: Direction) -> Option<Stop> {
        let current = ctx.current_floor();
        let queues = ctx.queues();
        let same = queues.queue(direction);
        let opposite = queues.queue(direction.reversed());

        if let Some(floor) = Self::ahead(same, current, direction) {
            return Some(Stop::new(floor, direction));
        }

        // Current direction is exhausted. Opposite calls still ahead of the car
        // start the return sweep from the far end.
        if let Some(floor) = Self::furthest(opposite, direction) {
            let beyond = match direction {
                Direction::Up => floor > current,
                Direction::Down => floor < current,
            };
            if beyond {
                return Some(Stop::new(floor, direction.reversed()));
            }
        }
        if let Some(floor) = Self::ahead(opposite, current, direction.reversed()) {
            return Some(Stop::new(floor, direction.reversed()));
        }

        // Only calls behind the car in its own direction are left.
        Self::furthest(same, direction.reversed()).map(|floor| Stop::new(floor, direction))
    }
}

impl Strategy for ScanStrategy {
    fn next_stop(&self, ctx: &ElevatorContext) -> Option<Stop> {
        let queues = ctx.queues();
        if queues.is_empty() {
            return None;
        }

        let current = ctx.current_floor();
        let up_pending = !queues.queue(Direction::Up).is_empty();
        let direction = ctx.status().direction();

        if queues.contains(current) {
            let sweep = direction.unwrap_or(if queues.queue(Direction::Up).contains(&current) {
                Direction::Up
            } else {
                Direction::Down
            });
            return Some(Stop::new(current, sweep));
        }

        let direction = direction.unwrap_or(if up_pending {
            Direction::Up
        } else {
            Direction::Down
        });
        Self::sweep(ctx, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::context::Status;
    use crate::types::request::Request;

    fn context(start: i32, requests: &[Request]) -> ElevatorContext {
        let config = SimulationConfig::default()
            .with_floors(0, 20)
            .with_start_floor(start);
        ElevatorContext::new(&config, requests).unwrap()
    }

    fn run(start: i32, requests: &[Request]) -> Vec<i32> {
        let mut ctx = context(start, requests);
        let mut order = Vec::new();
        while let Some(stop) = ScanStrategy.next_stop(&ctx) {
            ctx.set_current_floor(stop.floor);
            ctx.service_current_floor(stop.sweep);
            order.push(stop.floor);
        }
        assert!(ctx.is_finished());
        order
    }

    #[test]
    fn serves_up_calls_then_reverses() {
        let requests = [Request::up(5), Request::down(2), Request::up(8)];
        assert_eq!(run(0, &requests), vec![5, 8, 2]);
    }

    #[test]
    fn empty_batch_stays_idle() {
        let ctx = context(0, &[]);
        assert_eq!(ScanStrategy.next_stop(&ctx), None);
        assert_eq!(ctx.status(), Status::Idle);
    }

    #[test]
    fn call_at_current_floor_is_served_immediately() {
        assert_eq!(run(3, &[Request::up(3)]), vec![3]);
        assert_eq!(run(3, &[Request::up(3), Request::down(3)]), vec![3]);
        assert_eq!(run(3, &[Request::down(1), Request::down(3)]), vec![3, 1]);
    }

    #[test]
    fn idle_car_prefers_the_up_sweep() {
        let requests = [Request::down(4), Request::up(6)];
        assert_eq!(run(5, &requests), vec![6, 4]);
    }

    #[test]
    fn idle_car_with_only_down_calls_sweeps_down() {
        let requests = [Request::down(2), Request::down(7)];
        assert_eq!(run(5, &requests), vec![2, 7]);
    }

    #[test]
    fn goes_to_top_of_the_down_sweep_first() {
        // Down calls above the car: ride up to the highest, then sweep down.
        let requests = [
            Request::up(2),
            Request::down(7),
            Request::down(9),
            Request::down(1),
        ];
        assert_eq!(run(0, &requests), vec![2, 9, 7, 1]);
    }

    #[test]
    fn up_calls_behind_the_car_start_a_new_sweep_from_the_bottom() {
        let requests = [Request::up(2), Request::up(4), Request::up(9)];
        let mut ctx = context(6, &requests);
        let first = ScanStrategy.next_stop(&ctx).unwrap();
        assert_eq!(first, Stop::new(9, Direction::Up));
        ctx.set_current_floor(9);
        ctx.service_current_floor(first.sweep);
        assert_eq!(
            ScanStrategy.next_stop(&ctx),
            Some(Stop::new(2, Direction::Up))
        );
        assert_eq!(run(6, &requests), vec![9, 2, 4]);
    }

    #[test]
    fn trip_pickup_comes_before_drop_off() {
        // Drop-off at 7 is on the way up, but nobody has boarded yet.
        let requests = [Request::up(3), Request::up(7).after_pickup(3)];
        assert_eq!(run(5, &requests), vec![3, 7]);

        let requests = [Request::down(6), Request::down(1).after_pickup(6)];
        assert_eq!(run(2, &requests), vec![6, 1]);
    }

    #[test]
    fn shared_floor_is_served_once() {
        let requests = [Request::up(4), Request::down(4), Request::down(2)];
        assert_eq!(run(0, &requests), vec![4, 2]);
    }

    /// xorshift, so the generated batches are the same on every run.
    fn batches() -> Vec<(i32, Vec<Request>)> {
        let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };
        (0..300)
            .map(|_| {
                let start = (next() % 21) as i32;
                let len = (next() % 12) as usize;
                let requests = (0..len)
                    .map(|_| {
                        let floor = (next() % 21) as i32;
                        if next() % 2 == 0 {
                            Request::up(floor)
                        } else {
                            Request::down(floor)
                        }
                    })
                    .collect();
                (start, requests)
            })
            .collect()
    }

    #[test]
    fn every_requested_floor_is_served_exactly_once() {
        for (start, requests) in batches() {
            let order = run(start, &requests);
            let mut expected: Vec<i32> = requests.iter().map(|r| r.floor).collect();
            expected.sort();
            expected.dedup();
            let mut served = order.clone();
            served.sort();
            assert_eq!(served, expected, "start {start}, requests {requests:?}");
        }
    }

    #[test]
    fn never_turns_while_calls_remain_ahead() {
        for (start, requests) in batches() {
            let mut ctx = context(start, &requests);
            while let Some(stop) = ScanStrategy.next_stop(&ctx) {
                if let Some(direction) = ctx.status().direction() {
                    let same = ctx.queues().queue(direction);
                    if let Some(nearest) =
                        ScanStrategy::ahead(same, ctx.current_floor(), direction)
                    {
                        assert_eq!(stop, Stop::new(nearest, direction));
                    }
                }
                ctx.set_current_floor(stop.floor);
                ctx.service_current_floor(stop.sweep);
            }
        }
    }

    #[test]
    fn same_input_gives_same_order() {
        for (start, requests) in batches().into_iter().take(50) {
            assert_eq!(run(start, &requests), run(start, &requests));
        }
    }
}
