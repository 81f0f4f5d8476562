use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::request::{Direction, Request};

/// Pending stops, one ordered set per call direction.
///
/// The up queue is walked in ascending order and the down queue in descending
/// order. A floor is held at most once per direction. Trip drop-offs stay
/// out of both queues until their pickup floor is serviced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestQueues {
    up_queue: BTreeSet<i32>,
    down_queue: BTreeSet<i32>,
    held: Vec<Request>,
    riding_up: BTreeSet<i32>,
    riding_down: BTreeSet<i32>,
}

impl RequestQueues {
    /// Partitions a batch into the two queues, rejecting any floor outside
    /// `min_floor..=max_floor`. Nothing is queued if a request is rejected.
    pub fn build<'a, I>(requests: I, min_floor: i32, max_floor: i32) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Request>,
    {
        let in_range = |floor: i32| {
            if (min_floor..=max_floor).contains(&floor) {
                Ok(())
            } else {
                Err(Error::InvalidRequest {
                    floor,
                    min: min_floor,
                    max: max_floor,
                })
            }
        };

        let mut queues = RequestQueues::default();
        let mut held = Vec::new();
        for request in requests {
            in_range(request.floor)?;
            match request.pickup {
                Some(pickup) => {
                    in_range(pickup)?;
                    held.push(*request);
                }
                None => queues.enqueue(*request),
            }
        }

        // A drop-off whose pickup is not queued has nothing to wait for.
        for request in held {
            match request.pickup {
                Some(pickup) if queues.contains(pickup) => queues.held.push(request),
                _ => queues.enqueue(request),
            }
        }
        Ok(queues)
    }

    fn enqueue(&mut self, request: Request) {
        let inserted = match request.direction {
            Direction::Up => self.up_queue.insert(request.floor),
            Direction::Down => self.down_queue.insert(request.floor),
        };
        debug!(
            %request,
            duplicate = !inserted,
            up_queue = ?self.up_queue,
            down_queue = ?self.down_queue,
            "request queued"
        );
    }

    pub fn is_empty(&self) -> bool {
        self.up_queue.is_empty() && self.down_queue.is_empty() && self.held.is_empty()
    }

    /// Number of distinct floors still waiting for a stop, held drop-offs included.
    pub fn pending_floors(&self) -> usize {
        let mut floors: BTreeSet<i32> = self.up_queue.union(&self.down_queue).copied().collect();
        floors.extend(self.held.iter().map(|request| request.floor));
        floors.len()
    }

    pub fn contains(&self, floor: i32) -> bool {
        self.up_queue.contains(&floor) || self.down_queue.contains(&floor)
    }

    pub fn queue(&self, direction: Direction) -> &BTreeSet<i32> {
        match direction {
            Direction::Up => &self.up_queue,
            Direction::Down => &self.down_queue,
        }
    }

    /// Up queue in service order (ascending).
    pub fn up(&self) -> impl Iterator<Item = i32> + '_ {
        self.up_queue.iter().copied()
    }

    /// Down queue in service order (descending).
    pub fn down(&self) -> impl Iterator<Item = i32> + '_ {
        self.down_queue.iter().rev().copied()
    }

    /// Drop-offs of passengers already aboard, in service order for `direction`.
    pub fn riding(&self, direction: Direction) -> Box<dyn Iterator<Item = i32> + '_> {
        match direction {
            Direction::Up => Box::new(self.riding_up.iter().copied()),
            Direction::Down => Box::new(self.riding_down.iter().rev().copied()),
        }
    }

    /// Clears every call waiting at `floor`, in both directions, and queues
    /// the drop-offs of passengers boarding there.
    pub fn service(&mut self, floor: i32) -> bool {
        let up = self.up_queue.remove(&floor);
        let down = self.down_queue.remove(&floor);
        self.riding_up.remove(&floor);
        self.riding_down.remove(&floor);

        let (boarding, waiting): (Vec<Request>, Vec<Request>) = std::mem::take(&mut self.held)
            .into_iter()
            .partition(|request| request.pickup == Some(floor));
        self.held = waiting;
        for request in boarding {
            debug!(pickup = floor, drop_off = request.floor, "passenger boarded");
            match request.direction {
                Direction::Up => self.riding_up.insert(request.floor),
                Direction::Down => self.riding_down.insert(request.floor),
            };
            self.enqueue(request);
        }
        up || down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_and_orders_by_direction() {
        let requests = [
            Request::up(5),
            Request::down(2),
            Request::up(8),
            Request::down(7),
            Request::up(1),
        ];
        let queues = RequestQueues::build(&requests, 0, 9).unwrap();
        assert_eq!(queues.up().collect::<Vec<_>>(), vec![1, 5, 8]);
        assert_eq!(queues.down().collect::<Vec<_>>(), vec![7, 2]);
    }

    #[test]
    fn deduplicates_within_a_direction_only() {
        let requests = [
            Request::up(4),
            Request::up(4),
            Request::down(4),
            Request::down(4),
        ];
        let queues = RequestQueues::build(&requests, 0, 9).unwrap();
        assert_eq!(queues.up().collect::<Vec<_>>(), vec![4]);
        assert_eq!(queues.down().collect::<Vec<_>>(), vec![4]);
        assert_eq!(queues.pending_floors(), 1);
    }

    #[test]
    fn empty_batch_gives_empty_queues() {
        let requests: [Request; 0] = [];
        let queues = RequestQueues::build(&requests, 0, 9).unwrap();
        assert!(queues.is_empty());
        assert_eq!(queues, RequestQueues::default());
    }

    #[test]
    fn out_of_range_floor_is_rejected() {
        let requests = [Request::up(3), Request::down(10)];
        assert_eq!(
            RequestQueues::build(&requests, 0, 9),
            Err(Error::InvalidRequest {
                floor: 10,
                min: 0,
                max: 9
            })
        );
        assert!(RequestQueues::build(&[Request::up(-1)], 0, 9).is_err());
        assert!(RequestQueues::build(&[Request::up(-1)], -2, 9).is_ok());
    }

    #[test]
    fn servicing_clears_both_directions() {
        let requests = [Request::up(3), Request::down(3), Request::up(6)];
        let mut queues = RequestQueues::build(&requests, 0, 9).unwrap();
        assert!(queues.service(3));
        assert!(!queues.contains(3));
        assert!(!queues.service(3));
        assert_eq!(queues.up().collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn drop_off_waits_for_its_pickup() {
        let requests = [Request::up(3), Request::up(7).after_pickup(3)];
        let mut queues = RequestQueues::build(&requests, 0, 9).unwrap();
        assert_eq!(queues.up().collect::<Vec<_>>(), vec![3]);
        assert!(!queues.contains(7));
        assert_eq!(queues.pending_floors(), 2);

        queues.service(3);
        assert_eq!(queues.up().collect::<Vec<_>>(), vec![7]);
        assert_eq!(queues.riding(Direction::Up).collect::<Vec<_>>(), vec![7]);

        queues.service(7);
        assert!(queues.is_empty());
        assert_eq!(queues.riding(Direction::Up).count(), 0);
    }

    #[test]
    fn drop_off_without_queued_pickup_is_queued_directly() {
        let requests = [Request::down(1).after_pickup(6)];
        let queues = RequestQueues::build(&requests, 0, 9).unwrap();
        assert_eq!(queues.down().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn pickup_floor_is_range_checked() {
        let requests = [Request::up(5).after_pickup(-3)];
        assert_eq!(
            RequestQueues::build(&requests, 0, 9),
            Err(Error::InvalidRequest {
                floor: -3,
                min: 0,
                max: 9
            })
        );
    }
}
