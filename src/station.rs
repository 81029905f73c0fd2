use std::collections::VecDeque;

use crate::events::CarId;
use crate::models::StationKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Admission {
    Granted,
    Queued,
}

#[derive(Clone, Debug)]
pub struct Station {
    pub kind: StationKind,
    capacity: u32,
    busy: u32,
    queue: VecDeque<CarId>,
    served: u32,
    busy_time: f64,
}

impl Station {
    pub fn new(kind: StationKind, capacity: u32) -> Self {
        debug_assert!(capacity > 0);
        Self {
            kind,
            capacity,
            busy: 0,
            queue: VecDeque::new(),
            served: 0,
            busy_time: 0.0,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn busy(&self) -> u32 {
        self.busy
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn served(&self) -> u32 {
        self.served
    }

    pub fn busy_time(&self) -> f64 {
        self.busy_time
    }

    pub fn request(&mut self, car_id: CarId) -> Admission {
        if self.busy < self.capacity {
            self.busy += 1;
            Admission::Granted
        } else {
            self.queue.push_back(car_id);
            Admission::Queued
        }
    }

    /// Frees the slot held by a car whose service took `service_time`.
    /// When someone is waiting the slot goes straight to the head of the
    /// queue, which is returned.
    pub fn release(&mut self, service_time: f64) -> Option<CarId> {
        debug_assert!(self.busy > 0, "release on idle station {}", self.kind);
        self.served += 1;
        self.busy_time += service_time;
        match self.queue.pop_front() {
            Some(next) => Some(next),
            None => {
                self.busy = self.busy.saturating_sub(1);
                None
            }
        }
    }
}
