use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::models::StationKind;

pub type CarId = usize;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Arrival,
    ServiceComplete { car_id: CarId, station: StationKind },
    QueueSample,
}

#[derive(Clone, Debug)]
pub struct ScheduledEvent {
    pub time: f64,
    pub seq: u64,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time: f64, seq: u64, event: Event) -> Self {
        Self { time, seq, event }
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Events sharing a timestamp come out in the order they were scheduled.
#[derive(Debug, Default)]
pub struct EventScheduler {
    now: f64,
    next_seq: u64,
    events: BinaryHeap<Reverse<ScheduledEvent>>,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn schedule_in(&mut self, delay: f64, event: Event) {
        debug_assert!(delay >= 0.0, "negative delay {}", delay);
        let time = self.now + delay.max(0.0);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Reverse(ScheduledEvent::new(time, seq, event)));
    }

    /// Pops the earliest event strictly before `horizon` and advances the
    /// clock to it. Anything at or past the horizon stays pending.
    pub fn next_before(&mut self, horizon: f64) -> Option<Event> {
        let Reverse(head) = self.events.peek()?;
        if head.time >= horizon {
            return None;
        }
        let Reverse(scheduled) = self.events.pop()?;
        self.now = scheduled.time;
        Some(scheduled.event)
    }
}
