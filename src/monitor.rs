use crate::station::Station;
use crate::state::QueueSample;

pub const SAMPLE_PERIOD: f64 = 1.0;

#[derive(Clone, Debug)]
pub struct QueueMonitor {
    period: f64,
    samples: Vec<QueueSample>,
}

impl QueueMonitor {
    pub fn new(period: f64) -> Self {
        Self {
            period,
            samples: Vec::new(),
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn sample(&mut self, now: f64, stations: &[Station; 3]) {
        let [order, pay, pickup] = stations;
        let queue_order = order.queue_len();
        let queue_pay = pay.queue_len();
        let queue_pickup = pickup.queue_len();
        self.samples.push(QueueSample {
            time: now,
            queue_order,
            queue_pay,
            queue_pickup,
            queue_total: queue_order + queue_pay + queue_pickup,
        });
    }

    pub fn into_samples(self) -> Vec<QueueSample> {
        self.samples
    }
}

impl Default for QueueMonitor {
    fn default() -> Self {
        Self::new(SAMPLE_PERIOD)
    }
}
