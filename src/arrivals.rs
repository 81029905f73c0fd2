use rand::Rng;

use crate::events::CarId;

pub fn sample_exponential<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> f64 {
    let mut u = rng.gen::<f64>();
    if u <= f64::MIN_POSITIVE {
        u = f64::MIN_POSITIVE;
    }
    -u.ln() * mean
}

#[derive(Clone, Debug)]
pub struct ArrivalGenerator {
    mean_interval: f64,
    issued: CarId,
}

impl ArrivalGenerator {
    pub fn new(mean_interval: f64) -> Self {
        Self {
            mean_interval,
            issued: 0,
        }
    }

    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_exponential(rng, self.mean_interval)
    }

    pub fn next_id(&mut self) -> CarId {
        self.issued += 1;
        self.issued
    }

    pub fn issued(&self) -> usize {
        self.issued
    }
}
