use serde::Serialize;

use crate::events::CarId;
use crate::models::{SimConfig, StationKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct StageTimes {
    pub queue_entry: f64,
    pub service_start: f64,
    pub service_end: f64,
}

impl StageTimes {
    pub fn wait(&self) -> f64 {
        self.service_start - self.queue_entry
    }

    pub fn service(&self) -> f64 {
        self.service_end - self.service_start
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CarRecord {
    pub id: CarId,
    pub arrival_time: f64,
    pub completion_time: f64,
    pub wait_order: f64,
    pub wait_pay: f64,
    pub wait_pickup: f64,
    pub total_wait: f64,
    pub total_service: f64,
    pub total_system_time: f64,
    pub stages: [StageTimes; 3],
}

impl CarRecord {
    pub fn stage(&self, station: StationKind) -> &StageTimes {
        &self.stages[station.index()]
    }

    pub fn wait_at(&self, station: StationKind) -> f64 {
        match station {
            StationKind::Order => self.wait_order,
            StationKind::Pay => self.wait_pay,
            StationKind::Pickup => self.wait_pickup,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueSample {
    pub time: f64,
    pub queue_order: usize,
    pub queue_pay: usize,
    pub queue_pickup: usize,
    pub queue_total: usize,
}

impl QueueSample {
    pub fn queue_at(&self, station: StationKind) -> usize {
        match station {
            StationKind::Order => self.queue_order,
            StationKind::Pay => self.queue_pay,
            StationKind::Pickup => self.queue_pickup,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StationUtilization {
    pub station: StationKind,
    pub utilization_pct: f64,
    pub busy_time: f64,
}

impl StationUtilization {
    pub fn new(station: StationKind, utilization_pct: f64) -> Self {
        Self {
            station,
            utilization_pct,
            busy_time: 0.0,
        }
    }
}

pub fn utilization_of(utilization: &[StationUtilization], station: StationKind) -> f64 {
    utilization
        .iter()
        .find(|entry| entry.station == station)
        .map(|entry| entry.utilization_pct)
        .unwrap_or(0.0)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    pub count: usize,
    pub mean_wait: f64,
    pub max_wait: f64,
    pub min_wait: f64,
    pub std_wait: f64,
    pub mean_system_time: f64,
    pub throughput_per_hour: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WaitPercentiles {
    pub p50: f64,
    pub p95: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StationStats {
    pub station: StationKind,
    pub servers: u32,
    pub mean_wait: f64,
    pub max_wait: f64,
    pub mean_queue_len: f64,
    pub max_queue_len: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub config: SimConfig,
    pub cars: Vec<CarRecord>,
    pub queue_samples: Vec<QueueSample>,
    pub utilization: Vec<StationUtilization>,
    pub kpis: KpiSummary,
    pub wait_percentiles: WaitPercentiles,
    pub station_stats: Vec<StationStats>,
    pub in_flight: usize,
}
