use crate::models::{SimConfig, StationKind};
use crate::state::{
    CarRecord, KpiSummary, QueueSample, StationStats, StationUtilization, WaitPercentiles,
};

// Estimated from configured means, not measured busy time, which rides along
// in `busy_time`.
pub fn compute_utilization(
    config: &SimConfig,
    completed: usize,
    busy_times: [f64; 3],
) -> Vec<StationUtilization> {
    StationKind::ALL
        .iter()
        .map(|&station| {
            let available = config.duration() * config.servers_for(station) as f64;
            let utilization_pct = if completed == 0 || available <= 0.0 {
                0.0
            } else {
                let demand = completed as f64 * config.service_times.mean_for(station);
                ((demand / available) * 100.0).min(100.0)
            };
            StationUtilization {
                station,
                utilization_pct: round_to(utilization_pct, 2),
                busy_time: round_to(busy_times[station.index()], 2),
            }
        })
        .collect()
}

pub fn compute_kpis(cars: &[CarRecord], duration_minutes: u64) -> KpiSummary {
    if cars.is_empty() {
        return KpiSummary::default();
    }

    let count = cars.len();
    let waits: Vec<f64> = cars.iter().map(|car| car.total_wait).collect();
    let mean_wait = mean(&waits);
    let max_wait = waits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_wait = waits.iter().copied().fold(f64::INFINITY, f64::min);
    let mean_system_time =
        cars.iter().map(|car| car.total_system_time).sum::<f64>() / count as f64;
    let hours = duration_minutes as f64 / 60.0;
    let throughput_per_hour = if hours > 0.0 {
        count as f64 / hours
    } else {
        0.0
    };

    KpiSummary {
        count,
        mean_wait: round_to(mean_wait, 2),
        max_wait: round_to(max_wait, 2),
        min_wait: round_to(min_wait, 2),
        std_wait: round_to(sample_std(&waits, mean_wait), 2),
        mean_system_time: round_to(mean_system_time, 2),
        throughput_per_hour: round_to(throughput_per_hour, 2),
    }
}

pub fn wait_percentiles(cars: &[CarRecord]) -> WaitPercentiles {
    let mut waits: Vec<f64> = cars.iter().map(|car| car.total_wait).collect();
    waits.sort_unstable_by(f64::total_cmp);
    WaitPercentiles {
        p50: round_to(nearest_rank_percentile(&waits, 50.0).unwrap_or(0.0), 2),
        p95: round_to(nearest_rank_percentile(&waits, 95.0).unwrap_or(0.0), 2),
    }
}

pub fn station_stats(
    config: &SimConfig,
    cars: &[CarRecord],
    samples: &[QueueSample],
) -> Vec<StationStats> {
    StationKind::ALL
        .iter()
        .map(|&station| {
            let waits: Vec<f64> = cars.iter().map(|car| car.wait_at(station)).collect();
            let lengths: Vec<f64> = samples
                .iter()
                .map(|sample| sample.queue_at(station) as f64)
                .collect();
            StationStats {
                station,
                servers: config.servers_for(station),
                mean_wait: round_to(mean(&waits), 2),
                max_wait: round_to(waits.iter().copied().fold(0.0, f64::max), 2),
                mean_queue_len: round_to(mean(&lengths), 2),
                max_queue_len: samples
                    .iter()
                    .map(|sample| sample.queue_at(station))
                    .max()
                    .unwrap_or(0),
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq = values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

fn nearest_rank_percentile(sorted: &[f64], percentile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    let idx = rank.saturating_sub(1).min(sorted.len() - 1);
    Some(sorted[idx])
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
