use std::fmt::Write;

use crate::analysis::{identify_bottleneck, insight_for, Headline, ScenarioComparison, Verdict};
use crate::models::{SimConfig, StationKind};
use crate::state::SimulationResult;

pub trait Formatter {
    fn write(&self, result: &SimulationResult) -> String;
    fn write_comparison(&self, comparison: &ScenarioComparison) -> String;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for SummaryFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        write_config(&mut out, &result.config);
        write_kpis(&mut out, result);
        write_utilization(&mut out, result);
        out
    }

    fn write_comparison(&self, comparison: &ScenarioComparison) -> String {
        let mut out = String::new();
        write_scenario_line(&mut out, "Baseline", &comparison.baseline);
        write_scenario_line(&mut out, "Candidate", &comparison.candidate);
        write_comparison_deltas(&mut out, comparison);
        out
    }
}

impl Formatter for HumanFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = SummaryFormatter.write(result);

        out.push_str("Stations:\n");
        for stats in &result.station_stats {
            let _ = writeln!(
                out,
                "{}: servers {} | mean wait {:.2} min | max wait {:.2} min | mean queue {:.2} | max queue {}",
                stats.station,
                stats.servers,
                stats.mean_wait,
                stats.max_wait,
                stats.mean_queue_len,
                stats.max_queue_len
            );
        }

        out.push_str("Cars:\n");
        for car in &result.cars {
            let _ = writeln!(
                out,
                "Car {:03}: arrived {:.2} -> left {:.2} (wait {:.2}/{:.2}/{:.2}, total wait {:.2}, service {:.2}, system {:.2})",
                car.id,
                car.arrival_time,
                car.completion_time,
                car.wait_order,
                car.wait_pay,
                car.wait_pickup,
                car.total_wait,
                car.total_service,
                car.total_system_time
            );
        }

        out.push_str("Insight:\n");
        out.push_str(&insight_for(result));
        out.push('\n');
        out
    }

    fn write_comparison(&self, comparison: &ScenarioComparison) -> String {
        let mut out = String::from("Baseline:\n");
        out.push_str(&SummaryFormatter.write(&comparison.baseline));
        out.push_str("Candidate:\n");
        out.push_str(&SummaryFormatter.write(&comparison.candidate));
        write_comparison_deltas(&mut out, comparison);
        out
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        to_json(result)
    }

    fn write_comparison(&self, comparison: &ScenarioComparison) -> String {
        to_json(comparison)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(err) => format!("{{\"error\": \"{}\"}}\n", err),
    }
}

pub fn write_config(out: &mut String, config: &SimConfig) {
    out.push_str("Configuration:\n");
    let _ = writeln!(out, "arrival_interval: {:.2} min", config.arrival_interval);
    let _ = writeln!(out, "duration: {} min", config.duration_minutes);
    let _ = writeln!(
        out,
        "servers: order={} pay={} pickup={}",
        config.servers_for(StationKind::Order),
        config.pay_servers,
        config.pickup_servers
    );
    let _ = writeln!(
        out,
        "service_times: order={:.2} pay={:.2} pickup={:.2}",
        config.service_times.order, config.service_times.pay, config.service_times.pickup
    );
    match config.seed {
        Some(seed) => {
            let _ = writeln!(out, "seed: {}", seed);
        }
        None => out.push_str("seed: none\n"),
    }
}

fn write_kpis(out: &mut String, result: &SimulationResult) {
    let kpis = &result.kpis;
    out.push_str("KPIs:\n");
    let _ = writeln!(out, "cars_served: {}", kpis.count);
    let _ = writeln!(out, "in_flight: {}", result.in_flight);
    let _ = writeln!(out, "mean_wait: {:.2} min", kpis.mean_wait);
    let _ = writeln!(out, "max_wait: {:.2} min", kpis.max_wait);
    let _ = writeln!(out, "min_wait: {:.2} min", kpis.min_wait);
    let _ = writeln!(out, "std_wait: {:.2} min", kpis.std_wait);
    let _ = writeln!(
        out,
        "wait_p50/p95: {:.2}/{:.2} min",
        result.wait_percentiles.p50, result.wait_percentiles.p95
    );
    let _ = writeln!(out, "mean_system_time: {:.2} min", kpis.mean_system_time);
    let _ = writeln!(out, "throughput: {:.2} cars/hour", kpis.throughput_per_hour);
}

fn write_utilization(out: &mut String, result: &SimulationResult) {
    out.push_str("Utilization:\n");
    for entry in &result.utilization {
        let _ = writeln!(out, "{}: {:.2}%", entry.station, entry.utilization_pct);
    }
    let bottleneck = identify_bottleneck(&result.utilization);
    let _ = writeln!(out, "Bottleneck: {} ({})", bottleneck.name(), bottleneck.status);
}

fn write_scenario_line(out: &mut String, label: &str, result: &SimulationResult) {
    let _ = writeln!(
        out,
        "{}: pay={} pickup={} cars={} mean_wait={:.2} min",
        label,
        result.config.pay_servers,
        result.config.pickup_servers,
        result.kpis.count,
        result.kpis.mean_wait
    );
}

fn write_comparison_deltas(out: &mut String, comparison: &ScenarioComparison) {
    out.push_str("Comparison:\n");
    let _ = writeln!(out, "wait_delta: {:+.2} min", comparison.wait_delta);
    let _ = writeln!(
        out,
        "throughput_delta: {:+.2} cars/hour",
        comparison.throughput_delta
    );
    let _ = writeln!(
        out,
        "peak_utilization_delta: {:+.2}%",
        comparison.peak_utilization_delta
    );
    let _ = writeln!(out, "extra_staff: {:+}", comparison.extra_staff);
    let _ = writeln!(
        out,
        "wait_improvement: {:.2}%",
        comparison.wait_improvement_pct
    );
    let saved = comparison.wait_improvement_pct;
    let headline = match comparison.headline {
        Headline::HighlyEffective => format!(
            "candidate saves {:.1}% of wait time; extra staff is highly effective",
            saved
        ),
        Headline::Moderate => format!(
            "candidate saves {:.1}% of wait time; moderate improvement",
            saved
        ),
        Headline::Ineffective => format!(
            "extra staff is not effective ({:.1}%); the bottleneck may be at another station",
            saved
        ),
    };
    let _ = writeln!(out, "headline: {}", headline);
    let verdict = match comparison.verdict {
        Verdict::Implement => "implement the candidate staffing".to_string(),
        Verdict::Consider => "consider the candidate staffing".to_string(),
        Verdict::NotEffective => format!(
            "extra staff is not effective; the baseline bottleneck is {}",
            comparison.baseline_bottleneck.name()
        ),
    };
    let _ = writeln!(out, "verdict: {}", verdict);
}
