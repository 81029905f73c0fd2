use serde::Serialize;
use std::fmt;

use crate::engine::run_simulation;
use crate::error::Result;
use crate::models::{SimConfig, StationKind};
use crate::state::{utilization_of, KpiSummary, SimulationResult, StationUtilization};

pub const UNKNOWN_STATION: &str = "Unknown";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum SystemStatus {
    Critical,
    Warning,
    Busy,
    Stable,
    NoData,
}

impl SystemStatus {
    pub fn from_utilization(pct: f64) -> Self {
        if pct >= 95.0 {
            SystemStatus::Critical
        } else if pct >= 85.0 {
            SystemStatus::Warning
        } else if pct >= 70.0 {
            SystemStatus::Busy
        } else {
            SystemStatus::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SystemStatus::Critical => "CRITICAL - Overload",
            SystemStatus::Warning => "WARNING - Near Capacity",
            SystemStatus::Busy => "BUSY - Needs Attention",
            SystemStatus::Stable => "STABLE - Running Well",
            SystemStatus::NoData => "No data available",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bottleneck {
    pub station: Option<StationKind>,
    pub utilization_pct: f64,
    pub status: SystemStatus,
}

impl Bottleneck {
    pub fn name(&self) -> &'static str {
        self.station.map(StationKind::name).unwrap_or(UNKNOWN_STATION)
    }

    pub fn as_pair(&self) -> (&'static str, &'static str) {
        (self.name(), self.status.label())
    }
}

// Ties go to the station listed first.
pub fn identify_bottleneck(utilization: &[StationUtilization]) -> Bottleneck {
    let mut best: Option<&StationUtilization> = None;
    for entry in utilization {
        let higher = best.map_or(true, |current| entry.utilization_pct > current.utilization_pct);
        if higher {
            best = Some(entry);
        }
    }

    match best {
        Some(entry) => Bottleneck {
            station: Some(entry.station),
            utilization_pct: entry.utilization_pct,
            status: SystemStatus::from_utilization(entry.utilization_pct),
        },
        None => Bottleneck {
            station: None,
            utilization_pct: 0.0,
            status: SystemStatus::NoData,
        },
    }
}

pub fn generate_insight(
    kpis: &KpiSummary,
    utilization: &[StationUtilization],
    pay_servers: u32,
    pickup_servers: u32,
) -> String {
    if kpis.count == 0 {
        return "No data to analyze. Run the simulation first.".to_string();
    }

    let bottleneck = identify_bottleneck(utilization);
    let mut parts = Vec::new();

    parts.push(match bottleneck.status {
        SystemStatus::Critical => format!(
            "**System Status: {}**\n\nWith {} cashier(s) and {} pickup staff, the system is severely congested.",
            bottleneck.status, pay_servers, pickup_servers
        ),
        SystemStatus::Warning => format!(
            "**System Status: {}**\n\nThe system is operating near maximum capacity. Consider adding resources.",
            bottleneck.status
        ),
        _ => format!(
            "**System Status: {}**\n\nThe system is running well with the current configuration.",
            bottleneck.status
        ),
    });

    parts.push(format!(
        "\n\n**Main Bottleneck:** Station **{}** (Utilization: {:.1}%)",
        bottleneck.name(),
        bottleneck.utilization_pct
    ));

    let mean_wait = kpis.mean_wait;
    parts.push(if mean_wait > 10.0 {
        format!(
            "\n\n**Wait Time:** Average {:.1} minutes - **TOO LONG!** Customers may leave the queue.",
            mean_wait
        )
    } else if mean_wait > 5.0 {
        format!(
            "\n\n**Wait Time:** Average {:.1} minutes - needs improvement for customer satisfaction.",
            mean_wait
        )
    } else {
        format!(
            "\n\n**Wait Time:** Average {:.1} minutes - very good! Customers barely wait.",
            mean_wait
        )
    });

    parts.push(format!(
        "\n\n**Throughput:** {:.0} cars/hour served.",
        kpis.throughput_per_hour
    ));

    let recommendations = recommendations(utilization, pay_servers, pickup_servers);
    if !recommendations.is_empty() {
        parts.push(format!(
            "\n\n**Recommendations:**\n{}",
            recommendations.join("\n")
        ));
    }

    parts.concat()
}

fn recommendations(
    utilization: &[StationUtilization],
    pay_servers: u32,
    pickup_servers: u32,
) -> Vec<&'static str> {
    let mut items = Vec::new();
    if utilization_of(utilization, StationKind::Pay) > 85.0 && pay_servers < 3 {
        items.push("- Add 1 cashier to relieve congestion at the pay window");
    }
    if utilization_of(utilization, StationKind::Pickup) > 85.0 && pickup_servers < 3 {
        items.push("- Add 1 pickup staff member to speed up handover");
    }
    if utilization_of(utilization, StationKind::Order) > 90.0 {
        items.push("- Consider app-based pre-ordering");
    }
    items
}

pub fn insight_for(result: &SimulationResult) -> String {
    generate_insight(
        &result.kpis,
        &result.utilization,
        result.config.pay_servers,
        result.config.pickup_servers,
    )
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Verdict {
    Implement,
    Consider,
    NotEffective,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Headline {
    HighlyEffective,
    Moderate,
    Ineffective,
}

impl Headline {
    pub fn from_improvement(pct: f64) -> Self {
        if pct > 10.0 {
            Headline::HighlyEffective
        } else if pct > 0.0 {
            Headline::Moderate
        } else {
            Headline::Ineffective
        }
    }
}

impl Verdict {
    pub fn from_improvement(pct: f64) -> Self {
        if pct > 15.0 {
            Verdict::Implement
        } else if pct > 5.0 {
            Verdict::Consider
        } else {
            Verdict::NotEffective
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioComparison {
    pub baseline: SimulationResult,
    pub candidate: SimulationResult,
    pub wait_delta: f64,
    pub throughput_delta: f64,
    pub peak_utilization_delta: f64,
    pub extra_staff: i64,
    pub wait_improvement_pct: f64,
    pub headline: Headline,
    pub verdict: Verdict,
    pub baseline_bottleneck: Bottleneck,
}

pub fn compare_scenarios(
    baseline: &SimConfig,
    candidate: &SimConfig,
) -> Result<ScenarioComparison> {
    let baseline = run_simulation(baseline)?;
    let candidate = run_simulation(candidate)?;
    Ok(compare_results(baseline, candidate))
}

pub fn compare_results(
    baseline: SimulationResult,
    candidate: SimulationResult,
) -> ScenarioComparison {
    let base_wait = baseline.kpis.mean_wait;
    let wait_improvement_pct = if base_wait > 0.0 {
        (base_wait - candidate.kpis.mean_wait) * 100.0 / base_wait
    } else {
        0.0
    };
    let staff = |result: &SimulationResult| {
        i64::from(result.config.pay_servers) + i64::from(result.config.pickup_servers)
    };

    ScenarioComparison {
        wait_delta: candidate.kpis.mean_wait - base_wait,
        throughput_delta: candidate.kpis.throughput_per_hour - baseline.kpis.throughput_per_hour,
        peak_utilization_delta: peak_utilization(&candidate.utilization)
            - peak_utilization(&baseline.utilization),
        extra_staff: staff(&candidate) - staff(&baseline),
        wait_improvement_pct,
        headline: Headline::from_improvement(wait_improvement_pct),
        verdict: Verdict::from_improvement(wait_improvement_pct),
        baseline_bottleneck: identify_bottleneck(&baseline.utilization),
        baseline,
        candidate,
    }
}

fn peak_utilization(utilization: &[StationUtilization]) -> f64 {
    utilization
        .iter()
        .map(|entry| entry.utilization_pct)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WaitPercentiles;

    fn utilization(order: f64, pay: f64, pickup: f64) -> Vec<StationUtilization> {
        vec![
            StationUtilization::new(StationKind::Order, order),
            StationUtilization::new(StationKind::Pay, pay),
            StationUtilization::new(StationKind::Pickup, pickup),
        ]
    }

    fn kpis(count: usize, mean_wait: f64, throughput: f64) -> KpiSummary {
        KpiSummary {
            count,
            mean_wait,
            throughput_per_hour: throughput,
            ..KpiSummary::default()
        }
    }

    #[test]
    fn bottleneck_is_most_utilized_station() {
        let bottleneck = identify_bottleneck(&utilization(96.0, 50.0, 40.0));
        assert_eq!(bottleneck.as_pair(), ("Order", "CRITICAL - Overload"));
        assert_eq!(bottleneck.status, SystemStatus::Critical);
        assert!(bottleneck.status.label().contains("CRITICAL"));
        assert!(bottleneck.status.label().contains("Overload"));
    }

    #[test]
    fn bottleneck_status_thresholds() {
        let status = |pct| identify_bottleneck(&utilization(0.0, pct, 0.0)).status;
        assert_eq!(status(95.0), SystemStatus::Critical);
        assert_eq!(status(94.99), SystemStatus::Warning);
        assert_eq!(status(85.0), SystemStatus::Warning);
        assert_eq!(status(70.0), SystemStatus::Busy);
        assert_eq!(status(69.9), SystemStatus::Stable);
    }

    #[test]
    fn bottleneck_ties_go_to_first_station() {
        let bottleneck = identify_bottleneck(&utilization(80.0, 80.0, 80.0));
        assert_eq!(bottleneck.station, Some(StationKind::Order));
        let bottleneck = identify_bottleneck(&utilization(10.0, 80.0, 80.0));
        assert_eq!(bottleneck.station, Some(StationKind::Pay));
    }

    #[test]
    fn bottleneck_of_nothing_is_unknown() {
        let bottleneck = identify_bottleneck(&[]);
        assert_eq!(bottleneck.name(), "Unknown");
        assert_eq!(bottleneck.status.label(), "No data available");
    }

    #[test]
    fn insight_without_cars_asks_for_a_run() {
        let text = generate_insight(&KpiSummary::default(), &utilization(0.0, 0.0, 0.0), 1, 1);
        assert_eq!(text, "No data to analyze. Run the simulation first.");
    }

    #[test]
    fn insight_for_critical_pay_recommends_cashier() {
        let text = generate_insight(&kpis(100, 12.3, 25.0), &utilization(60.0, 97.0, 50.0), 1, 1);
        assert!(text.starts_with("**System Status: CRITICAL - Overload**"));
        assert!(text.contains("With 1 cashier(s) and 1 pickup staff"));
        assert!(text.contains("Station **Pay** (Utilization: 97.0%)"));
        assert!(text.contains("Average 12.3 minutes - **TOO LONG!**"));
        assert!(text.contains("**Throughput:** 25 cars/hour served."));
        assert!(text.contains("- Add 1 cashier"));
        assert!(!text.contains("pickup staff member"));
        assert!(!text.contains("pre-ordering"));
    }

    #[test]
    fn insight_for_stable_system_has_no_recommendations() {
        let text = generate_insight(&kpis(50, 2.0, 12.4), &utilization(40.0, 30.0, 50.0), 1, 1);
        assert!(text.contains("STABLE - Running Well"));
        assert!(text.contains("running well with the current configuration"));
        assert!(text.contains("very good!"));
        assert!(text.contains("**Throughput:** 12 cars/hour"));
        assert!(!text.contains("Recommendations"));
    }

    #[test]
    fn insight_wait_thresholds() {
        let util = utilization(40.0, 30.0, 50.0);
        assert!(generate_insight(&kpis(5, 10.0, 1.0), &util, 1, 1).contains("needs improvement"));
        assert!(generate_insight(&kpis(5, 5.0, 1.0), &util, 1, 1).contains("very good!"));
        assert!(generate_insight(&kpis(5, 10.01, 1.0), &util, 1, 1).contains("TOO LONG"));
    }

    #[test]
    fn recommendations_respect_staffing_limits() {
        let util = utilization(95.0, 90.0, 90.0);
        let text = generate_insight(&kpis(10, 1.0, 1.0), &util, 3, 2);
        assert!(text.contains("WARNING") || text.contains("CRITICAL"));
        assert!(!text.contains("Add 1 cashier"));
        assert!(text.contains("Add 1 pickup staff member"));
        assert!(text.contains("pre-ordering"));
    }

    fn scenario(pay: u32, mean_wait: f64, throughput: f64, util: [f64; 3]) -> SimulationResult {
        SimulationResult {
            config: SimConfig::new(2.0, 120, pay, 1).unwrap(),
            cars: Vec::new(),
            queue_samples: Vec::new(),
            utilization: utilization(util[0], util[1], util[2]),
            kpis: kpis(40, mean_wait, throughput),
            wait_percentiles: WaitPercentiles::default(),
            station_stats: Vec::new(),
            in_flight: 0,
        }
    }

    fn compare_waits(base_wait: f64, candidate_wait: f64) -> ScenarioComparison {
        compare_results(
            scenario(1, base_wait, 20.0, [60.0, 90.0, 80.0]),
            scenario(2, candidate_wait, 20.0, [60.0, 50.0, 80.0]),
        )
    }

    #[test]
    fn comparison_reports_exact_deltas() {
        let comparison = compare_results(
            scenario(1, 10.0, 30.0, [60.0, 90.0, 80.0]),
            scenario(2, 8.5, 28.5, [60.0, 75.0, 80.0]),
        );
        assert_eq!(comparison.wait_delta, -1.5);
        assert_eq!(comparison.throughput_delta, -1.5);
        assert_eq!(comparison.peak_utilization_delta, -10.0);
        assert_eq!(comparison.extra_staff, 1);
        assert_eq!(comparison.wait_improvement_pct, 15.0);
        assert_eq!(comparison.baseline_bottleneck.station, Some(StationKind::Pay));
    }

    #[test]
    fn comparison_verdict_tiers_are_strict() {
        let cases = [
            (7.0, Verdict::Implement, Headline::HighlyEffective),
            (8.5, Verdict::Consider, Headline::HighlyEffective),
            (9.0, Verdict::Consider, Headline::Moderate),
            (9.5, Verdict::NotEffective, Headline::Moderate),
            (10.0, Verdict::NotEffective, Headline::Ineffective),
            (12.0, Verdict::NotEffective, Headline::Ineffective),
        ];
        for (candidate_wait, verdict, headline) in cases {
            let comparison = compare_waits(10.0, candidate_wait);
            assert_eq!(comparison.verdict, verdict, "candidate wait {}", candidate_wait);
            assert_eq!(comparison.headline, headline, "candidate wait {}", candidate_wait);
        }
        assert_eq!(compare_waits(10.0, 8.5).wait_improvement_pct, 15.0);
        assert_eq!(compare_waits(10.0, 9.0).wait_improvement_pct, 10.0);
        assert_eq!(compare_waits(10.0, 9.5).wait_improvement_pct, 5.0);
    }

    #[test]
    fn comparison_against_zero_baseline_wait_is_not_effective() {
        let comparison = compare_waits(0.0, 0.0);
        assert_eq!(comparison.wait_improvement_pct, 0.0);
        assert_eq!(comparison.verdict, Verdict::NotEffective);
        assert_eq!(comparison.headline, Headline::Ineffective);
    }

    #[test]
    fn identical_scenarios_compare_as_not_effective() {
        let base = SimConfig::new(2.0, 240, 1, 1).unwrap();
        let comparison = compare_scenarios(&base, &base).expect("runs should succeed");
        assert_eq!(comparison.wait_improvement_pct, 0.0);
        assert_eq!(comparison.wait_delta, 0.0);
        assert_eq!(comparison.verdict, Verdict::NotEffective);
        assert_eq!(comparison.extra_staff, 0);
    }

    #[test]
    fn comparison_counts_extra_staff() {
        let base = SimConfig::new(2.0, 120, 1, 1).unwrap();
        let candidate = SimConfig::new(2.0, 120, 2, 2).unwrap();
        let comparison = compare_scenarios(&base, &candidate).expect("runs should succeed");
        assert_eq!(comparison.extra_staff, 2);
        assert!(comparison.wait_delta <= 0.0);
    }
}
