use predicates::prelude::*;
use predicates::str::{contains, diff};

#[test]
fn summary_for_run_without_arrivals_is_stable() {
    let expected = concat!(
        "Configuration:\n",
        "arrival_interval: 100000.00 min\n",
        "duration: 1 min\n",
        "servers: order=1 pay=1 pickup=1\n",
        "service_times: order=1.50 pay=1.00 pickup=2.00\n",
        "seed: 42\n",
        "KPIs:\n",
        "cars_served: 0\n",
        "in_flight: 0\n",
        "mean_wait: 0.00 min\n",
        "max_wait: 0.00 min\n",
        "min_wait: 0.00 min\n",
        "std_wait: 0.00 min\n",
        "wait_p50/p95: 0.00/0.00 min\n",
        "mean_system_time: 0.00 min\n",
        "throughput: 0.00 cars/hour\n",
        "Utilization:\n",
        "Order: 0.00%\n",
        "Pay: 0.00%\n",
        "Pickup: 0.00%\n",
        "Bottleneck: Order (STABLE - Running Well)\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args([
        "run",
        "--arrival-interval",
        "100000",
        "--duration",
        "1",
        "--format",
        "summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn seeded_runs_are_repeatable() {
    let args = [
        "run",
        "--arrival-interval",
        "2.0",
        "--duration",
        "240",
        "--seed",
        "42",
        "--format",
        "json",
    ];

    let mut first = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    let first = first.args(args).assert().success().get_output().stdout.clone();
    let mut second = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    let second = second.args(args).assert().success().get_output().stdout.clone();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn human_output_has_every_section() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["run", "--duration", "120"]);
    cmd.assert()
        .success()
        .stdout(contains("Configuration:\n"))
        .stdout(contains("KPIs:\n"))
        .stdout(contains("Utilization:\n"))
        .stdout(contains("Bottleneck: "))
        .stdout(contains("Stations:\n"))
        .stdout(contains("Cars:\nCar 001: arrived "))
        .stdout(contains("Insight:\n**System Status: "));
}

#[test]
fn json_output_has_result_tables() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["run", "--duration", "60", "--format", "json"]);
    cmd.assert()
        .success()
        .stdout(contains("\"cars\""))
        .stdout(contains("\"queue_samples\""))
        .stdout(contains("\"utilization\""))
        .stdout(contains("\"throughput_per_hour\""));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["--verbose", "run", "--duration", "30", "--format", "summary"]);
    cmd.assert()
        .success()
        .stdout(contains("simulation finished").not())
        .stderr(contains("simulation finished"));
}
