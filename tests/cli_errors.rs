use predicates::str::contains;

#[test]
fn zero_duration_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["run", "--duration", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: duration must be > 0 minutes"));
}

#[test]
fn non_positive_arrival_interval_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["run", "--arrival-interval", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: mean arrival interval must be > 0 (got 0)"));
}

#[test]
fn zero_pay_servers_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["run", "--pay-servers", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: Pay server count must be >= 1 (got 0)"));
}

#[test]
fn zero_candidate_pickup_servers_fail() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["compare", "--candidate-pickup-servers", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: Pickup server count must be >= 1 (got 0)"));
}

#[test]
fn seed_and_unseeded_conflict() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["run", "--seed", "1", "--unseeded"]);
    cmd.assert().failure().stderr(contains("Error:"));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("drive-thru-sim");
    cmd.args(["run", "--config", "/nonexistent/drive-thru.toml"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: failed to read config"));
}
