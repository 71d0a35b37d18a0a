//! End-to-end tests for the `bondcalc` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn bondcalc() -> Command {
    let mut cmd = Command::cargo_bin("bondcalc").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn scenario_default_table() {
    bondcalc()
        .arg("scenario")
        .assert()
        .success()
        .stdout(predicate::str::contains("1138.33"))
        .stdout(predicate::str::contains("Base yield = 3.00%"))
        .stdout(predicate::str::contains("+1.0%"));
}

#[test]
fn scenario_json_output() {
    let output = bondcalc()
        .args(["--format", "json", "scenario"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);

    let base = &rows[2];
    assert_eq!(base["shock"], 0.0);
    assert!((base["price"].as_f64().unwrap() - 1138.33).abs() < 0.01);
    assert!(base["error"].is_null());
}

#[test]
fn scenario_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "base_yield = 0.10\nshocks = [0.0]\n\n[bond]\ncoupon_rate = 0.08\nyears_to_maturity = 10.0"
    )
    .unwrap();

    bondcalc()
        .args(["--format", "csv", "scenario", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("shock,yield_rate,price"))
        .stdout(predicate::str::contains("875.3"));
}

#[test]
fn scenario_bad_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "shocks = \"not a list\"").unwrap();

    bondcalc()
        .args(["scenario", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn scenario_failed_shock_keeps_going() {
    bondcalc()
        .args(["scenario", "--base-yield", "0", "--shocks=-200,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("error"))
        .stdout(predicate::str::contains("+1.0%"))
        .stderr(predicate::str::contains("-200.0%"));
}

#[test]
fn scenario_minimal_prints_json_lines() {
    let output = bondcalc()
        .args(["--format", "minimal", "scenario"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    for line in lines {
        let row: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(row["price"].as_f64().is_some());
    }
}

#[test]
fn price_reports_analytics() {
    bondcalc()
        .args([
            "--format", "json", "price", "--coupon", "8", "--maturity", "10", "--yield", "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"price\": 875.3"))
        .stdout(predicate::str::contains("modified_duration"))
        .stdout(predicate::str::contains("estimated_change_up"));
}

#[test]
fn price_with_cash_flows() {
    bondcalc()
        .args([
            "price", "--coupon", "6", "--maturity", "2", "--yield", "3", "--cash-flows",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash Flows"))
        .stdout(predicate::str::contains("1030.00"));
}

#[test]
fn price_survives_failed_shift_comparison() {
    // -99% annual shifted down 100bp lands on a per-period rate of -1.
    bondcalc()
        .args([
            "price", "--coupon", "5", "--maturity", "3", "--frequency", "1", "--yield", "-99",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("n/a"))
        .stderr(predicate::str::contains("cannot reprice"));

    let output = bondcalc()
        .args([
            "--format", "json", "price", "--coupon", "5", "--maturity", "3", "--frequency", "1",
            "--yield", "-99",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["repriced_change_down"].is_null());
    assert!(report["repriced_change_up"].as_f64().is_some());
}

#[test]
fn price_rejects_fractional_periods_by_default() {
    bondcalc()
        .args([
            "price", "--coupon", "5", "--maturity", "2.5", "--frequency", "1", "--yield", "4",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a whole number"));

    bondcalc()
        .args([
            "--period-policy",
            "truncate",
            "price",
            "--coupon",
            "5",
            "--maturity",
            "2.5",
            "--frequency",
            "1",
            "--yield",
            "4",
        ])
        .assert()
        .success();
}

#[test]
fn price_rejects_out_of_range_coupon() {
    bondcalc()
        .args(["price", "--coupon", "150", "--maturity", "5", "--yield", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coupon rate"));
}

#[test]
fn ytm_recovers_yield() {
    for method in ["brent", "bisection"] {
        let output = bondcalc()
            .args([
                "--format", "json", "ytm", "--coupon", "8", "--maturity", "10", "--price",
                "875.38", "--method", method,
            ])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert!((report["yield_rate"].as_f64().unwrap() - 0.10).abs() < 1e-4);
        assert_eq!(report["method"], method);
    }
}

#[test]
fn ytm_rejects_non_positive_price() {
    bondcalc()
        .args(["ytm", "--coupon", "5", "--maturity", "5", "--price", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price"));
}

#[test]
fn ytm_price_outside_bracket() {
    bondcalc()
        .args([
            "ytm", "--coupon", "5", "--maturity", "5", "--price", "1000", "--low", "10", "--high",
            "20",
        ])
        .assert()
        .failure();
}

#[test]
fn verbose_logs_to_stderr() {
    bondcalc()
        .args(["--verbose", "--format", "json", "scenario"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}
