//! End-to-end tests for the heston-calibrator binary.

use std::fs;
use std::process::{Command, Output};

fn calibrator(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_heston-calibrator"));
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("HESTON_R0")
        .env_remove("HESTON_ACCURACY")
        .env_remove("HESTON_MAX_ITERATIONS")
        .env_remove("HESTON_LOG_LEVEL");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn price_prints_call_and_put() {
    let dir = tempfile::tempdir().unwrap();
    let output = calibrator(&dir)
        .args(["price", "--spot", "100", "--strike", "90", "--maturity", "1"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert!(text.contains("Call:"), "stdout: {}", text);
    assert!(text.contains("Put:"), "stdout: {}", text);
}

#[test]
fn price_rejects_bad_params() {
    let dir = tempfile::tempdir().unwrap();
    let output = calibrator(&dir)
        .args(["price", "--spot", "100", "--strike", "90", "--maturity", "1", "--params", "1,2"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn invalid_config_fails_before_running() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("heston.toml"), "max_iterations = 0\n").unwrap();

    let output = calibrator(&dir)
        .args(["price", "--spot", "100", "--strike", "90", "--maturity", "1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_iterations"));
}

#[test]
fn calibrate_writes_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("quotes.csv"),
        "spot,maturity,strike,mid\n100,1,90,18.93\n100,2,100,19.36\n",
    )
    .unwrap();

    let output = calibrator(&dir)
        .env("HESTON_MAX_ITERATIONS", "5")
        .args([
            "calibrate",
            "--market-data",
            "quotes.csv",
            "--guess",
            "1.5,0.05,0.3,-0.5,0.05",
            "--output",
            "result.json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("result.json")).unwrap())
            .unwrap();
    let outcome = json["outcome"].as_str().unwrap();
    assert!(
        outcome == "Converged" || outcome == "MaxIterationsReached",
        "outcome {}",
        outcome
    );
    assert!(json["params"]["kappa"].is_f64());
    assert!(json["pricing_error"].as_f64().unwrap() >= 0.0);
    assert_eq!(json["r0"].as_f64(), Some(0.1));
}

#[test]
fn calibrate_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = calibrator(&dir)
        .args(["calibrate", "--market-data", "absent.csv"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
}
