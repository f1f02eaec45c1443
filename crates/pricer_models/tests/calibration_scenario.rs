//! End-to-end calibration against the reference five-quote surface.

use pricer_models::calibration::{CalibrationOutcome, HestonCalibrator, MarketQuote};
use pricer_models::models::{HestonModel, HestonParams};

/// `(spot, maturity, strike, mid)`
const SURFACE: [(f64, f64, f64, f64); 5] = [
    (100.0, 1.0, 80.0, 25.72),
    (100.0, 1.0, 90.0, 18.93),
    (100.0, 2.0, 80.0, 30.49),
    (100.0, 2.0, 100.0, 19.36),
    (100.0, 1.5, 100.0, 16.58),
];

fn reference_calibrator() -> HestonCalibrator {
    let mut calibrator = HestonCalibrator::new(0.1, 1e-3, 1000);
    calibrator.set_initial_guess(2.0, 0.06, 0.4, 0.5, 0.04);
    for (spot, maturity, strike, mid) in SURFACE {
        calibrator.add_observed_option(spot, maturity, strike, mid);
    }
    calibrator
}

#[test]
fn reference_surface_calibrates_without_failure() {
    let mut calibrator = reference_calibrator();
    let seed_error = calibrator.calibration_status().pricing_error;
    assert!(seed_error.is_finite() && seed_error > 0.0);

    let outcome = calibrator.calibrate().expect("calibration should not fail");
    assert!(
        matches!(
            outcome,
            CalibrationOutcome::Converged | CalibrationOutcome::MaxIterationsReached
        ),
        "unexpected outcome {:?}",
        outcome
    );

    let status = calibrator.calibration_status();
    assert_eq!(status.outcome, outcome);
    assert!(
        status.pricing_error < 0.5 * seed_error,
        "seed error {}, calibrated error {}",
        seed_error,
        status.pricing_error
    );

    let report = calibrator.last_report().expect("report after calibrate");
    assert_eq!(report.initial_error, seed_error);
    assert_eq!(report.final_error, status.pricing_error);
    assert!(report.iterations <= 1000);
    assert!(report.evaluations > report.iterations);
}

#[test]
fn calibrated_model_reprices_the_surface() {
    let mut calibrator = reference_calibrator();
    calibrator.calibrate().expect("calibration should not fail");

    let model = calibrator.calibrated_model();
    let errors = calibrator.objective().pricing_errors(calibrator.params());
    for (quote, error) in calibrator.quotes().iter().zip(&errors) {
        let call = model.call_price(quote.strike, quote.maturity, quote.spot).unwrap();
        assert!((call - quote.mid - error).abs() < 1e-12);
    }
}

#[test]
fn status_is_idempotent_between_runs() {
    let mut calibrator = reference_calibrator();
    assert_eq!(calibrator.calibration_status(), calibrator.calibration_status());

    calibrator.calibrate().expect("calibration should not fail");
    assert_eq!(calibrator.calibration_status(), calibrator.calibration_status());
}

#[test]
fn adding_a_quote_does_not_change_reported_outcome() {
    let mut calibrator = HestonCalibrator::new(0.1, 1e-3, 1000);
    assert_eq!(calibrator.calibrate(), Ok(CalibrationOutcome::Converged));

    calibrator.add_observed_option(100.0, 1.0, 80.0, 25.72);
    let status = calibrator.calibration_status();
    assert_eq!(status.outcome, CalibrationOutcome::Converged);
    assert!(status.pricing_error > 0.0);
}

#[test]
fn synthetic_surface_error_drops() {
    let truth = HestonParams::new(1.5, 0.05, 0.3, -0.5, 0.05);
    let model = HestonModel::new(0.05, truth);
    let quotes: Vec<MarketQuote> = [(90.0, 1.0), (100.0, 1.0), (110.0, 1.0), (100.0, 2.0)]
        .iter()
        .map(|&(strike, maturity)| {
            let mid = model.unrounded_call_price(strike, maturity, 100.0).unwrap();
            MarketQuote::new(100.0, maturity, strike, mid)
        })
        .collect();

    let mut calibrator = HestonCalibrator::new(0.05, 1e-10, 100);
    for q in &quotes {
        calibrator.add_observed_option(q.spot, q.maturity, q.strike, q.mid);
    }
    let before = calibrator.calibration_status().pricing_error;
    let outcome = calibrator.calibrate().expect("calibration should not fail");
    assert!(outcome.is_adopted());

    let after = calibrator.calibration_status().pricing_error;
    assert!(after < 0.5 * before, "before {}, after {}", before, after);
}
