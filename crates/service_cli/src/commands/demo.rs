//! Demo command: calibration to a fixed five-quote surface.
//!
//! Uses `r0 = 0.1`, tolerance `1e-3` and 1000 iterations, starting from the
//! default parameter guess. Quadrature settings come from the configuration.

use pricer_core::math::solvers::MinimizerConfig;
use pricer_models::calibration::{CalibratorConfig, HestonCalibrator};
use tracing::info;

use super::{print_fit, print_params};
use crate::config::CliConfig;
use crate::Result;

/// `(spot, maturity, strike, mid)`
pub const DEMO_SURFACE: [(f64, f64, f64, f64); 5] = [
    (100.0, 1.0, 80.0, 25.72),
    (100.0, 1.0, 90.0, 18.93),
    (100.0, 2.0, 80.0, 30.49),
    (100.0, 2.0, 100.0, 19.36),
    (100.0, 1.5, 100.0, 16.58),
];

/// Run the demo
pub fn run(config: &CliConfig) -> Result<()> {
    println!("========================================");
    println!("Heston Calibration Demo");
    println!("========================================");
    println!();

    let calibrator_config = CalibratorConfig::default()
        .with_r0(0.1)
        .with_minimizer(MinimizerConfig::new(1e-3, 1000))
        .with_quadrature(config.quadrature);
    let mut calibrator = HestonCalibrator::with_config(calibrator_config)?;
    for (spot, maturity, strike, mid) in DEMO_SURFACE {
        calibrator.add_observed_option(spot, maturity, strike, mid);
    }

    let seed = calibrator.calibration_status();
    println!("[Demo] Starting parameters:");
    print_params(calibrator.params());
    println!("[Demo] Pricing error at start: {:.6}", seed.pricing_error);
    println!();

    info!("Running demo calibration");
    let outcome = calibrator.calibrate()?;
    let status = calibrator.calibration_status();

    println!("[Demo] Outcome: {}", outcome);
    println!("[Demo] Calibrated parameters:");
    print_params(calibrator.params());
    println!("[Demo] Pricing error: {:.6}", status.pricing_error);
    if let Some(report) = calibrator.last_report() {
        println!(
            "[Demo] {} iterations, {} evaluations, {:.2?}",
            report.iterations, report.evaluations, report.duration
        );
    }
    println!();
    print_fit(&calibrator);

    let model = calibrator.calibrated_model();
    println!();
    println!("[Demo] Rounded prices under the calibrated model:");
    println!("{:>8} {:>8} {:>8} {:>10}", "Mat", "Strike", "Call", "Put");
    for (spot, maturity, strike, _) in DEMO_SURFACE {
        let prices = model.price(strike, maturity, spot)?;
        println!(
            "{:>8.2} {:>8.2} {:>8.2} {:>10.2}",
            maturity, strike, prices.call, prices.put
        );
    }

    Ok(())
}
