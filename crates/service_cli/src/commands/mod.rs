//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod calibrate;
pub mod demo;
pub mod price;

use pricer_models::calibration::HestonCalibrator;
use pricer_models::models::HestonParams;

/// Parse `kappa,theta,sigma,rho,v0` into parameters.
pub fn parse_params(s: &str) -> std::result::Result<HestonParams, String> {
    let values = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("'{}': {}", v.trim(), e))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    HestonParams::try_from(values.as_slice())
        .map_err(|_| format!("expected kappa,theta,sigma,rho,v0 (5 values), got {}", values.len()))
}

/// Print parameters as an aligned table.
pub(crate) fn print_params(params: &HestonParams) {
    for (name, value) in HestonParams::NAMES.iter().zip(params.to_array()) {
        println!("  {:<6} = {:>12.6}", name, value);
    }
}

/// Print model vs market prices for every quote held by the calibrator.
pub(crate) fn print_fit(calibrator: &HestonCalibrator) {
    let errors = calibrator.objective().pricing_errors(calibrator.params());

    println!("----------------------------------------------------------");
    println!(
        "{:>8} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "Spot", "Mat", "Strike", "Market", "Model", "Error"
    );
    println!("----------------------------------------------------------");
    for (quote, error) in calibrator.quotes().iter().zip(errors) {
        println!(
            "{:>8.2} {:>8.2} {:>8.2} {:>10.2} {:>10.2} {:>10.2}",
            quote.spot,
            quote.maturity,
            quote.strike,
            quote.mid,
            quote.mid + error,
            error
        );
    }
    println!("----------------------------------------------------------");
}
