//! Calibrate command implementation
//!
//! Reads observed call quotes from CSV, calibrates Heston parameters, and
//! optionally writes the result as JSON.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use pricer_models::calibration::{CalibrationOutcome, HestonCalibrator, MarketQuote};
use pricer_models::models::HestonParams;
use serde::Serialize;
use tracing::{info, warn};

use super::{print_fit, print_params};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Calibration result written to the output file.
#[derive(Debug, Serialize)]
pub struct CalibrationSummary {
    /// Outcome of the run
    pub outcome: CalibrationOutcome,
    /// Parameters held after the run
    pub params: HestonParams,
    /// Sum of squared pricing errors at `params`
    pub pricing_error: f64,
    /// Minimizer iterations
    pub iterations: usize,
    /// Objective evaluations
    pub evaluations: usize,
    /// Risk-free rate used
    pub r0: f64,
}

/// Read quotes with a `spot,maturity,strike,mid` header.
pub fn read_quotes<R: Read>(reader: R) -> Result<Vec<MarketQuote>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let quotes = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<MarketQuote>, csv::Error>>()?;
    Ok(quotes)
}

/// Run the calibrate command
pub fn run(
    config: &CliConfig,
    market_data: &Path,
    guess: Option<HestonParams>,
    output: Option<&Path>,
) -> Result<()> {
    info!("Starting calibration...");
    info!("  Market data: {}", market_data.display());

    if !market_data.exists() {
        return Err(CliError::FileNotFound(market_data.display().to_string()));
    }

    let quotes = read_quotes(File::open(market_data)?)?;
    if quotes.is_empty() {
        warn!("No quotes in {}; calibration is trivial", market_data.display());
    }
    info!("  Quotes: {}", quotes.len());

    let summary = calibrate_quotes(config, &quotes, guess)?;

    if let Some(output_path) = output {
        info!("Writing calibrated parameters to: {}", output_path.display());
        let writer = BufWriter::new(File::create(output_path)?);
        serde_json::to_writer_pretty(writer, &summary)?;
    }

    info!("Calibration complete");
    Ok(())
}

/// Calibrate to `quotes` and print the result.
pub fn calibrate_quotes(
    config: &CliConfig,
    quotes: &[MarketQuote],
    guess: Option<HestonParams>,
) -> Result<CalibrationSummary> {
    let mut calibrator = HestonCalibrator::with_config(config.calibrator_config())?;
    let start = guess.unwrap_or(config.initial_guess);
    calibrator.set_initial_guess(start.kappa, start.theta, start.sigma, start.rho, start.v0);
    for q in quotes {
        calibrator.add_observed_option(q.spot, q.maturity, q.strike, q.mid);
    }

    let outcome = calibrator.calibrate()?;
    let status = calibrator.calibration_status();
    let (iterations, evaluations) = calibrator
        .last_report()
        .map_or((0, 0), |r| (r.iterations, r.evaluations));

    println!();
    println!("Outcome: {}", outcome);
    println!("Pricing error (sum of squares): {:.6}", status.pricing_error);
    println!("Iterations: {}  Evaluations: {}", iterations, evaluations);
    println!("Parameters:");
    print_params(calibrator.params());
    if !quotes.is_empty() {
        print_fit(&calibrator);
    }

    Ok(CalibrationSummary {
        outcome,
        params: *calibrator.params(),
        pricing_error: status.pricing_error,
        iterations,
        evaluations,
        r0: calibrator.config().r0,
    })
}
