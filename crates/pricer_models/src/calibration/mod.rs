//! Heston model calibration.
//!
//! - [`HestonCalibrator`]: holds quotes and parameters, drives the minimizer
//! - [`CalibrationObjective`]: sum of squared call pricing errors
//! - [`MarketQuote`]: one observed call mid price
//! - [`CalibratorConfig`]: rate, stopping criteria and quadrature settings
//! - [`CalibrationOutcome`], [`CalibrationStatus`], [`CalibrationReport`]: results
//! - [`CalibrationError`]: failures
//!
//! # Architecture
//!
//! ```text
//! MarketQuote[] ──> CalibrationObjective ──> Minimizer ──> TerminationReason
//!                         │                                      │
//!                         ▼                                      ▼
//!                    HestonModel                        CalibrationOutcome
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pricer_models::calibration::HestonCalibrator;
//!
//! let mut calibrator = HestonCalibrator::new(0.1, 1e-3, 1000);
//! calibrator.add_observed_option(100.0, 1.0, 80.0, 25.72);
//! calibrator.add_observed_option(100.0, 1.0, 90.0, 18.93);
//! calibrator.add_observed_option(100.0, 2.0, 80.0, 30.49);
//! calibrator.add_observed_option(100.0, 2.0, 100.0, 19.36);
//! calibrator.add_observed_option(100.0, 1.5, 100.0, 16.58);
//!
//! match calibrator.calibrate() {
//!     Ok(outcome) => println!("{}: {:?}", outcome, calibrator.params()),
//!     Err(err) => eprintln!("{}", err),
//! }
//! ```

mod calibrator;
mod config;
mod error;
mod market;
mod objective;
mod result;

pub use calibrator::HestonCalibrator;
pub use config::CalibratorConfig;
pub use error::CalibrationError;
pub use market::MarketQuote;
pub use objective::CalibrationObjective;
pub use result::{CalibrationOutcome, CalibrationReport, CalibrationStatus};
