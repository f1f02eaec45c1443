//! Heston calibration controller.
//!
//! Holds the observed quotes and the current parameter vector, drives a
//! [`Minimizer`] over the least-squares objective, and decides from the
//! minimizer's termination reason whether to adopt the result.

use std::time::Instant;

use pricer_core::math::solvers::{LbfgsMinimizer, Minimizer};
use tracing::{info, warn};

use super::config::CalibratorConfig;
use super::error::CalibrationError;
use super::market::MarketQuote;
use super::objective::CalibrationObjective;
use super::result::{CalibrationOutcome, CalibrationReport, CalibrationStatus};
use crate::models::{HestonModel, HestonParams};

/// Calibrates Heston parameters to observed call prices.
///
/// # Outcome handling
///
/// | Minimizer stop                   | Outcome                | Parameters |
/// |----------------------------------|------------------------|------------|
/// | gradient / function / step tol.  | `Converged`            | adopted    |
/// | iteration budget                 | `MaxIterationsReached` | adopted    |
/// | anything else                    | `Failed`               | kept       |
///
/// Each call to [`calibrate`](Self::calibrate) starts from the parameters
/// currently held, so repeated calls continue from the last adopted result.
///
/// # Example
///
/// ```
/// use pricer_models::calibration::{CalibrationOutcome, HestonCalibrator};
///
/// let mut calibrator = HestonCalibrator::new(0.1, 1e-3, 1000);
/// assert_eq!(calibrator.calibration_status().outcome, CalibrationOutcome::NotStarted);
///
/// // With no quotes the objective is flat and the run converges at once.
/// let outcome = calibrator.calibrate().unwrap();
/// assert_eq!(outcome, CalibrationOutcome::Converged);
/// ```
#[derive(Debug, Clone)]
pub struct HestonCalibrator<M: Minimizer = LbfgsMinimizer> {
    config: CalibratorConfig,
    quotes: Vec<MarketQuote>,
    params: HestonParams,
    outcome: CalibrationOutcome,
    last_report: Option<CalibrationReport>,
    minimizer: M,
}

impl HestonCalibrator<LbfgsMinimizer> {
    /// Create a calibrator using one tolerance for every stopping test.
    ///
    /// Starts from the default parameter guess with no quotes.
    pub fn new(r0: f64, accuracy: f64, max_iterations: usize) -> Self {
        Self::from_parts(
            CalibratorConfig::new(r0, accuracy, max_iterations),
            LbfgsMinimizer::new(),
        )
    }

    /// Create a calibrator from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: CalibratorConfig) -> Result<Self, CalibrationError> {
        config.validate()?;
        Ok(Self::from_parts(config, LbfgsMinimizer::new()))
    }
}

impl Default for HestonCalibrator<LbfgsMinimizer> {
    fn default() -> Self {
        Self::from_parts(CalibratorConfig::default(), LbfgsMinimizer::new())
    }
}

impl<M: Minimizer> HestonCalibrator<M> {
    fn from_parts(config: CalibratorConfig, minimizer: M) -> Self {
        Self {
            config,
            quotes: Vec::new(),
            params: HestonParams::default(),
            outcome: CalibrationOutcome::NotStarted,
            last_report: None,
            minimizer,
        }
    }

    /// Swap the minimizer, keeping quotes, parameters and status.
    pub fn with_minimizer<N: Minimizer>(self, minimizer: N) -> HestonCalibrator<N> {
        HestonCalibrator {
            config: self.config,
            quotes: self.quotes,
            params: self.params,
            outcome: self.outcome,
            last_report: self.last_report,
            minimizer,
        }
    }

    /// Append an observed call quote. No validation is performed.
    pub fn add_observed_option(&mut self, spot: f64, maturity: f64, strike: f64, mid: f64) {
        self.quotes.push(MarketQuote::new(spot, maturity, strike, mid));
    }

    /// Overwrite the starting parameters for the next run.
    pub fn set_initial_guess(&mut self, kappa: f64, theta: f64, sigma: f64, rho: f64, v0: f64) {
        self.params = HestonParams::new(kappa, theta, sigma, rho, v0);
    }

    /// Run the minimizer from the current parameters.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::InvalidConfig` or `CalibrationError::Pricing` if
    ///   the configuration is invalid (outcome becomes `Failed`)
    /// - `CalibrationError::MinimizerFailure` if the minimizer stopped
    ///   abnormally (outcome becomes `Failed`, parameters unchanged)
    pub fn calibrate(&mut self) -> Result<CalibrationOutcome, CalibrationError> {
        if let Err(err) = self.config.validate() {
            self.outcome = CalibrationOutcome::Failed;
            return Err(err);
        }

        let started = Instant::now();
        let initial = self.params.to_array();
        let objective = self.objective();
        let initial_error = objective.mean_square_error(&self.params);

        info!(
            quotes = self.quotes.len(),
            ?initial,
            initial_error,
            max_iterations = self.config.minimizer.max_iterations,
            "Starting Heston calibration"
        );

        let report = self.minimizer.minimize(
            |x: &[f64]| objective.evaluate(x),
            &initial,
            &self.config.minimizer,
        );

        let mut outcome = CalibrationOutcome::from_termination(report.termination);
        let mut failure = None;
        if outcome.is_adopted() {
            match HestonParams::try_from(report.params.as_slice()) {
                Ok(params) => self.params = params,
                Err(err) => {
                    outcome = CalibrationOutcome::Failed;
                    failure = Some(CalibrationError::from(err));
                }
            }
        } else {
            failure = Some(CalibrationError::minimizer_failure(
                report.termination,
                report.iterations,
            ));
        }

        let final_error = self.objective().mean_square_error(&self.params);
        let duration = started.elapsed();
        self.outcome = outcome;
        self.last_report = Some(CalibrationReport {
            outcome,
            termination: report.termination,
            iterations: report.iterations,
            evaluations: report.evaluations,
            initial_error,
            final_error,
            candidate: report.params,
            duration,
        });

        match failure {
            Some(err) => {
                warn!(
                    termination = %report.termination,
                    code = report.termination.code(),
                    iterations = report.iterations,
                    "Heston calibration failed; keeping previous parameters"
                );
                Err(err)
            }
            None => {
                info!(
                    %outcome,
                    params = ?self.params,
                    final_error,
                    iterations = report.iterations,
                    evaluations = report.evaluations,
                    elapsed_ms = duration.as_millis() as u64,
                    "Heston calibration finished"
                );
                if !self.params.within_conventional_ranges() {
                    warn!(
                        params = ?self.params,
                        "Calibrated parameters are outside conventional ranges"
                    );
                }
                Ok(outcome)
            }
        }
    }

    /// Outcome of the last run and the objective at the current parameters.
    pub fn calibration_status(&self) -> CalibrationStatus {
        CalibrationStatus {
            outcome: self.outcome,
            pricing_error: self.objective().mean_square_error(&self.params),
        }
    }

    /// Pricing engine for the current parameters and configured rate.
    pub fn calibrated_model(&self) -> HestonModel {
        let model = HestonModel::new(self.config.r0, self.params);
        // Quadrature is either the default or was validated by `with_config`,
        // so `with_quadrature` cannot fail here.
        model.with_quadrature(self.config.quadrature).unwrap_or(model)
    }

    /// Objective over the current quotes.
    pub fn objective(&self) -> CalibrationObjective<'_> {
        CalibrationObjective::new(&self.quotes, self.config.r0, self.config.quadrature)
    }

    /// Observed quotes in insertion order.
    pub fn quotes(&self) -> &[MarketQuote] {
        &self.quotes
    }

    /// Current parameters.
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Outcome of the last run.
    pub fn outcome(&self) -> CalibrationOutcome {
        self.outcome
    }

    /// Configuration.
    pub fn config(&self) -> &CalibratorConfig {
        &self.config
    }

    /// Diagnostics from the last run, if any.
    pub fn last_report(&self) -> Option<&CalibrationReport> {
        self.last_report.as_ref()
    }
}
