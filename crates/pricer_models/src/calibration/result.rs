//! Calibration outcome and diagnostics types.

use std::fmt;
use std::time::Duration;

use pricer_core::math::solvers::TerminationReason;

use crate::models::HestonParams;

/// State of a calibrator after its most recent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalibrationOutcome {
    /// `calibrate` has not been called yet.
    #[default]
    NotStarted,
    /// The minimizer met one of its tolerances.
    Converged,
    /// The iteration budget ran out. Parameters were still adopted.
    MaxIterationsReached,
    /// The minimizer stopped abnormally. Parameters were not adopted.
    Failed,
}

impl CalibrationOutcome {
    /// Map a minimizer termination reason to an outcome.
    pub fn from_termination(reason: TerminationReason) -> Self {
        if reason.is_converged() {
            CalibrationOutcome::Converged
        } else if reason == TerminationReason::MaxIterations {
            CalibrationOutcome::MaxIterationsReached
        } else {
            CalibrationOutcome::Failed
        }
    }

    /// True if a run finished with parameters adopted.
    pub fn is_adopted(&self) -> bool {
        matches!(
            self,
            CalibrationOutcome::Converged | CalibrationOutcome::MaxIterationsReached
        )
    }
}

impl fmt::Display for CalibrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CalibrationOutcome::NotStarted => "not started",
            CalibrationOutcome::Converged => "converged",
            CalibrationOutcome::MaxIterationsReached => "maximum iterations reached",
            CalibrationOutcome::Failed => "failed",
        };
        f.write_str(text)
    }
}

/// Snapshot returned by `HestonCalibrator::calibration_status`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationStatus {
    /// Outcome of the most recent run
    pub outcome: CalibrationOutcome,
    /// Objective value at the current parameters
    pub pricing_error: f64,
}

/// Diagnostics for one calibration run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    /// Outcome assigned to the run
    pub outcome: CalibrationOutcome,
    /// Raw minimizer termination reason
    pub termination: TerminationReason,
    /// Minimizer iterations
    pub iterations: usize,
    /// Objective evaluations, including those for gradients
    pub evaluations: usize,
    /// Objective at the starting parameters
    pub initial_error: f64,
    /// Objective at the parameters held after the run
    pub final_error: f64,
    /// Parameters the minimizer returned, adopted or not
    pub candidate: Vec<f64>,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl CalibrationReport {
    /// Root mean squared pricing error after the run.
    pub fn rmse(&self, quote_count: usize) -> f64 {
        (self.final_error / quote_count.max(1) as f64).sqrt()
    }

    /// Minimizer result as named parameters, if it has the right length.
    pub fn candidate_params(&self) -> Option<HestonParams> {
        HestonParams::try_from(self.candidate.as_slice()).ok()
    }
}
