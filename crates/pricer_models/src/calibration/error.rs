//! Calibration error types.

use pricer_core::math::solvers::TerminationReason;
use pricer_core::types::SolverError;
use thiserror::Error;

use crate::models::PricingError;

/// Calibration error type.
///
/// Running out of iterations is not an error: the calibrator adopts the
/// best parameters found and reports `MaxIterationsReached`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// The minimizer stopped for a reason other than convergence or the
    /// iteration budget. Previous parameters are kept.
    #[error("Calibration failed: minimizer stopped with {reason} after {iterations} iterations")]
    MinimizerFailure {
        /// Termination reason reported by the minimizer
        reason: TerminationReason,
        /// Iterations completed before stopping
        iterations: usize,
    },

    /// Calibrator configuration is out of range.
    #[error("Invalid calibrator configuration: {0}")]
    InvalidConfig(String),

    /// Pricing engine rejected its inputs.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl CalibrationError {
    /// Create a minimizer failure error.
    pub fn minimizer_failure(reason: TerminationReason, iterations: usize) -> Self {
        CalibrationError::MinimizerFailure { reason, iterations }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        CalibrationError::InvalidConfig(message.into())
    }

    /// Check if the error came from the minimizer rather than from setup.
    pub fn is_minimizer_failure(&self) -> bool {
        matches!(self, CalibrationError::MinimizerFailure { .. })
    }
}

impl From<SolverError> for CalibrationError {
    fn from(err: SolverError) -> Self {
        CalibrationError::InvalidConfig(err.to_string())
    }
}
