//! Minimizer configuration types.

use crate::types::SolverError;

/// Stopping criteria and step controls for a [`Minimizer`](super::Minimizer).
///
/// The three tolerances are independent; whichever is met first stops the
/// run. A tolerance of zero only stops on exact equality.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::MinimizerConfig;
///
/// let config = MinimizerConfig::default().with_accuracy(1e-3).with_max_iterations(1000);
/// assert_eq!(config.eps_gradient, 1e-3);
/// assert_eq!(config.eps_function, 1e-3);
/// assert_eq!(config.eps_step, 1e-3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MinimizerConfig {
    /// Stop when the gradient norm is at most this value.
    pub eps_gradient: f64,

    /// Stop when `|f_k - f_{k+1}| <= eps_function * max(|f_k|, |f_{k+1}|, 1)`.
    pub eps_function: f64,

    /// Stop when the accepted step length is at most this value.
    pub eps_step: f64,

    /// Iteration budget. Reaching it is reported, not treated as an error.
    pub max_iterations: usize,

    /// Upper bound on the length of a single step. Zero means unbounded.
    pub max_step_size: f64,

    /// Finite-difference step for the numerical gradient.
    pub diff_step: f64,

    /// Number of correction pairs kept by quasi-Newton methods.
    pub history_size: usize,
}

impl Default for MinimizerConfig {
    /// Default values:
    /// - tolerances: `10e-3`
    /// - `max_iterations`: 500
    /// - `max_step_size`: 0.05
    /// - `diff_step`: 1e-6
    /// - `history_size`: 5
    fn default() -> Self {
        Self {
            eps_gradient: 10e-3,
            eps_function: 10e-3,
            eps_step: 10e-3,
            max_iterations: 500,
            max_step_size: 0.05,
            diff_step: 1e-6,
            history_size: 5,
        }
    }
}

impl MinimizerConfig {
    /// Create a configuration using one tolerance for all three tests.
    pub fn new(accuracy: f64, max_iterations: usize) -> Self {
        Self::default()
            .with_accuracy(accuracy)
            .with_max_iterations(max_iterations)
    }

    /// Set gradient, function and step tolerances to the same value.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.eps_gradient = accuracy;
        self.eps_function = accuracy;
        self.eps_step = accuracy;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the step length cap.
    pub fn with_max_step_size(mut self, max_step_size: f64) -> Self {
        self.max_step_size = max_step_size;
        self
    }

    /// Set the finite-difference step.
    pub fn with_diff_step(mut self, diff_step: f64) -> Self {
        self.diff_step = diff_step;
        self
    }

    /// Set the quasi-Newton history length.
    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), SolverError> {
        let non_negative = [
            ("eps_gradient", self.eps_gradient),
            ("eps_function", self.eps_function),
            ("eps_step", self.eps_step),
            ("max_step_size", self.max_step_size),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SolverError::invalid_config(format!(
                    "{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }
        if !(self.diff_step.is_finite() && self.diff_step > 0.0) {
            return Err(SolverError::invalid_config(format!(
                "diff_step must be finite and > 0, got {}",
                self.diff_step
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::invalid_config("max_iterations must be > 0"));
        }
        if self.history_size == 0 {
            return Err(SolverError::invalid_config("history_size must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MinimizerConfig::default();
        assert!((config.eps_gradient - 0.01).abs() < 1e-15);
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.max_step_size, 0.05);
        assert_eq!(config.diff_step, 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_sets_all_tolerances() {
        let config = MinimizerConfig::new(1e-4, 42);
        assert_eq!(config.eps_gradient, 1e-4);
        assert_eq!(config.eps_function, 1e-4);
        assert_eq!(config.eps_step, 1e-4);
        assert_eq!(config.max_iterations, 42);
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let config = MinimizerConfig::default().with_accuracy(-1.0);
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("eps_gradient"));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let config = MinimizerConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_diff_step() {
        assert!(MinimizerConfig::default().with_diff_step(0.0).validate().is_err());
        assert!(MinimizerConfig::default()
            .with_diff_step(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        assert!(MinimizerConfig::default().with_history_size(0).validate().is_err());
    }

    #[test]
    fn test_zero_step_cap_is_unbounded() {
        assert!(MinimizerConfig::default()
            .with_max_step_size(0.0)
            .validate()
            .is_ok());
    }
}
