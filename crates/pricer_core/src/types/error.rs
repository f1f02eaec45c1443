//! Structured error types for pricer_core operations.
//!
//! This module provides:
//! - `QuadratureError`: Errors from integrator construction and interval validation
//! - `SolverError`: Errors from minimizer configuration validation

use thiserror::Error;

/// Quadrature errors.
///
/// Raised when an integrator is built or invoked with arguments that make
/// the composite rule ill-defined. Non-finite integrand values are *not*
/// reported here: they propagate through the integral unchanged.
///
/// # Examples
/// ```
/// use pricer_core::types::QuadratureError;
///
/// let err = QuadratureError::InvalidBounds { lower: 1.0, upper: 0.0 };
/// assert!(format!("{}", err).contains("lower bound"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuadratureError {
    /// Panel count must be at least one.
    #[error("Invalid panel count {0}: at least one panel is required")]
    InvalidPanelCount(usize),

    /// Bounds are non-finite or not strictly increasing.
    #[error("Invalid integration bounds: need finite lower {lower} < upper {upper}")]
    InvalidBounds {
        /// Lower integration bound
        lower: f64,
        /// Upper integration bound
        upper: f64,
    },
}

/// Minimizer errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::InvalidConfig("max_iterations must be > 0".to_string());
/// assert!(format!("{}", err).contains("max_iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Configuration values are out of range.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// Starting point has no coordinates.
    #[error("Empty parameter vector")]
    EmptyParameters,
}

impl SolverError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SolverError::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrature_error_display() {
        let err = QuadratureError::InvalidPanelCount(0);
        assert_eq!(
            format!("{}", err),
            "Invalid panel count 0: at least one panel is required"
        );

        let err = QuadratureError::InvalidBounds {
            lower: 2.0,
            upper: 1.0,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("2"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::invalid_config("eps_step must be >= 0");
        assert!(format!("{}", err).contains("eps_step"));
        assert_eq!(format!("{}", SolverError::EmptyParameters), "Empty parameter vector");
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&QuadratureError::InvalidPanelCount(0));
        assert_error(&SolverError::EmptyParameters);
    }
}
