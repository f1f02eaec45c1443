//! Pricing engine error types.

use pricer_core::types::QuadratureError;
use thiserror::Error;

/// Errors raised by the Heston pricing engine.
///
/// Divergent integrands are not represented here: a non-finite integral is
/// returned as a non-finite price so the caller can reject the candidate.
///
/// # Examples
///
/// ```
/// use pricer_models::models::PricingError;
///
/// let err = PricingError::InvalidParameterCount { expected: 5, got: 3 };
/// assert!(format!("{}", err).contains("expected 5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Quadrature settings rejected by the integrator.
    #[error("Invalid quadrature: {0}")]
    InvalidQuadrature(#[from] QuadratureError),

    /// Quadrature settings that the integrator accepts but the Fourier
    /// inversion cannot use.
    #[error("Invalid quadrature settings: {0}")]
    InvalidSettings(String),

    /// Parameter vector of the wrong length.
    #[error("Invalid parameter vector: expected {expected} values, got {got}")]
    InvalidParameterCount {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },
}

impl PricingError {
    /// Create an invalid settings error.
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        PricingError::InvalidSettings(message.into())
    }
}
