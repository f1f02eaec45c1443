//! Calibrator configuration.

use pricer_core::math::solvers::MinimizerConfig;

use super::error::CalibrationError;
use crate::models::QuadratureSettings;

/// Configuration for the Heston calibrator.
///
/// # Example
///
/// ```
/// use pricer_models::calibration::CalibratorConfig;
///
/// let config = CalibratorConfig::new(0.1, 1e-3, 1000);
/// assert_eq!(config.minimizer.max_iterations, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibratorConfig {
    /// Constant risk-free rate used for every quote.
    pub r0: f64,
    /// Stopping criteria for the minimizer.
    pub minimizer: MinimizerConfig,
    /// Inversion integral settings for the pricing engine.
    pub quadrature: QuadratureSettings,
}

impl Default for CalibratorConfig {
    /// `r0 = 0.1`, accuracy `10e-3`, 500 iterations, default quadrature.
    fn default() -> Self {
        Self {
            r0: 0.1,
            minimizer: MinimizerConfig::default(),
            quadrature: QuadratureSettings::default(),
        }
    }
}

impl CalibratorConfig {
    /// Create a configuration from a rate, one tolerance for all stopping
    /// tests, and an iteration budget.
    pub fn new(r0: f64, accuracy: f64, max_iterations: usize) -> Self {
        Self {
            r0,
            minimizer: MinimizerConfig::new(accuracy, max_iterations),
            quadrature: QuadratureSettings::default(),
        }
    }

    /// Set the risk-free rate.
    pub fn with_r0(mut self, r0: f64) -> Self {
        self.r0 = r0;
        self
    }

    /// Set the quadrature settings.
    pub fn with_quadrature(mut self, quadrature: QuadratureSettings) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Set the minimizer configuration.
    pub fn with_minimizer(mut self, minimizer: MinimizerConfig) -> Self {
        self.minimizer = minimizer;
        self
    }

    /// Validate every part of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationError::InvalidConfig` for a non-finite rate or an
    /// invalid minimizer config, and `CalibrationError::Pricing` for invalid
    /// quadrature settings.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !self.r0.is_finite() {
            return Err(CalibrationError::invalid_config(format!(
                "r0 must be finite, got {}",
                self.r0
            )));
        }
        self.minimizer.validate()?;
        self.quadrature.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CalibratorConfig::default();
        assert_eq!(config.r0, 0.1);
        assert_eq!(config.minimizer.eps_gradient, 10e-3);
        assert_eq!(config.minimizer.max_iterations, 500);
        assert_eq!(config.minimizer.max_step_size, 0.05);
        assert_eq!(config.quadrature, QuadratureSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_sets_accuracy_everywhere() {
        let config = CalibratorConfig::new(0.05, 1e-4, 42);
        assert_eq!(config.r0, 0.05);
        assert_eq!(config.minimizer.eps_function, 1e-4);
        assert_eq!(config.minimizer.eps_step, 1e-4);
        assert_eq!(config.minimizer.max_iterations, 42);
    }

    #[test]
    fn test_validate_rejects_nan_rate() {
        let config = CalibratorConfig::new(f64::NAN, 1e-3, 10);
        assert!(matches!(config.validate(), Err(CalibrationError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_minimizer() {
        let config = CalibratorConfig::new(0.1, -1.0, 10);
        assert!(matches!(config.validate(), Err(CalibrationError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_quadrature() {
        let config = CalibratorConfig::default().with_quadrature(QuadratureSettings {
            panel_count: 0,
            ..Default::default()
        });
        assert!(matches!(config.validate(), Err(CalibrationError::Pricing(_))));
    }
}
