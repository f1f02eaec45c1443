//! Error types for the calibrator CLI.

use pricer_models::calibration::CalibrationError;
use pricer_models::models::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Market data could not be read
    #[error("Market data error: {0}")]
    MarketData(#[from] csv::Error),

    /// Results could not be serialised
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Calibration failed
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Pricing failed
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Command line argument error
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("spot must be positive");
        assert_eq!(err.to_string(), "Invalid argument: spot must be positive");
    }

    #[test]
    fn test_calibration_error_is_transparent() {
        let err: CliError = CalibrationError::invalid_config("r0 must be finite").into();
        assert_eq!(
            err.to_string(),
            "Invalid calibrator configuration: r0 must be finite"
        );
    }
}
