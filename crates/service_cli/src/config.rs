//! CLI configuration management.
//!
//! Handles loading configuration from a TOML file with environment
//! variable override support.
//!
//! ```toml
//! r0 = 0.1
//! accuracy = 0.001
//! max_iterations = 1000
//! log_level = "info"
//!
//! [initial_guess]
//! kappa = 2.0
//! theta = 0.06
//! sigma = 0.4
//! rho = 0.5
//! v0 = 0.04
//!
//! [quadrature]
//! panel_count = 2000
//! rule = "gauss_legendre4"
//! ```

use std::path::Path;

use pricer_core::math::solvers::MinimizerConfig;
use pricer_models::calibration::CalibratorConfig;
use pricer_models::models::{HestonParams, QuadratureSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Calibrator CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Constant risk-free rate
    pub r0: f64,

    /// Tolerance for the gradient, function and step stopping tests
    pub accuracy: f64,

    /// Minimizer iteration budget
    pub max_iterations: usize,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,

    /// Starting parameters when `--guess` is not given
    pub initial_guess: HestonParams,

    /// Inversion integral settings
    pub quadrature: QuadratureSettings,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            r0: 0.1,
            accuracy: 10e-3,
            max_iterations: 500,
            log_level: "info".to_string(),
            initial_guess: HestonParams::default(),
            quadrature: QuadratureSettings::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Reads `HESTON_R0`, `HESTON_ACCURACY`, `HESTON_MAX_ITERATIONS` and
    /// `HESTON_LOG_LEVEL`.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(r0) = lookup("HESTON_R0") {
            self.r0 = parse_env("HESTON_R0", &r0)?;
        }

        if let Some(accuracy) = lookup("HESTON_ACCURACY") {
            self.accuracy = parse_env("HESTON_ACCURACY", &accuracy)?;
        }

        if let Some(max_iterations) = lookup("HESTON_MAX_ITERATIONS") {
            self.max_iterations = parse_env("HESTON_MAX_ITERATIONS", &max_iterations)?;
        }

        if let Some(log_level) = lookup("HESTON_LOG_LEVEL") {
            self.log_level = log_level;
        }

        Ok(self)
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if !self.r0.is_finite() {
            errors.push(format!("r0 must be finite, got {}", self.r0));
        }

        if !(self.accuracy.is_finite() && self.accuracy >= 0.0) {
            errors.push(format!(
                "accuracy must be finite and >= 0, got {}",
                self.accuracy
            ));
        }

        if self.max_iterations == 0 {
            errors.push("max_iterations must be greater than 0".to_string());
        }

        if let Err(e) = self.quadrature.validate() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Calibrator configuration derived from these settings
    pub fn calibrator_config(&self) -> CalibratorConfig {
        CalibratorConfig::default()
            .with_minimizer(MinimizerConfig::new(self.accuracy, self.max_iterations))
            .with_quadrature(self.quadrature)
            .with_r0(self.r0)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Parse(format!("{}='{}' is not a valid value", name, value)))
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file or environment
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
