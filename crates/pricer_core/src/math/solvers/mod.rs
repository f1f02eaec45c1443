//! Unconstrained minimizers for model calibration.
//!
//! ## Contract
//!
//! - [`Minimizer`]: objective `Fn(&[f64]) -> f64`, starting point and
//!   [`MinimizerConfig`] in; [`MinimizerReport`] out. The report carries a
//!   [`TerminationReason`] that callers map onto their own outcome types.
//!
//! ## Available Minimizers
//!
//! - [`LbfgsMinimizer`]: limited-memory BFGS with a finite-difference gradient
//!   and a step length cap
//!
//! ## Configuration
//!
//! [`MinimizerConfig`] holds:
//! - `eps_gradient`, `eps_function`, `eps_step`: stopping tolerances
//! - `max_iterations`: iteration budget
//! - `max_step_size`: step length cap
//! - `diff_step`: finite-difference step
//! - `history_size`: number of stored correction pairs
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{LbfgsMinimizer, Minimizer, MinimizerConfig, TerminationReason};
//!
//! let config = MinimizerConfig::new(1e-10, 100).with_max_step_size(0.0);
//! let report = LbfgsMinimizer::new().minimize(|p: &[f64]| (p[0] - 1.5).powi(2), &[0.0], &config);
//!
//! assert_ne!(report.termination, TerminationReason::MaxIterations);
//! assert!((report.params[0] - 1.5).abs() < 1e-4);
//! ```

mod config;
mod lbfgs;
mod minimizer;

pub use config::MinimizerConfig;
pub use lbfgs::LbfgsMinimizer;
pub use minimizer::{Minimizer, MinimizerReport, TerminationReason};
