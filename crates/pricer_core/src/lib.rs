//! # pricer_core: Numerical Foundation for Heston Calibration
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Composite fixed-rule quadrature (`math::quadrature`)
//! - The minimizer contract and an L-BFGS implementation (`math::solvers`)
//! - Error types: `QuadratureError`, `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derives
//! - tracing: Diagnostics from the minimizer loop
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::quadrature::{CompositeIntegrator, QuadratureRule};
//! use pricer_core::math::solvers::{LbfgsMinimizer, Minimizer, MinimizerConfig};
//!
//! // ∫_0^1 x² dx
//! let integrator = CompositeIntegrator::new(QuadratureRule::GaussLegendre4, 8).unwrap();
//! let area = integrator.integrate(|x: f64| x * x, 0.0, 1.0).unwrap();
//! # assert!((area - 1.0 / 3.0).abs() < 1e-12);
//!
//! // argmin (x - 3)²
//! let config = MinimizerConfig::new(1e-10, 100).with_max_step_size(0.0);
//! let report = LbfgsMinimizer::new().minimize(|p: &[f64]| (p[0] - 3.0).powi(2), &[0.0], &config);
//! # assert!((report.params[0] - 3.0).abs() < 1e-4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for configuration and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
