//! # Pricer Models (L2: Business Logic)
//!
//! Heston stochastic volatility pricing and calibration.
//!
//! This crate provides:
//! - Semi-analytic European call and put pricing under Heston dynamics
//! - A least-squares objective over observed call quotes
//! - A calibration controller driving a pluggable minimizer
//!
//! ## Design Principles
//!
//! - **Named parameters** instead of positional vectors outside the minimizer seam
//! - **Generic minimizer** through `pricer_core::math::solvers::Minimizer`
//! - **Non-finite candidates are scored, not raised**, so the minimizer can step around them

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calibration;
pub mod models;
