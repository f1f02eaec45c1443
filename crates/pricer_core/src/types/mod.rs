//! Core error types.
//!
//! - `error`: Structured error types for quadrature and solver operations
//!
//! # Re-exports
//!
//! [`QuadratureError`] and [`SolverError`] are re-exported at this module level.

pub mod error;

pub use error::{QuadratureError, SolverError};
