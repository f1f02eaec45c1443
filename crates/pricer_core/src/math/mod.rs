//! Numerical building blocks.
//!
//! - [`quadrature`]: composite fixed-rule integration
//! - [`solvers`]: minimizer contract and L-BFGS

pub mod quadrature;
pub mod solvers;
