//! Option pricing models.
//!
//! - [`HestonModel`]: semi-analytic European pricing under Heston dynamics
//! - [`HestonParams`]: the five model parameters
//! - [`QuadratureSettings`]: truncation and discretisation of the inversion integral
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{HestonModel, HestonParams};
//!
//! let model = HestonModel::new(0.1, HestonParams::default());
//! let call = model.unrounded_call_price(100.0, 1.0, 100.0).unwrap();
//! assert!(call.is_finite());
//! ```

pub mod error;
pub mod heston;

pub use error::PricingError;
pub use heston::{HestonModel, HestonParams, OptionPrices, QuadratureSettings};
