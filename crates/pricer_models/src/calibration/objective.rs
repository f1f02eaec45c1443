//! Least-squares calibration objective.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use super::market::MarketQuote;
use crate::models::{HestonModel, HestonParams, PricingError, QuadratureSettings};

/// Sum of squared call pricing errors over a set of quotes.
///
/// [`mean_square_error`](Self::mean_square_error) compares quoted (cent
/// rounded) model prices with the mids and is the figure reported by the
/// calibrator. Rounding makes it piecewise constant in the parameters, so the
/// minimizer drives [`evaluate`](Self::evaluate), which uses unrounded prices.
/// A candidate that prices any quote to a non-finite value, or that the
/// engine rejects, scores `f64::INFINITY` under both.
///
/// # Example
///
/// ```
/// use pricer_models::calibration::{CalibrationObjective, MarketQuote};
/// use pricer_models::models::{HestonParams, QuadratureSettings};
///
/// let quotes = [MarketQuote::new(100.0, 1.0, 90.0, 18.93)];
/// let objective = CalibrationObjective::new(&quotes, 0.1, QuadratureSettings::default());
/// let error = objective.mean_square_error(&HestonParams::default());
/// assert!(error >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CalibrationObjective<'a> {
    quotes: &'a [MarketQuote],
    r0: f64,
    quadrature: QuadratureSettings,
}

type CallPricer = fn(&HestonModel, f64, f64, f64) -> Result<f64, PricingError>;

impl<'a> CalibrationObjective<'a> {
    /// Create an objective over `quotes`.
    pub fn new(quotes: &'a [MarketQuote], r0: f64, quadrature: QuadratureSettings) -> Self {
        Self {
            quotes,
            r0,
            quadrature,
        }
    }

    /// Quotes being fitted, in insertion order.
    pub fn quotes(&self) -> &'a [MarketQuote] {
        self.quotes
    }

    /// Sum of `(call_price - mid)^2` over every quote, with `call_price`
    /// rounded to cents.
    ///
    /// Returns `0.0` for an empty quote set and `f64::INFINITY` for an
    /// invalid candidate.
    pub fn mean_square_error(&self, params: &HestonParams) -> f64 {
        sum_of_squares(&self.pricing_errors(params), params)
    }

    /// Same sum as [`mean_square_error`](Self::mean_square_error) on
    /// unrounded model prices.
    pub fn smooth_square_error(&self, params: &HestonParams) -> f64 {
        sum_of_squares(&self.errors_with(params, HestonModel::unrounded_call_price), params)
    }

    /// Minimizer objective on a raw `[kappa, theta, sigma, rho, v0]` vector.
    ///
    /// Evaluates [`smooth_square_error`](Self::smooth_square_error). A vector
    /// of the wrong length scores `f64::INFINITY`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        match HestonParams::try_from(x) {
            Ok(params) => self.smooth_square_error(&params),
            Err(_) => f64::INFINITY,
        }
    }

    /// Per-quote `call_price - mid`, in insertion order, on rounded prices.
    ///
    /// Entries are NaN where the engine rejected the inputs.
    pub fn pricing_errors(&self, params: &HestonParams) -> Vec<f64> {
        self.errors_with(params, HestonModel::call_price)
    }

    fn errors_with(&self, params: &HestonParams, call: CallPricer) -> Vec<f64> {
        let model = match HestonModel::new(self.r0, *params).with_quadrature(self.quadrature) {
            Ok(model) => model,
            Err(_) => return vec![f64::NAN; self.quotes.len()],
        };
        let error = |quote: &MarketQuote| {
            call(&model, quote.strike, quote.maturity, quote.spot)
                .map_or(f64::NAN, |price| price - quote.mid)
        };

        #[cfg(feature = "parallel")]
        {
            self.quotes.par_iter().map(error).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.quotes.iter().map(error).collect()
        }
    }
}

fn sum_of_squares(errors: &[f64], params: &HestonParams) -> f64 {
    let total: f64 = errors.iter().map(|e| e * e).sum();
    if total.is_finite() {
        total
    } else {
        trace!(?params, "Rejecting candidate with non-finite pricing error");
        f64::INFINITY
    }
}
