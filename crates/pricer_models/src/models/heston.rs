//! Heston stochastic volatility model with semi-analytic European pricing.
//!
//! The model is described by the SDEs:
//! ```text
//! dS = r * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + sigma * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//! where:
//! - S = asset price
//! - V = instantaneous variance
//! - r = constant risk-free rate
//! - kappa = mean reversion speed
//! - theta = long-run variance
//! - sigma = volatility of variance (vol-of-vol)
//! - rho = correlation between asset and variance
//!
//! ## Pricing
//!
//! European calls are priced as `S * P1 - K * exp(-r * T) * P2`, where the
//! exercise probabilities `P1` and `P2` are recovered from the model's
//! characteristic function by Fourier inversion:
//! ```text
//! P_j = 1/2 + (1/pi) * integral_{0}^{inf} Re[ exp(-i phi ln K) f_j(phi) / (i phi) ] dphi
//! ```
//! The integral is truncated to `[lower_cutoff, upper_cutoff]` and evaluated
//! with a composite quadrature rule (see [`QuadratureSettings`]).
//!
//! ## Feller condition
//!
//! Sufficient condition for the variance to stay strictly positive:
//! ```text
//! 2 * kappa * theta > sigma^2
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::heston::{HestonModel, HestonParams};
//!
//! let params = HestonParams::new(2.0, 0.06, 0.4, 0.5, 0.04);
//! let model = HestonModel::new(0.1, params);
//!
//! let prices = model.price(80.0, 1.0, 100.0).unwrap();
//! assert!(prices.call > 20.0);
//! assert!(prices.put >= 0.0);
//! ```

use std::f64::consts::PI;

use num_complex::Complex64;
use pricer_core::math::quadrature::{CompositeIntegrator, QuadratureRule};
use pricer_core::types::QuadratureError;
use tracing::warn;

use super::error::PricingError;

/// Heston model parameters.
///
/// Values are stored as given: nothing here enforces the usual ranges
/// (`kappa > 0`, `theta > 0`, `sigma > 0`, `-1 <= rho <= 1`, `v0 > 0`). An
/// out-of-range set prices to garbage or to non-finite values, which callers
/// such as the calibration objective treat as an invalid candidate.
///
/// # Fields
///
/// * `kappa` - Mean reversion speed
/// * `theta` - Long-run variance
/// * `sigma` - Volatility of variance
/// * `rho` - Correlation between the asset and variance shocks
/// * `v0` - Initial variance
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParams {
    /// Mean reversion speed
    pub kappa: f64,
    /// Long-run variance
    pub theta: f64,
    /// Volatility of variance
    pub sigma: f64,
    /// Asset/variance correlation
    pub rho: f64,
    /// Initial variance
    pub v0: f64,
}

impl HestonParams {
    /// Number of free parameters.
    pub const COUNT: usize = 5;

    /// Index of `kappa` in the parameter vector.
    pub const KAPPA: usize = 0;
    /// Index of `theta` in the parameter vector.
    pub const THETA: usize = 1;
    /// Index of `sigma` in the parameter vector.
    pub const SIGMA: usize = 2;
    /// Index of `rho` in the parameter vector.
    pub const RHO: usize = 3;
    /// Index of `v0` in the parameter vector.
    pub const V0: usize = 4;

    /// Parameter names in vector order.
    pub const NAMES: [&'static str; 5] = ["kappa", "theta", "sigma", "rho", "v0"];

    /// Create a parameter set.
    pub fn new(kappa: f64, theta: f64, sigma: f64, rho: f64, v0: f64) -> Self {
        Self {
            kappa,
            theta,
            sigma,
            rho,
            v0,
        }
    }

    /// Parameters as a vector in the order `[kappa, theta, sigma, rho, v0]`.
    pub fn to_array(&self) -> [f64; 5] {
        [self.kappa, self.theta, self.sigma, self.rho, self.v0]
    }

    /// Check the Feller condition `2 * kappa * theta > sigma^2`.
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.sigma * self.sigma
    }

    /// Check whether every parameter lies in its conventional range.
    ///
    /// Used for diagnostics only; pricing never rejects a parameter set.
    pub fn within_conventional_ranges(&self) -> bool {
        self.kappa > 0.0
            && self.theta > 0.0
            && self.sigma > 0.0
            && (-1.0..=1.0).contains(&self.rho)
            && self.v0 > 0.0
    }
}

impl Default for HestonParams {
    /// Default starting guess for calibration.
    fn default() -> Self {
        Self::new(2.0, 0.06, 0.4, 0.5, 0.04)
    }
}

impl From<[f64; 5]> for HestonParams {
    fn from(values: [f64; 5]) -> Self {
        Self::new(
            values[Self::KAPPA],
            values[Self::THETA],
            values[Self::SIGMA],
            values[Self::RHO],
            values[Self::V0],
        )
    }
}

impl From<HestonParams> for [f64; 5] {
    fn from(params: HestonParams) -> Self {
        params.to_array()
    }
}

impl TryFrom<&[f64]> for HestonParams {
    type Error = PricingError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let array: [f64; 5] = values.try_into().map_err(|_| PricingError::InvalidParameterCount {
            expected: Self::COUNT,
            got: values.len(),
        })?;
        Ok(array.into())
    }
}

/// Truncation and discretisation of the Fourier inversion integral.
///
/// The integrand is singular at `phi = 0`, so the lower cutoff must be
/// strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadratureSettings {
    /// Lower integration bound (default: 1e-4)
    pub lower_cutoff: f64,
    /// Upper integration bound (default: 50)
    pub upper_cutoff: f64,
    /// Number of equal-width panels (default: 1000)
    pub panel_count: usize,
    /// Per-panel rule (default: 4-point Gauss-Legendre)
    pub rule: QuadratureRule,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            lower_cutoff: 1e-4,
            upper_cutoff: 50.0,
            panel_count: 1000,
            rule: QuadratureRule::GaussLegendre4,
        }
    }
}

impl QuadratureSettings {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the lower cutoff is not strictly positive, the
    /// bounds are not finite and increasing, or the panel count is zero.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.lower_cutoff.is_nan() || self.lower_cutoff <= 0.0 {
            return Err(PricingError::invalid_settings(format!(
                "lower cutoff must be > 0, got {}",
                self.lower_cutoff
            )));
        }
        if !(self.upper_cutoff.is_finite() && self.lower_cutoff < self.upper_cutoff) {
            return Err(QuadratureError::InvalidBounds {
                lower: self.lower_cutoff,
                upper: self.upper_cutoff,
            }
            .into());
        }
        self.integrator().map(|_| ())
    }

    fn integrator(&self) -> Result<CompositeIntegrator, PricingError> {
        Ok(CompositeIntegrator::new(self.rule, self.panel_count)?)
    }
}

/// Call and put prices for one strike and maturity, rounded to cents.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionPrices {
    /// European call price
    pub call: f64,
    /// European put price from put-call parity on the rounded call
    pub put: f64,
}

/// Semi-analytic Heston pricer.
///
/// Owns a constant risk-free rate, a parameter set, and the quadrature
/// settings for the inversion integral. Pricing is pure and re-entrant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonModel {
    r0: f64,
    params: HestonParams,
    quadrature: QuadratureSettings,
}

impl HestonModel {
    /// Create a model with default quadrature settings.
    pub fn new(r0: f64, params: HestonParams) -> Self {
        Self {
            r0,
            params,
            quadrature: QuadratureSettings::default(),
        }
    }

    /// Replace the quadrature settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail [`QuadratureSettings::validate`].
    pub fn with_quadrature(mut self, quadrature: QuadratureSettings) -> Result<Self, PricingError> {
        quadrature.validate()?;
        self.quadrature = quadrature;
        Ok(self)
    }

    /// Risk-free rate.
    pub fn r0(&self) -> f64 {
        self.r0
    }

    /// Model parameters.
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Quadrature settings.
    pub fn quadrature(&self) -> &QuadratureSettings {
        &self.quadrature
    }

    /// Exercise probabilities `(P1, P2)` for the given strike, maturity and spot.
    ///
    /// `P1` is the probability of exercise under the stock measure and `P2`
    /// under the risk-neutral measure. Either may be non-finite when the
    /// integrand diverges for the current parameters.
    ///
    /// # Errors
    ///
    /// Returns an error only for unusable quadrature settings.
    pub fn exercise_probabilities(
        &self,
        strike: f64,
        maturity: f64,
        spot: f64,
    ) -> Result<(f64, f64), PricingError> {
        let integrator = self.quadrature.integrator()?;
        let p1 = self.probability(
            &integrator,
            ProbabilityIndex::StockMeasure,
            strike,
            maturity,
            spot,
        )?;
        let p2 = self.probability(
            &integrator,
            ProbabilityIndex::RiskNeutral,
            strike,
            maturity,
            spot,
        )?;
        Ok((p1, p2))
    }

    /// European call price before rounding to cents.
    ///
    /// # Errors
    ///
    /// Returns an error only for unusable quadrature settings.
    pub fn unrounded_call_price(
        &self,
        strike: f64,
        maturity: f64,
        spot: f64,
    ) -> Result<f64, PricingError> {
        let (p1, p2) = self.exercise_probabilities(strike, maturity, spot)?;
        Ok(spot * p1 - self.discount_factor(maturity) * strike * p2)
    }

    /// Call and put prices, each rounded to two decimals.
    ///
    /// The put is derived from the rounded call by put-call parity and then
    /// rounded again. Halfway cases round to even.
    ///
    /// # Errors
    ///
    /// Returns an error only for unusable quadrature settings.
    pub fn price(
        &self,
        strike: f64,
        maturity: f64,
        spot: f64,
    ) -> Result<OptionPrices, PricingError> {
        let call = round_to_cents(self.unrounded_call_price(strike, maturity, spot)?);
        let put = round_to_cents(self.discount_factor(maturity) * strike - spot + call);
        Ok(OptionPrices { call, put })
    }

    /// European call price rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns an error only for unusable quadrature settings.
    pub fn call_price(&self, strike: f64, maturity: f64, spot: f64) -> Result<f64, PricingError> {
        self.price(strike, maturity, spot).map(|prices| prices.call)
    }

    #[inline]
    fn discount_factor(&self, maturity: f64) -> f64 {
        (-self.r0 * maturity).exp()
    }

    fn probability(
        &self,
        integrator: &CompositeIntegrator,
        index: ProbabilityIndex,
        strike: f64,
        maturity: f64,
        spot: f64,
    ) -> Result<f64, PricingError> {
        let kernel = InversionKernel::new(self, index, maturity, strike.ln(), spot.ln());

        let lower = self.quadrature.lower_cutoff;
        let at_lower = kernel.integrand(lower);
        if !at_lower.is_finite() {
            warn!(
                ?index,
                phi = lower,
                value = at_lower,
                "Heston integrand is non-finite at the lower cutoff"
            );
        }

        let integral = integrator.integrate(
            |phi: f64| kernel.integrand(phi),
            lower,
            self.quadrature.upper_cutoff,
        )?;
        Ok(0.5 + integral / PI)
    }
}

/// Round to two decimals, ties to even.
#[inline]
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Which of the two exercise probabilities is being computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProbabilityIndex {
    /// `P1`: `u = 1/2`, `b = kappa - rho * sigma`
    StockMeasure,
    /// `P2`: `u = -1/2`, `b = kappa`
    RiskNeutral,
}

/// Integrand of the inversion formula for one probability, with everything
/// that does not depend on `phi` precomputed.
struct InversionKernel {
    kappa_theta: f64,
    rho_sigma: f64,
    sigma_sq: f64,
    v0: f64,
    r0: f64,
    b: f64,
    u: f64,
    tau: f64,
    ln_strike: f64,
    ln_spot: f64,
}

impl InversionKernel {
    fn new(
        model: &HestonModel,
        index: ProbabilityIndex,
        tau: f64,
        ln_strike: f64,
        ln_spot: f64,
    ) -> Self {
        let p = &model.params;
        let rho_sigma = p.rho * p.sigma;
        let (u, b) = match index {
            ProbabilityIndex::StockMeasure => (0.5, p.kappa - rho_sigma),
            ProbabilityIndex::RiskNeutral => (-0.5, p.kappa),
        };
        Self {
            kappa_theta: p.kappa * p.theta,
            rho_sigma,
            sigma_sq: p.sigma * p.sigma,
            v0: p.v0,
            r0: model.r0,
            b,
            u,
            tau,
            ln_strike,
            ln_spot,
        }
    }

    /// `Re[ exp(-i phi ln K) * f(phi) / (i phi) ]`
    fn integrand(&self, phi: f64) -> f64 {
        let one = Complex64::new(1.0, 0.0);
        let i_phi = Complex64::new(0.0, phi);

        // b - rho * sigma * phi * i
        let beta = Complex64::new(self.b, -self.rho_sigma * phi);
        // 2 * u * phi * i - phi^2
        let drift = Complex64::new(-phi * phi, 2.0 * self.u * phi);

        let d = (beta * beta - self.sigma_sq * drift).sqrt();
        let g = (beta - d) / (beta + d);
        let decay = (-self.tau * d).exp();

        let c = Complex64::new(0.0, self.r0 * phi * self.tau)
            + (self.kappa_theta / self.sigma_sq)
                * ((beta - d) * self.tau - 2.0 * ((one - g * decay) / (one - g)).ln());
        let big_d = ((beta - d) / self.sigma_sq) * ((one - decay) / (one - g * decay));

        let characteristic = (c + big_d * self.v0 + i_phi * self.ln_spot).exp();
        ((-i_phi * self.ln_strike).exp() * characteristic / i_phi).re
    }
}
